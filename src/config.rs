//! Injected configuration: brand palette, fonts, categories, presets and editor policy.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::editor::layout::Arrangement;
use crate::export::sequence::SettlePolicy;
use crate::foundation::color::Color;
use crate::foundation::core::CanvasFormat;
use crate::foundation::error::{PostError, PostResult};

/// Everything the editor core reads from its surroundings.
///
/// Every field has a default, so a config file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Named brand colors.
    pub palette: BrandPalette,
    /// Brand font stacks and font files.
    pub fonts: BrandFonts,
    /// Post categories; the first one is the default.
    pub categories: Vec<PostCategory>,
    /// Quick text presets.
    pub text_presets: Vec<TextPreset>,
    /// Defaults for text labels added without a preset.
    pub text_defaults: TextDefaults,
    /// Available image arrangements.
    pub layouts: Vec<LayoutPreset>,
    /// Id of the layout selected at session start.
    pub default_layout: String,
    /// Format selected at session start.
    pub default_format: CanvasFormat,
    /// Photo styling applied on placement.
    pub image_style: ImageStyle,
    /// Upload acceptance limits.
    pub upload: UploadLimits,
    /// Rotation snapping during transform gestures.
    pub snapping: RotationSnap,
    /// Selection chrome styling.
    pub chrome: ChromeStyle,
    /// Slide-type overlay texts and styles.
    pub overlays: OverlayStyle,
    /// Export naming and settle policy.
    pub export: ExportPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let palette = BrandPalette::default();
        Self {
            categories: default_categories(&palette),
            text_presets: default_presets(&palette),
            text_defaults: TextDefaults::default(),
            layouts: vec![
                LayoutPreset::new("single", "Einzelbild", 1, Arrangement::Single),
                LayoutPreset::new("side-by-side", "Nebeneinander", 2, Arrangement::SideBySide),
                LayoutPreset::new("stacked", "Übereinander", 2, Arrangement::Stacked),
                LayoutPreset::new("grid-4", "4er Raster", 4, Arrangement::Grid),
            ],
            default_layout: "side-by-side".to_string(),
            default_format: CanvasFormat::Instagram,
            fonts: BrandFonts::default(),
            image_style: ImageStyle::default(),
            upload: UploadLimits::default(),
            snapping: RotationSnap::default(),
            chrome: ChromeStyle::default(),
            overlays: OverlayStyle::default(),
            export: ExportPolicy::default(),
            palette,
        }
    }
}

impl EditorConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> PostResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PostError::serde(format!("parse editor config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PostResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PostError::validation(format!("open editor config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject configurations the editor cannot run with.
    pub fn validate(&self) -> PostResult<()> {
        if self.categories.is_empty() {
            return Err(PostError::validation("config needs at least one category"));
        }
        if self.layouts.is_empty() {
            return Err(PostError::validation("config needs at least one layout"));
        }
        if self.layout(&self.default_layout).is_none() {
            return Err(PostError::validation(format!(
                "default layout \"{}\" is not defined",
                self.default_layout
            )));
        }
        if let Some(l) = self.layouts.iter().find(|l| l.images == 0) {
            return Err(PostError::validation(format!(
                "layout \"{}\" must hold at least one image",
                l.id
            )));
        }
        if self.upload.max_images_per_slide == 0 {
            return Err(PostError::validation(
                "upload.max_images_per_slide must be > 0",
            ));
        }
        let t = &self.text_defaults;
        if !(t.font_size.is_finite() && t.font_size > 0.0) || !t.min_font_size.is_finite() {
            return Err(PostError::validation("text font sizes must be finite and > 0"));
        }
        if !(self.snapping.tolerance_deg.is_finite() && self.snapping.tolerance_deg >= 0.0) {
            return Err(PostError::validation(
                "snapping.tolerance_deg must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Category by id.
    pub fn category(&self, id: &str) -> Option<&PostCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The default (first) category.
    pub fn default_category(&self) -> PostResult<&PostCategory> {
        self.categories
            .first()
            .ok_or_else(|| PostError::validation("config needs at least one category"))
    }

    /// Layout by id.
    pub fn layout(&self, id: &str) -> Option<&LayoutPreset> {
        self.layouts.iter().find(|l| l.id == id)
    }

    /// Text preset by label.
    pub fn text_preset(&self, label: &str) -> Option<&TextPreset> {
        self.text_presets.iter().find(|p| p.label == label)
    }
}

/// Named brand colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrandPalette {
    /// Primary purple.
    pub lila: Color,
    /// Light green.
    pub gruen: Color,
    /// White.
    pub white: Color,
    /// Dark text color.
    pub dark: Color,
    /// Generic editor purple used for new labels and the name overlay.
    pub accent: Color,
    /// Warning red.
    pub red: Color,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            lila: Color::rgb(0x82, 0x0b, 0x79),
            gruen: Color::rgb(0xcd, 0xdb, 0x62),
            white: Color::WHITE,
            dark: Color::rgb(0x1f, 0x29, 0x37),
            accent: Color::rgb(0x93, 0x33, 0xea),
            red: Color::rgb(0xdc, 0x26, 0x26),
        }
    }
}

/// Brand font stacks plus font files registered with the text engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrandFonts {
    /// Headline stack (name overlay).
    pub headline: String,
    /// Body stack (story text, captions).
    pub body: String,
    /// Family used for new text labels.
    pub label: String,
    /// Font files keyed by family name; paths are relative to the config file's directory.
    pub files: BTreeMap<String, PathBuf>,
}

impl Default for BrandFonts {
    fn default() -> Self {
        Self {
            headline: "Chewy, cursive".to_string(),
            body: "Raleway, sans-serif".to_string(),
            label: "Arial".to_string(),
            files: BTreeMap::new(),
        }
    }
}

/// Post category with its default colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PostCategory {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Colors applied when the category is chosen.
    pub colors: CategoryColors,
}

/// Default colors of a category.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryColors {
    /// Slide background.
    pub background: Color,
    /// Label backgrounds.
    pub primary: Color,
    /// Animal name.
    pub secondary: Color,
    /// Body text.
    pub text: Color,
    /// Highlights.
    pub accent: Color,
}

fn default_categories(p: &BrandPalette) -> Vec<PostCategory> {
    let cat = |id: &str, name: &str, description: &str, background, secondary| PostCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        colors: CategoryColors {
            background,
            primary: p.lila,
            secondary,
            text: p.dark,
            accent: p.white,
        },
    };
    vec![
        cat(
            "gluecksstreunerpost",
            "Glücksstreunerpost",
            "Vorher/Nachher Posts für vermittelte Tiere",
            p.gruen,
            p.lila,
        ),
        cat(
            "vermittlung",
            "Vermittlung",
            "Tiere die ein Zuhause suchen",
            Color::rgb(0xf5, 0xf0, 0xff),
            p.gruen,
        ),
        cat(
            "spendenaktion",
            "Spendenaktion",
            "Spendenaufrufe und Aktionen",
            Color::rgb(0xfe, 0xca, 0xca),
            p.red,
        ),
    ]
}

/// Quick text preset: label text plus colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextPreset {
    /// Text inserted by the preset.
    pub label: String,
    /// Background box color.
    pub background: Color,
    /// Glyph fill.
    pub fill: Color,
}

fn default_presets(p: &BrandPalette) -> Vec<TextPreset> {
    let preset = |label: &str, background, fill| TextPreset {
        label: label.to_string(),
        background,
        fill,
    };
    vec![
        preset("früher", p.lila, p.white),
        preset("jetzt", p.lila, p.white),
        preset("vorher", p.red, p.white),
        preset("nachher", p.gruen, p.dark),
    ]
}

/// Defaults for text labels added without a preset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Glyph fill.
    pub fill: Color,
    /// Background box color.
    pub background: Color,
    /// Padding around the glyph run.
    pub padding: f64,
    /// Smallest font size a transform gesture may commit.
    pub min_font_size: f64,
    /// Origin as a fraction of the canvas size.
    pub origin_frac: (f64, f64),
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            text: "Text".to_string(),
            font_size: 32.0,
            fill: Color::WHITE,
            background: Color::rgb(0x93, 0x33, 0xea),
            padding: 12.0,
            min_font_size: 12.0,
            origin_frac: (0.1, 0.1),
        }
    }
}

/// Named image arrangement with its image capacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutPreset {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of image slots.
    pub images: usize,
    /// Placement policy.
    pub arrangement: Arrangement,
}

impl LayoutPreset {
    fn new(id: &str, name: &str, images: usize, arrangement: Arrangement) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            images,
            arrangement,
        }
    }
}

/// Photo styling applied on placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageStyle {
    /// Corner radius of new photos.
    pub corner_radius: f64,
    /// Whether new photos get a drop shadow.
    pub shadow: bool,
    /// Shadow offset in canvas units.
    pub shadow_offset: (f64, f64),
    /// Shadow color including its opacity.
    pub shadow_color: Color,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            corner_radius: 15.0,
            shadow: true,
            shadow_offset: (5.0, 5.0),
            shadow_color: Color::BLACK.with_opacity(0.3),
        }
    }
}

/// Upload acceptance limits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Maximum images on one slide.
    pub max_images_per_slide: usize,
    /// Maximum encoded size of one file.
    pub max_file_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_images_per_slide: 4,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Rotation snapping during transform gestures.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RotationSnap {
    /// Snap at all.
    pub enabled: bool,
    /// Snap targets in degrees.
    pub angles: Vec<f64>,
    /// Distance (degrees) within which a rotation snaps.
    pub tolerance_deg: f64,
}

impl Default for RotationSnap {
    fn default() -> Self {
        Self {
            enabled: true,
            angles: vec![0.0, 90.0, 180.0, 270.0],
            tolerance_deg: 2.0,
        }
    }
}

/// Selection chrome styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChromeStyle {
    /// Outline and anchor stroke.
    pub stroke: Color,
    /// Outline width in screen pixels.
    pub stroke_width: f64,
    /// Anchor fill.
    pub anchor_fill: Color,
    /// Anchor edge length in screen pixels.
    pub anchor_size: f64,
}

impl Default for ChromeStyle {
    fn default() -> Self {
        Self {
            stroke: Color::rgb(0, 161, 255),
            stroke_width: 1.0,
            anchor_fill: Color::WHITE,
            anchor_size: 10.0,
        }
    }
}

/// Dynamic overlay texts and styling per slide type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Animal name font size.
    pub name_font_size: f64,
    /// Animal name origin as a fraction of the canvas size.
    pub name_origin_frac: (f64, f64),
    /// Prefix of the "since" caption.
    pub since_prefix: String,
    /// "Since" caption font size.
    pub since_font_size: f64,
    /// Story text font size.
    pub story_font_size: f64,
    /// Story box width as a fraction of the canvas width.
    pub story_width_frac: f64,
    /// Padding inside the story box.
    pub story_padding: f64,
    /// Quote shown on end slides.
    pub end_quote: String,
    /// Thanks line shown on end slides.
    pub end_thanks: String,
    /// End-slide font size.
    pub end_font_size: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            name_font_size: 64.0,
            name_origin_frac: (0.55, 0.05),
            since_prefix: "Bei uns seit".to_string(),
            since_font_size: 32.0,
            story_font_size: 36.0,
            story_width_frac: 0.9,
            story_padding: 24.0,
            end_quote: "Jedes Tier verdient ein Zuhause.".to_string(),
            end_thanks: "Danke für eure Unterstützung!".to_string(),
            end_font_size: 44.0,
        }
    }
}

/// Export naming and settle policy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportPolicy {
    /// Prefix of single-slide export names.
    pub file_prefix: String,
    /// Name used when the animal name is empty.
    pub fallback_name: String,
    /// How the sequence waits for a slide to settle before rasterizing.
    pub settle: SettlePolicy,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            file_prefix: "streunergluck".to_string(),
            fallback_name: "post".to_string(),
            settle: SettlePolicy::default(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
