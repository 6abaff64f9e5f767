use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{PostError, PostResult};

/// Measures a rendered glyph run.
///
/// Text label boxes are derived from this on every use; nothing caches the result as state.
pub trait TextMeasure {
    /// Size of `text` set in `family` at `size`, wrapped at `max_width` when given.
    fn measure(&mut self, text: &str, family: &str, size: f64, max_width: Option<f64>) -> Size;
}

/// Deterministic font-free metrics: `0.6 * size` per character, `size` per line.
///
/// Used when no font file is registered for a family, and by tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

/// Advance of one character relative to the font size.
pub const APPROX_ADVANCE: f64 = 0.6;

impl ApproxMeasure {
    /// Break `text` into lines the way [`ApproxMeasure::measure`] counts them.
    pub fn wrap(text: &str, size: f64, max_width: Option<f64>) -> Vec<String> {
        let advance = APPROX_ADVANCE * size;
        let max_chars = max_width
            .filter(|w| w.is_finite() && advance > 0.0)
            .map(|w| ((w / advance).floor() as usize).max(1));

        let mut out = Vec::new();
        for para in text.split('\n') {
            let Some(limit) = max_chars else {
                out.push(para.to_string());
                continue;
            };
            let mut line = String::new();
            for word in para.split(' ') {
                let cur = line.chars().count();
                let add = word.chars().count();
                if cur > 0 && cur + 1 + add > limit {
                    out.push(std::mem::take(&mut line));
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
            }
            out.push(line);
        }
        out
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&mut self, text: &str, _family: &str, size: f64, max_width: Option<f64>) -> Size {
        let lines = Self::wrap(text, size, max_width);
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            widest as f64 * APPROX_ADVANCE * size,
            lines.len().max(1) as f64 * size,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

#[derive(Clone, Debug)]
struct FontEntry {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Font files registered by family name.
///
/// Lookup is case-insensitive and accepts CSS-style stacks (`"Chewy, cursive"`): the first
/// registered family in the stack wins.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    files: BTreeMap<String, Arc<Vec<u8>>>,
}

impl FontBook {
    /// Empty font book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes under `family`.
    pub fn insert(&mut self, family: &str, bytes: Vec<u8>) {
        self.files
            .insert(family.trim().to_ascii_lowercase(), Arc::new(bytes));
    }

    /// Register a font file from disk.
    pub fn load(&mut self, family: &str, path: impl AsRef<std::path::Path>) -> PostResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PostError::asset(format!("read font '{}': {e}", path.display()))
        })?;
        self.insert(family, bytes);
        Ok(())
    }

    /// Registered family names (lowercased).
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// First registered family of a CSS-style stack.
    pub fn resolve(&self, stack: &str) -> Option<(&str, &Arc<Vec<u8>>)> {
        stack.split(',').find_map(|f| {
            let key = f.trim().trim_matches(['"', '\'']).to_ascii_lowercase();
            self.files.get_key_value(&key).map(|(k, v)| (k.as_str(), v))
        })
    }
}

/// Shaped text ready for glyph drawing.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrush>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Parley-backed shaper and measurer over a [`FontBook`].
///
/// Families missing from the book fall back to [`ApproxMeasure`] metrics; the renderer then
/// draws no glyphs for them.
pub struct TextEngine {
    book: FontBook,
    registered: BTreeMap<String, FontEntry>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(FontBook::default())
    }
}

impl TextEngine {
    /// Engine over the fonts in `book`.
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            registered: BTreeMap::new(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// The underlying font book.
    pub fn book(&self) -> &FontBook {
        &self.book
    }

    /// `true` when `stack` resolves to a registered font file.
    pub fn has_font(&self, stack: &str) -> bool {
        self.book.resolve(stack).is_some()
    }

    fn entry_for(&mut self, stack: &str) -> PostResult<Option<FontEntry>> {
        let Some((key, bytes)) = self.book.resolve(stack) else {
            return Ok(None);
        };
        if let Some(e) = self.registered.get(key) {
            return Ok(Some(e.clone()));
        }
        let key = key.to_string();
        let bytes = (**bytes).clone();

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PostError::render(format!("font file for '{key}' contains no families"))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PostError::render("registered font family has no name"))?
            .to_string();

        let entry = FontEntry {
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        };
        self.registered.insert(key, entry.clone());
        Ok(Some(entry))
    }

    /// Shape `text`; `Ok(None)` when the family has no registered font.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        stack: &str,
        size: f64,
        brush: TextBrush,
        max_width: Option<f64>,
    ) -> PostResult<Option<ShapedText>> {
        if !size.is_finite() || size <= 0.0 {
            return Err(PostError::validation("font size must be finite and > 0"));
        }
        let Some(entry) = self.entry_for(stack)? else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(entry.family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        let max = max_width.map(|w| w as f32);
        layout.break_all_lines(max);
        layout.align(
            max,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(Some(ShapedText {
            layout,
            font: entry.font,
        }))
    }
}

/// Width and height of a shaped layout from its line metrics.
pub(crate) fn layout_size(layout: &parley::Layout<TextBrush>) -> Size {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    Size::new(w, h)
}

impl TextMeasure for TextEngine {
    fn measure(&mut self, text: &str, family: &str, size: f64, max_width: Option<f64>) -> Size {
        match self.shape(text, family, size, TextBrush::default(), max_width) {
            Ok(Some(shaped)) => layout_size(&shaped.layout),
            Ok(None) => ApproxMeasure.measure(text, family, size, max_width),
            Err(e) => {
                tracing::warn!(family, error = %e, "text shaping failed, using approximate metrics");
                ApproxMeasure.measure(text, family, size, max_width)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
