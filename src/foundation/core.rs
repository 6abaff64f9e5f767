use crate::foundation::error::{PostError, PostResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Fixed logical drawing surface for one output format, in canvas units (= output pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in canvas units.
    pub width: u32,
    /// Height in canvas units.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> PostResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64` canvas units.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64` canvas units.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// The full canvas rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.w(), self.h())
    }
}

/// Output format preset. Each preset owns one fixed canvas size.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CanvasFormat {
    /// Square feed post, 1080×1080.
    #[default]
    Instagram,
    /// Landscape link post, 1200×630.
    Facebook,
    /// Portrait story, 1080×1920.
    Story,
}

impl CanvasFormat {
    /// All presets in display order.
    pub const ALL: [CanvasFormat; 3] = [Self::Instagram, Self::Facebook, Self::Story];

    /// The fixed canvas for this preset.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Instagram => Canvas {
                width: 1080,
                height: 1080,
            },
            Self::Facebook => Canvas {
                width: 1200,
                height: 630,
            },
            Self::Story => Canvas {
                width: 1080,
                height: 1920,
            },
        }
    }

    /// Stable identifier used in file names and configuration.
    pub fn id(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Story => "story",
        }
    }
}

impl std::str::FromStr for CanvasFormat {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" | "square" => Ok(Self::Instagram),
            "facebook" | "landscape" => Ok(Self::Facebook),
            "story" | "portrait" => Ok(Self::Story),
            other => Err(PostError::validation(format!(
                "unknown canvas format \"{other}\""
            ))),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(r), u16::from(a)),
            g: mul_div255_u8(u16::from(g), u16::from(a)),
            b: mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    /// Channel bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
