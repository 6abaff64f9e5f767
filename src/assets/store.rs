use std::sync::Arc;

use crate::assets::decode::{decode_image, parse_svg};
use crate::foundation::core::Size;

/// Handle of an asset in an [`AssetStore`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AssetId(pub u32);

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Natural dimensions as a [`Size`].
    pub fn natural_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Clone, Debug)]
/// Parsed SVG logo.
pub struct VectorLogo {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

impl VectorLogo {
    /// Intrinsic SVG size.
    pub fn natural_size(&self) -> Size {
        let s = self.tree.size();
        Size::new(f64::from(s.width()), f64::from(s.height()))
    }
}

/// How pending bytes are to be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// Raster photo or logo (JPEG, PNG, WebP).
    Raster,
    /// SVG logo.
    Svg,
}

/// Decoded asset payload.
#[derive(Clone, Debug)]
pub enum Asset {
    /// Raster bitmap.
    Image(DecodedImage),
    /// Vector logo.
    Svg(VectorLogo),
}

impl Asset {
    /// Natural dimensions of the payload.
    pub fn natural_size(&self) -> Size {
        match self {
            Self::Image(i) => i.natural_size(),
            Self::Svg(s) => s.natural_size(),
        }
    }
}

/// Load state of one asset. Decoding is the only suspension point of the editor.
#[derive(Clone, Debug)]
pub enum AssetState {
    /// Encoded bytes waiting for decode.
    Pending {
        /// Encoded file contents.
        bytes: Arc<Vec<u8>>,
        /// Decoder to use.
        kind: AssetKind,
    },
    /// Decoded and ready to draw.
    Ready(Asset),
    /// Decoding failed; the asset is never drawn.
    Failed(String),
}

/// Result of driving one pending asset through its decoder.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeReport {
    /// The asset decoded; natural dimensions are now known.
    Ready(Size),
    /// The asset failed to decode.
    Failed(String),
    /// The asset was not pending (already decoded, failed, or unknown).
    NotPending,
}

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    state: AssetState,
}

/// Session-scoped store of uploaded photos and logos.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    entries: Vec<Entry>,
}

impl AssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes; they are decoded later by [`AssetStore::decode`].
    pub fn insert_pending(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        kind: AssetKind,
    ) -> AssetId {
        self.push(
            name.into(),
            AssetState::Pending {
                bytes: Arc::new(bytes),
                kind,
            },
        )
    }

    /// Register an already decoded asset.
    pub fn insert_ready(&mut self, name: impl Into<String>, asset: Asset) -> AssetId {
        self.push(name.into(), AssetState::Ready(asset))
    }

    fn push(&mut self, name: String, state: AssetState) -> AssetId {
        let id = AssetId(self.entries.len() as u32);
        self.entries.push(Entry { name, state });
        id
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no asset was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load state of `id`.
    pub fn state(&self, id: AssetId) -> Option<&AssetState> {
        self.entry(id).map(|e| &e.state)
    }

    /// Original file name of `id`.
    pub fn name(&self, id: AssetId) -> Option<&str> {
        self.entry(id).map(|e| e.name.as_str())
    }

    /// Decoded payload of `id`, if ready.
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        match self.state(id)? {
            AssetState::Ready(a) => Some(a),
            _ => None,
        }
    }

    /// `true` when `id` decoded successfully.
    pub fn is_ready(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }

    /// `true` when `id` still waits for decode.
    pub fn is_pending(&self, id: AssetId) -> bool {
        matches!(self.state(id), Some(AssetState::Pending { .. }))
    }

    /// Ids of every pending asset, in registration order.
    pub fn pending_ids(&self) -> Vec<AssetId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e.state, AssetState::Pending { .. }))
            .map(|(i, _)| AssetId(i as u32))
            .collect()
    }

    /// Decode a pending asset in place.
    #[tracing::instrument(skip(self), fields(asset = %id))]
    pub fn decode(&mut self, id: AssetId) -> DecodeReport {
        let Some(entry) = self.entries.get_mut(id.0 as usize) else {
            return DecodeReport::NotPending;
        };
        let AssetState::Pending { bytes, kind } = &entry.state else {
            return DecodeReport::NotPending;
        };
        let decoded = match kind {
            AssetKind::Raster => decode_image(bytes).map(Asset::Image),
            AssetKind::Svg => parse_svg(bytes).map(Asset::Svg),
        };
        match decoded {
            Ok(asset) => {
                let size = asset.natural_size();
                tracing::debug!(name = %entry.name, w = size.width, h = size.height, "asset decoded");
                entry.state = AssetState::Ready(asset);
                DecodeReport::Ready(size)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(name = %entry.name, %reason, "asset failed to decode");
                entry.state = AssetState::Failed(reason.clone());
                DecodeReport::Failed(reason)
            }
        }
    }

    fn entry(&self, id: AssetId) -> Option<&Entry> {
        self.entries.get(id.0 as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
