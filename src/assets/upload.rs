use crate::config::UploadLimits;

/// One file handed over by the drag-drop / file-picker glue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// File from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Why a file was turned away at the upload boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadRejection {
    /// Neither the content nor the extension is JPEG, PNG or WebP.
    Unsupported {
        /// File name.
        name: String,
    },
    /// The file exceeds the per-file byte limit.
    TooLarge {
        /// File name.
        name: String,
        /// File size.
        bytes: u64,
        /// Configured limit.
        limit: u64,
    },
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported { name } => write!(f, "'{name}' is not a JPEG, PNG or WebP image"),
            Self::TooLarge { name, bytes, limit } => {
                write!(f, "'{name}' is {bytes} bytes (limit {limit})")
            }
        }
    }
}

/// Files that passed the boundary checks, in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screened {
    /// Files to register, already truncated to the remaining capacity.
    pub accepted: Vec<UploadFile>,
    /// Files turned away by format or size.
    pub rejected: Vec<UploadRejection>,
    /// Valid files dropped because the slide was full.
    pub truncated: usize,
}

/// `true` when `file` is a JPEG, PNG or WebP by content, or by extension when the content
/// cannot be sniffed.
pub fn is_supported(file: &UploadFile) -> bool {
    use image::ImageFormat as F;

    let sniffed = image::guess_format(&file.bytes).ok().or_else(|| {
        std::path::Path::new(&file.name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(F::from_extension)
    });
    matches!(sniffed, Some(F::Jpeg | F::Png | F::WebP))
}

/// Apply format and size checks, then silently truncate to `limits` given `current_count`
/// images already on the slide.
pub fn screen(files: Vec<UploadFile>, limits: &UploadLimits, current_count: usize) -> Screened {
    let remaining = limits.max_images_per_slide.saturating_sub(current_count);
    let mut out = Screened::default();
    for file in files {
        let size = file.bytes.len() as u64;
        if !is_supported(&file) {
            out.rejected
                .push(UploadRejection::Unsupported { name: file.name });
        } else if size > limits.max_file_bytes {
            out.rejected.push(UploadRejection::TooLarge {
                name: file.name,
                bytes: size,
                limit: limits.max_file_bytes,
            });
        } else if out.accepted.len() < remaining {
            out.accepted.push(file);
        } else {
            out.truncated += 1;
        }
    }
    if out.truncated > 0 {
        tracing::debug!(
            truncated = out.truncated,
            remaining,
            "upload batch truncated to remaining capacity"
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/upload.rs"]
mod tests;
