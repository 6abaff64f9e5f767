use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::png::encode_png;
use crate::foundation::error::{PostError, PostResult};
use crate::render::backend::FrameRGBA;

/// Receives exported slides in order.
pub trait ExportSink {
    /// Called once before the first slide with the number of slides to expect.
    fn begin(&mut self, total: usize) -> PostResult<()>;
    /// Deliver one rasterized slide under `file_name`.
    fn push(&mut self, file_name: &str, frame: &FrameRGBA) -> PostResult<()>;
    /// Called once after the last slide.
    fn end(&mut self) -> PostResult<()>;
}

/// Writes each slide as a PNG file into a directory.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in export order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirSink {
    fn begin(&mut self, _total: usize) -> PostResult<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        Ok(())
    }

    fn push(&mut self, file_name: &str, frame: &FrameRGBA) -> PostResult<()> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(PostError::export(format!(
                "invalid export file name '{file_name}'"
            )));
        }
        let bytes = encode_png(frame)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "slide written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PostResult<()> {
        tracing::info!(
            dir = %self.dir.display(),
            files = self.written.len(),
            "export finished"
        );
        Ok(())
    }
}

/// Keeps exported frames in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Expected slide count passed to `begin`.
    pub expected: Option<usize>,
    /// Delivered `(file name, frame)` pairs in order.
    pub files: Vec<(String, FrameRGBA)>,
    /// Whether `end` was called.
    pub finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl ExportSink for InMemorySink {
    fn begin(&mut self, total: usize) -> PostResult<()> {
        self.expected = Some(total);
        self.files.clear();
        self.finished = false;
        Ok(())
    }

    fn push(&mut self, file_name: &str, frame: &FrameRGBA) -> PostResult<()> {
        self.files.push((file_name.to_string(), frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PostResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
