use std::time::Duration;

/// How an export step waits for the switched-to slide before rasterizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SettlePolicy {
    /// Finish every pending decode the slide depends on, then rasterize.
    #[default]
    Ready,
    /// Sleep for a fixed time, then rasterize whatever has loaded.
    FixedDelay {
        /// Pause in milliseconds.
        ms: u64,
    },
}

impl SettlePolicy {
    /// Pause taken before each rasterization.
    pub fn delay(self) -> Duration {
        match self {
            Self::Ready => Duration::ZERO,
            Self::FixedDelay { ms } => Duration::from_millis(ms),
        }
    }
}

/// Progress of a multi-slide export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportState {
    /// Not started.
    Idle,
    /// Rasterizing the slide at this index.
    Exporting(usize),
    /// Every slide was delivered.
    Done,
}

/// Strictly ordered walk over `0..total` slides.
///
/// There is no cancellation: once started the sequence only moves forward until `Done`.
#[derive(Clone, Debug)]
pub struct ExportSequence {
    state: ExportState,
    total: usize,
    restore: usize,
}

impl ExportSequence {
    /// New idle sequence; `restore` is the active slide to return to when finished.
    pub fn new(total: usize, restore: usize) -> Self {
        Self {
            state: ExportState::Idle,
            total,
            restore,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn restore_index(&self) -> usize {
        self.restore
    }

    /// Leave `Idle`; returns the first slide to export.
    pub fn start(&mut self) -> Option<usize> {
        if self.state != ExportState::Idle {
            return self.current();
        }
        self.state = if self.total == 0 {
            ExportState::Done
        } else {
            ExportState::Exporting(0)
        };
        self.current()
    }

    /// Mark the current slide delivered; returns the next slide, if any.
    pub fn advance(&mut self) -> Option<usize> {
        self.state = match self.state {
            ExportState::Idle => ExportState::Idle,
            ExportState::Exporting(i) if i + 1 < self.total => ExportState::Exporting(i + 1),
            ExportState::Exporting(_) | ExportState::Done => ExportState::Done,
        };
        self.current()
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            ExportState::Exporting(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ExportState::Done
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sequence.rs"]
mod tests;
