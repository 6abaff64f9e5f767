//! Replayable editing recipes for the command line.
//!
//! A script is a JSON object with a `steps` array. Each step carries an `"op"`: editor
//! [`Command`]s use their own op names (`"add_text"`, `"move"`, ...), and a few script-only ops
//! feed files and pointer input into the session. A script is an input recipe, not a saved
//! project.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize as _;
use serde::de::Error as _;

use crate::assets::upload::UploadFile;
use crate::editor::command::{Command, Notice, Outcome};
use crate::editor::session::EditorSession;
use crate::foundation::core::Point;
use crate::foundation::error::{PostError, PostResult};

/// Operations only a script can perform.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    /// Upload photos onto the active slide; paths are relative to the script.
    Upload {
        /// Image files.
        files: Vec<PathBuf>,
    },
    /// Register a logo asset for decorations.
    AddLogo {
        /// Raster or SVG file.
        file: PathBuf,
    },
    /// Finish pending decodes and place the photos.
    Decode,
    /// Click a canvas point.
    Click {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
    },
    /// Drag the selected element's transform handles to a target box and release.
    ///
    /// Missing fields keep the value the gesture started from.
    Gesture {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
        #[serde(default)]
        rotation: Option<f64>,
    },
}

const SCRIPT_OPS: [&str; 5] = ["upload", "add_logo", "decode", "click", "gesture"];

/// One script step.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Script-only operation.
    Script(ScriptOp),
    /// Editor command applied through the reducer.
    Command(Command),
}

impl<'de> serde::Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        let op = value
            .get("op")
            .and_then(|v| v.as_str())
            .ok_or_else(|| D::Error::custom("step is missing a string \"op\""))?;
        if SCRIPT_OPS.contains(&op) {
            serde_json::from_value(value)
                .map(Step::Script)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Step::Command)
                .map_err(D::Error::custom)
        }
    }
}

/// Parsed script.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Script {
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Tally of a script run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Steps that changed state.
    pub applied: usize,
    /// Steps that changed nothing.
    pub unchanged: usize,
    /// Steps a size floor rejected.
    pub rejected: usize,
    /// Steps that were not applicable.
    pub refused: usize,
    /// Notices raised along the way.
    pub notices: Vec<Notice>,
}

impl ScriptReport {
    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Rejected(_) => self.rejected += 1,
            Outcome::Refused(_) => self.refused += 1,
        }
    }
}

impl Script {
    pub fn from_reader<R: std::io::Read>(r: R) -> PostResult<Self> {
        serde_json::from_reader(r).map_err(|e| PostError::serde(format!("parse script JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> PostResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| PostError::validation(format!("open script '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Replay every step against `session`, resolving files under `base_dir`.
    ///
    /// Commands never abort the run; only unreadable files do.
    #[tracing::instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn run(&self, session: &mut EditorSession, base_dir: &Path) -> PostResult<ScriptReport> {
        let mut report = ScriptReport::default();
        for (i, step) in self.steps.iter().enumerate() {
            let outcome = match step {
                Step::Command(cmd) => session.apply(cmd.clone()),
                Step::Script(op) => run_op(op, session, base_dir)?,
            };
            if let Outcome::Refused(reason) | Outcome::Rejected(reason) = &outcome {
                tracing::info!(step = i, %reason, "step had no effect");
            }
            report.count(&outcome);
        }
        report.notices = session.take_notices();
        Ok(report)
    }
}

fn run_op(op: &ScriptOp, session: &mut EditorSession, base_dir: &Path) -> PostResult<Outcome> {
    Ok(match op {
        ScriptOp::Upload { files } => {
            let files = files
                .iter()
                .map(|p| read_file(base_dir, p))
                .collect::<PostResult<Vec<_>>>()?;
            let summary = session.upload_images(files);
            if summary.accepted.is_empty() {
                Outcome::Unchanged
            } else {
                Outcome::Applied
            }
        }
        ScriptOp::AddLogo { file } => {
            let id = session.add_logo(read_file(base_dir, file)?);
            tracing::debug!(asset = %id, "logo registered");
            Outcome::Applied
        }
        ScriptOp::Decode => {
            if session.pump_decodes() > 0 {
                Outcome::Applied
            } else {
                Outcome::Unchanged
            }
        }
        ScriptOp::Click { x, y } => session.click(Point::new(*x, *y)),
        ScriptOp::Gesture {
            x,
            y,
            width,
            height,
            rotation,
        } => {
            let Some(mut gesture) = session.begin_transform() else {
                return Ok(Outcome::Refused("gesture needs a selection".to_string()));
            };
            let mut target = gesture.start();
            target.x = x.unwrap_or(target.x);
            target.y = y.unwrap_or(target.y);
            target.width = width.unwrap_or(target.width);
            target.height = height.unwrap_or(target.height);
            target.rotation = rotation.unwrap_or(target.rotation);
            gesture.update(target);
            session.apply(gesture.finish())
        }
    })
}

fn read_file(base_dir: &Path, rel: &Path) -> PostResult<UploadFile> {
    let path = base_dir.join(rel);
    let bytes =
        std::fs::read(&path).with_context(|| format!("read script input '{}'", path.display()))?;
    let name = rel
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| rel.display().to_string());
    Ok(UploadFile::new(name, bytes))
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
