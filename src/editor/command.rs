use crate::assets::store::AssetId;
use crate::assets::upload::UploadRejection;
use crate::foundation::color::Color;
use crate::foundation::core::CanvasFormat;
use crate::scene::model::{DecorationKind, DecorationPatch, ElementId, ImagePatch, TextPatch};
use crate::scene::slide::SlideKind;
use crate::transform::placement::Placement;

/// One editing action, applied through [`crate::EditorSession::apply`].
///
/// Element-targeting commands address elements on the active slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Select an element, or clear the selection with `None`.
    Select {
        /// Element to select.
        #[serde(default)]
        id: Option<ElementId>,
    },
    /// Commit a drag: position only.
    Move {
        /// Target element.
        id: ElementId,
        /// New origin x.
        x: f64,
        /// New origin y.
        y: f64,
    },
    /// Commit a transform gesture with the node state it ended in.
    ///
    /// `node` carries the unscaled size the gesture started from plus the scale it applied;
    /// the commit folds the scale into the stored geometry and resets it to `1.0`.
    Transform {
        /// Target element.
        id: ElementId,
        /// Final node state.
        node: Placement,
    },
    /// Set an image's box directly.
    Resize {
        /// Target image.
        id: ElementId,
        /// New width.
        width: f64,
        /// New height.
        height: f64,
        /// New rotation in degrees.
        rotation: f64,
    },
    /// Remove an element.
    Delete {
        /// Target element.
        id: ElementId,
    },
    /// Add a text label from a named preset or the defaults; the new label is selected.
    AddText {
        /// Preset label, see [`crate::EditorConfig::text_presets`].
        #[serde(default)]
        preset: Option<String>,
    },
    /// Add a decoration centered on the canvas; the new decoration is selected.
    AddDecoration {
        /// Decoration kind.
        kind: DecorationKind,
        /// Optional logo asset drawn instead of the built-in glyph.
        #[serde(default)]
        logo: Option<AssetId>,
    },
    /// Partially update an image.
    UpdateImage {
        /// Target image.
        id: ElementId,
        /// Attributes to replace.
        patch: ImagePatch,
    },
    /// Partially update a text label; the label becomes selected.
    UpdateText {
        /// Target label.
        id: ElementId,
        /// Attributes to replace.
        patch: TextPatch,
    },
    /// Partially update a decoration.
    UpdateDecoration {
        /// Target decoration.
        id: ElementId,
        /// Attributes to replace.
        patch: DecorationPatch,
    },
    /// Set the active slide's background.
    SetBackground {
        /// Fill color.
        color: Color,
    },
    /// Set or clear the active slide's story text.
    SetStoryText {
        /// Story text.
        #[serde(default)]
        text: Option<String>,
    },
    /// Set the animal name used by overlays and export names.
    SetAnimalName {
        /// Name; may be empty.
        name: String,
    },
    /// Set or clear the "since" caption.
    SetAnimalSince {
        /// Caption value.
        #[serde(default)]
        since: Option<String>,
    },
    /// Change the output format; images are re-placed for the new canvas.
    SetFormat {
        /// New format.
        format: CanvasFormat,
    },
    /// Choose the arrangement used for future placements.
    SetLayout {
        /// Layout id.
        layout: String,
    },
    /// Choose the post category; slide backgrounds reset to its default.
    SetCategory {
        /// Category id.
        category: String,
    },
    /// Append a slide and make it active.
    AddSlide {
        /// Slide role.
        kind: SlideKind,
    },
    /// Delete a slide; the last remaining slide cannot be deleted.
    DeleteSlide {
        /// Slide index.
        index: usize,
    },
    /// Switch the active slide.
    SetActiveSlide {
        /// Slide index.
        index: usize,
    },
    /// Toggle the dark editor theme.
    SetDarkMode {
        /// Dark theme on.
        enabled: bool,
    },
}

impl Command {
    /// Short operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Move { .. } => "move",
            Self::Transform { .. } => "transform",
            Self::Resize { .. } => "resize",
            Self::Delete { .. } => "delete",
            Self::AddText { .. } => "add_text",
            Self::AddDecoration { .. } => "add_decoration",
            Self::UpdateImage { .. } => "update_image",
            Self::UpdateText { .. } => "update_text",
            Self::UpdateDecoration { .. } => "update_decoration",
            Self::SetBackground { .. } => "set_background",
            Self::SetStoryText { .. } => "set_story_text",
            Self::SetAnimalName { .. } => "set_animal_name",
            Self::SetAnimalSince { .. } => "set_animal_since",
            Self::SetFormat { .. } => "set_format",
            Self::SetLayout { .. } => "set_layout",
            Self::SetCategory { .. } => "set_category",
            Self::AddSlide { .. } => "add_slide",
            Self::DeleteSlide { .. } => "delete_slide",
            Self::SetActiveSlide { .. } => "set_active_slide",
            Self::SetDarkMode { .. } => "set_dark_mode",
        }
    }
}

/// Result of applying a [`Command`]. Commands never fail the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// Nothing to do; state is identical.
    Unchanged,
    /// A constraint (minimum size) rejected the change; state is untouched.
    Rejected(String),
    /// The command was not applicable (unknown target, last slide, bad index).
    Refused(String),
}

impl Outcome {
    /// `true` for [`Outcome::Applied`].
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Something the UI should surface to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// An uploaded file could not be decoded and was not placed.
    DecodeFailed {
        /// File name.
        name: String,
        /// Decoder message.
        reason: String,
    },
    /// A file was turned away at the upload boundary.
    UploadRejected(UploadRejection),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeFailed { name, reason } => write!(f, "could not load '{name}': {reason}"),
            Self::UploadRejected(r) => write!(f, "upload rejected: {r}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/command.rs"]
mod tests;
