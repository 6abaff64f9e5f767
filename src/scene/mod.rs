//! Typed element model: images, text labels, decorations, slides and the project aggregate.

pub(crate) mod model;
pub(crate) mod slide;
