//! Compositor and rasterizer: slide → layered draw list → RGBA frame.

pub(crate) mod backend;
pub(crate) mod compose;
pub(crate) mod cpu;
pub(crate) mod draw_list;
pub(crate) mod ornament;
pub(crate) mod text;
pub(crate) mod viewport;
