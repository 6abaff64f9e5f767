//! Pure geometry for placing, fitting and constraining elements. No state lives here.

pub(crate) mod fit;
pub(crate) mod placement;
