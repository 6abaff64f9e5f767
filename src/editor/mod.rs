//! Editing state: commands, the session reducer, transform gestures and placement policy.

pub(crate) mod command;
pub(crate) mod gesture;
pub(crate) mod layout;
pub(crate) mod session;
