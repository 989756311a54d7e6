//! Channel presentation surface: text rendering and argument helpers for the
//! `channel` binary. The core lives in `channel_lib`.

pub mod media;
pub mod render;
pub mod tree;
