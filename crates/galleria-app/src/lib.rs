//! The `galleria` application: builds a gallery from an item manifest and
//! runs a scripted, headless tour through it on a fixed-timestep loop.

pub mod gallery;
pub mod manifest;
pub mod pacing;
pub mod probe;
pub mod settings;
pub mod sink;
pub mod tour;
