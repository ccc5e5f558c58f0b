//! Pure domain logic for the video-manual authoring platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API, and any future CLI tooling. Everything here is
//! side-effect free except [`probe`], which shells out to ffprobe.

pub mod access;
pub mod credentials;
pub mod element;
pub mod error;
pub mod media;
pub mod probe;
pub mod roles;
pub mod status;
pub mod timeline;
pub mod types;
