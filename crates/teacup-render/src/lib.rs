//! Teacup Render Library
//!
//! Concrete backends for the Teacup engine. [`SoftwareBackend`] draws into
//! in-memory framebuffers; with the `native` feature, [`NativeBackend`] shows
//! those frames in real windows.

pub mod canvas;
mod software;
mod text;

#[cfg(feature = "native")]
mod native;

pub use canvas::Canvas;
pub use software::{ExportError, SoftwareBackend};
pub use text::FontCache;

#[cfg(feature = "native")]
pub use native::NativeBackend;
