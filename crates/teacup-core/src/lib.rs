//! Teacup Core Library
//!
//! Backend-agnostic core of the Teacup 2D engine: styles, scene objects,
//! shape rasterizers, windows, the window registry and the frame loop.

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod launch;
pub mod objects;
pub mod pipeline;
pub mod raster;
pub mod registry;
pub mod style;
pub mod window;

pub use backend::{
    Backend, BackendError, BackendResult, Event, HeadlessBackend, Rect, RendererId, TextTexture,
    TextureId, WindowId,
};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use font::{FontFace, FontRegistry};
pub use launch::{WindowData, WindowDataError};
pub use objects::{Ellipse, Rectangle, SceneObject, ScreenObject, Text};
pub use pipeline::{DrawCommand, Pipeline, ShapeKind};
pub use raster::RenderTarget;
pub use registry::Registry;
pub use style::{Color, Style, StyleOverrides, apply_style};
pub use window::Window;
