//! Entry point of a standalone window's child process.

use anyhow::Result;
use std::path::Path;
use teacup_core::{Color, Engine, EngineConfig, StyleOverrides, WindowData, WindowId};
use teacup_render::NativeBackend;

pub const BACKGROUND: Color = Color::rgb(30, 30, 30);
pub const FPS: u32 = 60;

/// Open the window described by `payload` and keep it up until it is closed.
pub fn run(payload: Option<&str>, config: EngineConfig) -> Result<()> {
    let data = WindowData::from_arg(payload)?;

    let mut engine = Engine::with_config(NativeBackend::new()?, config);
    let window = engine.create_window(
        &data.title,
        data.pixel_size(),
        &StyleOverrides::new().background_color(BACKGROUND),
    )?;
    set_icon(engine.backend_mut(), window, &data.icon);

    while engine.running() {
        engine.step(FPS);
    }
    engine.done();
    Ok(())
}

fn set_icon(backend: &mut NativeBackend, window: WindowId, path: &Path) {
    let icon = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(e) => {
            log::warn!("Could not load icon {}: {}", path.display(), e);
            return;
        }
    };
    let (width, height) = icon.dimensions();
    if let Err(e) = backend.set_window_icon(window, icon.into_raw(), width, height) {
        log::warn!("Could not set icon {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teacup_core::WindowDataError;

    #[test]
    fn test_corrupt_payload_fails_before_opening() {
        let err = run(Some("%%% not a payload"), EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WindowDataError>(),
            Some(WindowDataError::Decode(_))
        ));
    }
}
