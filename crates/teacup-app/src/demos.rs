//! Demo scenes.
//!
//! Each scene is set up on an [`Engine`] so it can be driven by any backend;
//! `main` runs them on the native one.

use rand::Rng;
use teacup_core::{
    Backend, BackendError, Color, Ellipse, Engine, EngineError, EngineResult, Rectangle,
    SceneObject, ScreenObject, StyleOverrides, Text, WindowId,
};

const DARK: Color = Color::rgb(30, 30, 30);

/// Frame until every window is closed.
pub fn run<B: Backend>(engine: &mut Engine<B>, mut update: impl FnMut(&mut Engine<B>, f64)) {
    let mut dt = 0.0;
    while engine.running() {
        update(engine, dt);
        dt = engine.run_frame().as_secs_f64();
    }
}

/// Three overlapping rectangles on a dark background.
pub fn rectangles<B: Backend>(engine: &mut Engine<B>) -> EngineResult<WindowId> {
    let window = engine.create_window(
        "Rectangles",
        (400, 400),
        &StyleOverrides::new().background_color(DARK),
    )?;

    let rects = [
        (50.0, Color::rgb(50, 120, 255)),
        (100.0, Color::rgb(255, 60, 60)),
        (150.0, Color::rgb(255, 210, 60)),
    ];
    for (offset, color) in rects {
        engine.attach(
            window,
            Rectangle::new(offset, offset, 150.0, 100.0)
                .with_style(&StyleOverrides::new().background_color(color)),
        )?;
    }
    Ok(window)
}

#[derive(Debug, Clone, Copy)]
struct Ball {
    index: usize,
    xvel: f64,
    yvel: f64,
}

/// Balls falling under gravity and bouncing off the window edges.
#[derive(Debug)]
pub struct BouncingBalls {
    window: WindowId,
    width: f64,
    height: f64,
    balls: Vec<Ball>,
}

impl BouncingBalls {
    pub const BALL_RADIUS: f64 = 10.0;
    pub const TOTAL_BALLS: usize = 20;
    pub const GRAVITY: f64 = 1.0;
    pub const SIZE: (u32, u32) = (500, 500);

    pub fn setup<B: Backend>(engine: &mut Engine<B>, rng: &mut impl Rng) -> EngineResult<Self> {
        let (width, height) = Self::SIZE;
        let window = engine.create_window(
            "Bouncing Balls",
            Self::SIZE,
            &StyleOverrides::new().background_color(DARK),
        )?;

        let diameter = Self::BALL_RADIUS * 2.0;
        let mut balls = Vec::with_capacity(Self::TOTAL_BALLS);
        for _ in 0..Self::TOTAL_BALLS {
            let mut ball = Ellipse::new(
                rng.random_range(0..=(width - diameter as u32)) as f64,
                rng.random_range(0..=(height - diameter as u32)) as f64,
                diameter,
                diameter,
            );
            ball.style_mut().background_color =
                Color::rgb(rng.random(), rng.random(), rng.random());

            let index = engine.attach(window, ball)?;
            balls.push(Ball {
                index,
                xvel: f64::from(rng.random_range(-5i32..=5)),
                yvel: f64::from(rng.random_range(-5i32..=5)),
            });
        }

        Ok(Self {
            window,
            width: f64::from(width),
            height: f64::from(height),
            balls,
        })
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Advance every ball by one frame.
    pub fn update<B: Backend>(&mut self, engine: &mut Engine<B>) {
        let Some(window) = engine.window_mut(self.window) else {
            return;
        };
        for ball in &mut self.balls {
            let Some(shape) = window
                .child_mut(ball.index)
                .and_then(SceneObject::as_ellipse_mut)
            else {
                continue;
            };

            ball.yvel += Self::GRAVITY;
            shape.x += ball.xvel;
            shape.y += ball.yvel;

            if shape.y + shape.height >= self.height {
                shape.y = self.height - shape.height;
                ball.yvel = -ball.yvel - 1.0;
            } else if shape.y < 0.0 {
                shape.y = 0.0;
                ball.yvel = -(ball.yvel + 1.0);
            }

            if shape.x < 0.0 {
                shape.x = 0.0;
                ball.xvel = -ball.xvel;
            } else if shape.x + shape.width > self.width {
                shape.x = self.width - shape.width;
                ball.xvel = -ball.xvel;
            }
        }
    }
}

/// HSV (all in `0.0..=1.0`) to RGB channels in `0.0..=1.0`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Two windows cycling through the hue wheel: one by background, one by
/// text color.
#[derive(Debug)]
pub struct Rainbow {
    background_window: WindowId,
    text_window: WindowId,
    text_index: usize,
    hue: f64,
}

impl Rainbow {
    /// Degrees of hue per second.
    pub const SPEED: f64 = 90.0;

    pub fn setup<B: Backend>(engine: &mut Engine<B>) -> EngineResult<Self> {
        let background_window =
            engine.create_window("Rainbow Window", (500, 500), &StyleOverrides::new())?;
        let text_window = engine.create_window(
            "Rainbow Text",
            (500, 500),
            &StyleOverrides::new().background_color(Color::WHITE),
        )?;

        let text_style = StyleOverrides::new()
            .font_family("Inter")
            .font_size(24)
            .color(Color::WHITE);
        engine.attach(
            background_window,
            Text::new(100.0, 100.0, "This is a rainbow window!").with_style(&text_style),
        )?;
        let text_index = engine.attach(
            text_window,
            Text::new(100.0, 100.0, "This is rainbow text!").with_style(&text_style),
        )?;

        Ok(Self {
            background_window,
            text_window,
            text_index,
            hue: 0.0,
        })
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Move the hue on by `dt` seconds and recolor both windows.
    pub fn update<B: Backend>(&mut self, engine: &mut Engine<B>, dt: f64) {
        self.hue = (self.hue + dt * Self::SPEED).rem_euclid(360.0);
        let (r, g, b) = hsv_to_rgb(self.hue / 360.0, 1.0, 1.0);
        let color = Color::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);

        if let Some(window) = engine.window_mut(self.background_window) {
            window.style_mut().background_color = color;
        }
        if let Some(text) = engine
            .window_mut(self.text_window)
            .and_then(|window| window.child_mut(self.text_index))
        {
            text.style_mut().color = color;
        }
    }
}

/// What to do about a font the scene could not load, if that is the error.
pub fn font_hint(error: &EngineError) -> Option<String> {
    match error {
        EngineError::UnknownFont(name) => Some(format!(
            "register '{}' under \"fonts\" in a --config file",
            name
        )),
        EngineError::Backend(BackendError::Font(_)) => Some(
            "set \"font_dir\" in a --config file to a directory holding the font files"
                .to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use teacup_core::backend::Call;
    use teacup_core::{HeadlessBackend, Rect};

    fn engine() -> Engine<HeadlessBackend> {
        Engine::init(HeadlessBackend::new())
    }

    #[test]
    fn test_rectangles_draw_in_order() {
        let mut engine = engine();
        let window = rectangles(&mut engine).unwrap();
        let renderer = engine.window(window).unwrap().renderer().unwrap();

        engine.step(0);

        assert_eq!(
            engine.backend().filled_rects(renderer),
            vec![
                (Color::rgb(50, 120, 255), Rect::new(50, 50, 150, 100)),
                (Color::rgb(255, 60, 60), Rect::new(100, 100, 150, 100)),
                (Color::rgb(255, 210, 60), Rect::new(150, 150, 150, 100)),
            ]
        );
    }

    #[test]
    fn test_balls_stay_inside_window() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = BouncingBalls::setup(&mut engine, &mut rng).unwrap();

        for _ in 0..500 {
            scene.update(&mut engine);
        }

        let window = engine.window(scene.window()).unwrap();
        assert_eq!(window.children().len(), BouncingBalls::TOTAL_BALLS);
        for child in window.children() {
            let ball = child.as_ellipse().unwrap();
            assert!(ball.x >= 0.0 && ball.x + ball.width <= 500.0);
            assert!(ball.y >= 0.0 && ball.y + ball.height <= 500.0);
        }
    }

    #[test]
    fn test_balls_draw_spans() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(1);
        let scene = BouncingBalls::setup(&mut engine, &mut rng).unwrap();
        let renderer = engine.window(scene.window()).unwrap().renderer().unwrap();

        engine.step(0);

        let per_ball = teacup_core::raster::ellipse::spans(0, 0, 20, 20).len();
        assert_eq!(
            engine.backend().lines(renderer).len(),
            BouncingBalls::TOTAL_BALLS * per_ball
        );
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).1, 1.0);
        assert_eq!(hsv_to_rgb(0.5, 0.0, 0.25), (0.25, 0.25, 0.25));
        let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn test_rainbow_recolors_and_rebakes() {
        let mut engine = engine();
        let mut scene = Rainbow::setup(&mut engine).unwrap();
        engine.step(0);
        let baked = engine
            .backend()
            .count(|c| matches!(c, Call::RenderText { .. }));

        // A third of the way round: pure green.
        scene.update(&mut engine, 120.0 / Rainbow::SPEED);
        engine.step(0);

        assert!((scene.hue() - 120.0).abs() < 1e-9);
        let background = engine.window(scene.background_window).unwrap();
        assert_eq!(background.style().background_color, Color::rgb(0, 255, 0));
        assert_eq!(
            engine
                .backend()
                .count(|c| matches!(c, Call::RenderText { .. })),
            baked + 1
        );
    }

    #[test]
    fn test_font_hints() {
        let missing_file = EngineError::Backend(BackendError::Font(
            "assets/Inter_24pt-Regular.ttf: not found".to_string(),
        ));
        assert!(font_hint(&missing_file).unwrap().contains("font_dir"));

        let unknown = EngineError::UnknownFont("Comic".to_string());
        assert!(font_hint(&unknown).unwrap().contains("'Comic'"));

        assert!(font_hint(&EngineError::UnknownWindow(WindowId(1))).is_none());
    }

    #[test]
    fn test_rainbow_without_fonts_gets_hint() {
        let mut engine = Engine::init(HeadlessBackend::new());
        *engine.fonts_mut() = teacup_core::FontRegistry::empty();

        let err = Rainbow::setup(&mut engine).unwrap_err();
        assert!(font_hint(&err).is_some());
    }

    #[test]
    fn test_run_stops_when_windows_close() {
        let mut engine = engine();
        rectangles(&mut engine).unwrap();
        let mut frames = 0;

        run(&mut engine, |engine, _dt| {
            frames += 1;
            if frames == 3 {
                engine.backend_mut().push_event(teacup_core::Event::Quit);
            }
        });

        assert_eq!(frames, 3);
        assert!(!engine.running());
    }
}
