mod audio;
mod cli;
mod engine;
mod raster;
mod renderer;
mod ui;
mod utils;

use anyhow::Context;
use audio::{AudioInput, SourcePipe};
use clap::Parser;
use cli::Args;
use engine::{Engine, FrameOutput};
use env_logger::Env;
use nannou::prelude::*;
use ui::bindings::{parse_key, Action};
use utils::Config;

/// Window settings
struct Resolution {
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl Resolution {
    fn current(windowed: bool) -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: !windowed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    if args.list_devices {
        let devices = SourcePipe::list_devices().context("listing audio devices")?;
        println!("\n=== Audio Devices ===");
        for (idx, (name, is_input)) in devices.iter().enumerate() {
            let kind = if *is_input { "input" } else { "output" };
            println!("  [{}] {} ({})", idx, name, kind);
        }
        return Ok(());
    }

    nannou::app(model).update(update).run();
    Ok(())
}

struct Model {
    engine: Engine,
    config: Config,
    input: Option<AudioInput>,
    /// Output of the latest tick, `None` when the tick was skipped
    output: Option<FrameOutput>,
    /// Last audio start failure, shown on the idle screen
    start_error: Option<String>,
}

fn model(app: &App) -> Model {
    let args = Args::parse();
    let resolution = Resolution::current(args.windowed);
    app.set_exit_on_escape(false);

    let mut win = app
        .new_window()
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .size(resolution.width, resolution.height)
        .min_size(400, 400);

    if resolution.fullscreen {
        win = win.fullscreen();
    }

    win.build().unwrap();

    let config = Config::load();
    let mut engine = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            Engine::seeded(config.engine(), seed)
        }
        None => Engine::new(config.engine()),
    };
    engine.set_mode(args.initial_mode());

    Model {
        engine,
        config,
        input: None,
        output: None,
        start_error: None,
    }
}

/// Opens audio and starts the engine; failures leave it idle for a retry
fn start(model: &mut Model) {
    if model.engine.is_running() {
        return;
    }
    match AudioInput::open(&mut model.config) {
        Ok(input) => {
            model.input = Some(input);
            model.start_error = None;
            model.engine.start();
        }
        Err(e) => {
            log::error!("Could not start audio: {}", e);
            model.start_error = Some(e.to_string());
        }
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let Some(input) = model.input.as_mut() else {
        model.output = None;
        return;
    };
    model.output = model
        .engine
        .tick(input, app.mouse.position(), app.window_rect());

    // The engine drops back to idle when the stream dies; release it so a start reopens audio
    if !model.engine.is_running() {
        model.input = None;
        model.start_error = Some("audio stream stopped".to_string());
    }
}

/// What the next frame paints
#[derive(Debug, PartialEq)]
enum Screen<'a> {
    Idle(Option<&'a str>),
    Frame(&'a FrameOutput),
    /// Skipped tick: the previous frame, overlay included, stays untouched
    Hold,
}

impl Model {
    fn screen(&self) -> Screen<'_> {
        if !self.engine.is_running() {
            return Screen::Idle(self.start_error.as_deref());
        }
        match &self.output {
            Some(output) => Screen::Frame(output),
            None => Screen::Hold,
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let bounds = app.window_rect();

    if frame.nth() == 0 || !model.engine.is_running() {
        draw.background().color(BLACK);
    }

    match model.screen() {
        Screen::Idle(error) => ui::overlay::draw_idle(&draw, bounds, error),
        Screen::Frame(output) => {
            raster::draw_frame(&draw, bounds, output);
            ui::overlay::draw_status(&draw, bounds, output.mode_name, output.scheme_name);
        }
        Screen::Hold => {}
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to render frame: {:?}", e);
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match parse_key(key, model.engine.is_running()) {
        Some(Action::Quit) => app.quit(),
        Some(Action::Start) => start(model),
        Some(Action::Engine(command)) => model.engine.apply(command),
        None => {} // Unhandled key
    }
}

fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        start(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use pulse_viz_api::{AudioFrame, AudioSource};

    struct OneFrame(Option<AudioFrame>);

    impl AudioSource for OneFrame {
        fn latest_frame(&mut self) -> Option<AudioFrame> {
            self.0.take()
        }
    }

    fn idle_model() -> Model {
        Model {
            engine: Engine::seeded(EngineConfig::default(), 1),
            config: Config::default(),
            input: None,
            output: None,
            start_error: None,
        }
    }

    #[test]
    fn test_idle_screen_shows_error() {
        let mut model = idle_model();
        assert_eq!(model.screen(), Screen::Idle(None));
        model.start_error = Some("no devices".to_string());
        assert_eq!(model.screen(), Screen::Idle(Some("no devices")));
    }

    #[test]
    fn test_skipped_tick_holds_previous_frame() {
        let mut model = idle_model();
        model.engine.start();
        let bounds = Rect::from_w_h(800.0, 600.0);
        let mut source = OneFrame(Some(AudioFrame::silent()));

        model.output = model.engine.tick(&mut source, Vec2::ZERO, bounds);
        assert!(matches!(model.screen(), Screen::Frame(_)));

        // Nothing new to draw, so no overlay is painted over the held frame
        model.output = model.engine.tick(&mut source, Vec2::ZERO, bounds);
        assert_eq!(model.screen(), Screen::Hold);
    }
}
