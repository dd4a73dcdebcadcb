use gridcaster::config::Config;
use gridcaster::input::{Action, InputEvent};
use gridcaster::input_log::InputLog;
use gridcaster::render::RenderContext;
use log::{debug, error, info};
use macroquad::prelude::*;

/// Key bindings for the four movement actions
const BINDINGS: [(KeyCode, Action); 4] = [
    (KeyCode::W, Action::MoveForward),
    (KeyCode::S, Action::MoveBackward),
    (KeyCode::A, Action::TurnLeft),
    (KeyCode::D, Action::TurnRight),
];

/// Collect press/release events for bound keys since the last frame
fn poll_input_events() -> Vec<InputEvent> {
    let mut events = Vec::new();
    for (key, action) in BINDINGS {
        if is_key_pressed(key) {
            events.push(InputEvent::press(action));
        }
        if is_key_released(key) {
            events.push(InputEvent::release(action));
        }
    }
    events
}

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

async fn run(config: Config) {
    let grid = match config.load_grid() {
        Ok(grid) => grid,
        Err(e) => {
            error!("Failed to load map: {}", e);
            return;
        }
    };

    let mut player = config.spawn_player(&grid);
    let view = config.build_view();
    let mut ctx = RenderContext::new(&config);
    let mut input_log = config.logging.enable_input_log.then(InputLog::new);

    info!(
        "Casting {} columns with the {} strategy",
        view.columns(),
        view.caster_name()
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        for event in poll_input_events() {
            player.handle(event);
            if let Some(log) = input_log.as_mut() {
                log.record(event);
            }
        }

        if player.tick() {
            debug!(
                "Pose ({:.1}, {:.1}) heading {:.3}",
                player.pose.position.x, player.pose.position.y, player.pose.heading
            );
        }

        ctx.render_frame(&grid, &player, &view);

        next_frame().await
    }

    if let Some(log) = input_log {
        info!("{}", log.summary());
        match log.save_to_file(&config.logging.input_log_path) {
            Ok(()) => info!("Input log saved to {}", config.logging.input_log_path),
            Err(e) => error!("Failed to save input log: {}", e),
        }
    }
}

fn main() {
    let (config, source) = Config::load();
    config.logging.init();
    source.log();
    info!(
        "Window {}x{}, {:?} caster, {:?} column mapping",
        config.window.width, config.window.height, config.caster.strategy, config.caster.column_mapping
    );

    let conf = window_conf(&config);
    macroquad::Window::from_config(conf, run(config));
}
