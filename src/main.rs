mod app;
mod draw;

use ggez::{event, GameError, GameResult};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use snake_arcade::config::{GameConfig, CONFIG_FILE};

use crate::app::App;

fn main() -> GameResult {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .map_err(|e| GameError::CustomError(format!("failed to initialize logger: {}", e)))?;

    info!("Starting Snake");

    let (config, from_file) =
        GameConfig::load_or_default(CONFIG_FILE).map_err(|e| GameError::ConfigError(e.to_string()))?;
    if from_file {
        info!("loaded settings from {}", CONFIG_FILE);
    } else {
        info!("no {} found, using default settings", CONFIG_FILE);
    }

    let resource_dir = std::path::PathBuf::from("./resources");
    let window_setup = ggez::conf::WindowSetup::default()
        .title("Snake Game")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(
            config.board_width(),
            config.board_height() + config.stats_height,
        )
        .resizable(false);

    let (mut ctx, event_loop) = ggez::ContextBuilder::new("snake_arcade", "snake_arcade")
        .add_resource_path(resource_dir)
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = App::new(&mut ctx, config);
    event::run(ctx, event_loop, app)
}
