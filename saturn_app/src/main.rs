//! Saturn scene viewer
//!
//! Fly around Saturn with WASD/QE and the mouse. F1 opens the debug
//! overlay in the title bar, Escape quits.

mod scene_setup;

use scene_engine::config::Config;
use scene_engine::core::ApplicationConfig;
use scene_engine::foundation::logging;
use scene_engine::render::backends::GlBackend;
use scene_engine::render::window::GlfwWindow;
use scene_engine::ui::TitleBarOverlay;
use scene_engine::{Engine, EngineError};

use std::path::Path;

use scene_setup::SaturnScene;

const CONFIG_PATH: &str = "config/saturn.toml";

fn run(config: ApplicationConfig) -> Result<(), EngineError> {
    log::info!("Creating window...");
    let mut window = GlfwWindow::new(&config.window)?;

    log::info!("Loading OpenGL context...");
    let backend = GlBackend::new(&mut window)?;

    let overlay = TitleBarOverlay::new(config.window.title.clone());
    let mut engine = Engine::new(window, backend, overlay, &mut SaturnScene, config)?;
    engine.run()
}

fn main() {
    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    let config_found = Path::new(CONFIG_PATH).exists();
    let config = match ApplicationConfig::load_or_default(CONFIG_PATH)
        .and_then(|config| config.validate().map(|()| config))
    {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("Invalid configuration in {}: {}", CONFIG_PATH, e);
            std::process::exit(-1);
        }
    };
    logging::init(&config.logging.level);
    if !config_found {
        log::warn!("No config file at {}, running with defaults", CONFIG_PATH);
    }

    log::info!("Starting Saturn scene");
    if let Err(e) = run(config) {
        log::error!("Fatal: {}", e);
        std::process::exit(-1);
    }
    log::info!("Saturn scene finished");
}
