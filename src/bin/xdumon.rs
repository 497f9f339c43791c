use log::*;

use xdumon::config::Config;
use xdumon::display_manager::DisplayManager;
use xdumon::event::Event;
use xdumon::wm::WindowManager;

/// Configure file logging.
fn setup_logger() {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xdumon").unwrap();

    let mut log_path = xdg_dirs.get_cache_home();
    log_path.push("logs");

    if !log_path.exists() {
        std::fs::create_dir_all(&log_path).unwrap();
    }

    // Log file with current timestamp.
    log_path.push(
        &format!(
            "{}.log",
            chrono::Local::now().format("xdumon-%Y-%m-%d-%H:%M:%S")
        )[..],
    );

    #[cfg(debug_assertions)]
    let current_log_level = log::LevelFilter::Debug;

    #[cfg(not(debug_assertions))]
    let current_log_level = log::LevelFilter::Info;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(current_log_level)
        .chain(fern::log_file(log_path).unwrap())
        .apply()
        .unwrap();
}

/// Load the user configuration, falling back to the defaults.
fn load_config() -> Config {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xdumon").unwrap();

    match xdg_dirs.find_config_file("config.json") {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Bad configuration ({}), using defaults", e);
                Config::default()
            }
        },
        None => Config::default(),
    }
}

fn main() {
    setup_logger();

    let config = load_config();

    let mut display = match DisplayManager::open() {
        Ok(display) => display,
        Err(e) => {
            error!("{}", e);
            std::process::exit(-1);
        }
    };
    display.init(&config);

    // Adopt windows that were mapped before we started.
    let existing = display.existing_windows();

    let mut wm = WindowManager::new(display, config);
    for window in existing {
        wm.handle_event(Event::WindowMapped(window));
    }

    info!("Initialized.");
    wm.run()
}
