mod app;
mod application;
mod config;
mod domain;
mod logging;
mod ui;
mod utils;

use config::ImporterConfig;
use iced::window;

fn main() -> iced::Result {
    logging::init_tracing();

    let config = ImporterConfig::load_or_default(&ImporterConfig::default_path());
    tracing::info!("Starting WPCup");

    iced::application(
        move || app::ImportApp::new(config.clone()),
        app::update,
        app::view,
    )
    .title("WPCup - WordPress Content Importer")
    .window(window::Settings {
        size: iced::Size::new(560.0, 620.0),
        ..Default::default()
    })
    .run()
}
