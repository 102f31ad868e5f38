mod app;
use lingo_flashcards::*;

use app::MyApp;
use config::AppConfig;
use database::SqliteRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingo_flashcards=info,flashcards=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load();

    let repository = match SqliteRepository::open(&config.database_path) {
        Ok(repository) => repository,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    let store = CardStore::open(Box::new(repository));

    tracing::info!(
        "Loaded {} cards in {} languages",
        store.cards().len(),
        store.source_languages().len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Language Flashcards",
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new(store, config)))),
    )
}
