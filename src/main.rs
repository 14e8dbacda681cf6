use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shelf_app::{cli::Cli, modules};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use shelf_store::{JsonFileStore, SharedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load(cli.config_dir.clone()).with_context(|| "failed to load shelf settings")?;
    cli.apply(&mut settings);

    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        store = %settings.store.path.display(),
        "shelf bootstrap starting"
    );

    let store: SharedStore = Arc::new(JsonFileStore::new(&settings.store.path));

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("shelf bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings).await;
    registry.stop_all().await?;
    served
}
