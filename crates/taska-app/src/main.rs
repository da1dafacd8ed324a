use taska_app::seeder::Seeder;
use taska_app::seeder::catalog::CatalogSeeder;
use taska_app::seeder::plan::PlanSeeder;
use taska_app::session::ConfiguredUser;
use taska_core::clock::{Clock, SystemClock};
use taska_core::config::load_config;
use taska_db::db::memory::MemoryStore;
use taska_service::auth::Caller;
use taska_service::task::service::week_bounds;
use taska_service::task::{TaskFilter, TaskService};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::info!("Starting Taska");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = MemoryStore::new();
    let clock = SystemClock;

    CatalogSeeder::new(config.app.roles.clone(), config.app.shifts.clone()).seed(&store)?;

    if let Some(path) = config.app.plan_path.clone() {
        PlanSeeder::new(path, &clock).seed(&store)?;
    } else {
        tracing::info!("No plan configured, starting empty");
    }

    let role = config
        .app
        .current_role
        .clone()
        .unwrap_or_else(|| config.app.privileged_role.clone());
    let user = ConfiguredUser::new(&store, role, config.app.privileged_role.clone());
    let caller = Caller::resolve(&user)?;

    let (monday, sunday) = week_bounds(clock.today());
    let filter = TaskFilter {
        start_date: Some(monday),
        end_date: Some(sunday),
        ..TaskFilter::default()
    };
    let week = TaskService::new(&store, &clock).search(&filter, &caller)?;
    tracing::info!(tasks = week.len(), %monday, %sunday, "Current week");

    println!("{}", serde_json::to_string_pretty(&week)?);

    Ok(())
}
