//! CSV Data Dashboard - Main Entry Point
//!
//! Loads settings, starts the dashboard host thread and opens the window.

use datadash_rs::{
    archive::{FileArchive, SystemClock},
    binding::default_graph,
    config::{self, DashboardConfig, UiSessionState},
    data::{source_from_location, DatasetStore},
    frontend::{initial_window_size, DashboardApp},
    host::{DashboardHost, HostBridge},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(config: &DashboardConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let (file_layer, guard) = match config::app_data_dir().filter(|_| config.logging.file_logging)
    {
        Some(dir) => {
            let appender =
                tracing_appender::rolling::daily(dir.join(config::LOGS_DIR), "datadash.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    // Settings are read before logging starts so the filter can come from them
    let config = DashboardConfig::load_or_default();
    let _log_guard = init_logging(&config);

    tracing::info!("Starting CSV Data Dashboard");

    let session = UiSessionState::load();

    let store = DatasetStore::new(source_from_location(
        &config.default_source,
        config.fetch_timeout(),
    ));

    let archive = match config
        .resolved_archive_dir()
        .and_then(|dir| FileArchive::open(dir, Box::new(SystemClock)))
    {
        Ok(archive) => archive,
        Err(e) => {
            tracing::error!("Failed to open upload archive: {}", e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    tracing::info!("Archiving uploads in {:?}", archive.root());

    let graph = match default_graph() {
        Ok(graph) => graph,
        Err(e) => {
            tracing::error!("Invalid binding graph: {}", e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    // Create the host bridge and spawn the host thread
    let (bridge, cmd_rx, msg_tx) = HostBridge::new();
    let host = DashboardHost::new(store, archive, graph, config.chart.clone(), cmd_rx, msg_tx);
    let host_handle = match host.spawn() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to spawn dashboard host: {}", e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(initial_window_size(&session))
            .with_min_inner_size([640.0, 480.0])
            .with_maximized(session.window.maximized)
            .with_title("Data Dashboard")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Data Dashboard",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, bridge, config, session)))),
    );

    // The app sends Shutdown on exit; wait for the host to finish its event
    tracing::info!("Shutting down...");
    if host_handle.join().is_err() {
        tracing::error!("Dashboard host panicked");
    }

    result
}
