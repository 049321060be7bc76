use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod events;
mod handler;
mod http;
mod logger;
mod server;

use config::{AppState, Config};
use events::ChannelDispatcher;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let dispatcher = Arc::new(ChannelDispatcher::new());
    events::spawn_event_logger(&dispatcher);

    let state = Arc::new(AppState::new(cfg, dispatcher));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signal_handler = Arc::new(server::signal::SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signal_handler));

    logger::log_server_start(&addr, &state.config);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            active_connections,
            Arc::clone(&signal_handler.shutdown),
        ))
        .await
}
