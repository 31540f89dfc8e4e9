use std::sync::Arc;

use tokio::sync::Notify;

mod browser;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use error::Error;

fn main() {
    if let Err(e) = run() {
        logger::log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let cfg = config::Config::load()?;
    let state = Arc::new(config::AppState::new(cfg)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(state))
}

async fn serve(state: Arc<config::AppState>) -> Result<(), Error> {
    let (listener, addr) = server::bind_with_fallback(&state.config.server)?;

    logger::log_server_start(&addr, &state.root, &state.config);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    if state.config.browser.open {
        browser::launch_after_delay(addr, state.config.browser.landing_page.clone());
    }

    server::run_accept_loop(listener, state, shutdown).await;
    Ok(())
}
