//! CLI command implementations

use std::io;

use crate::client::{run_shell, App, HttpRecordApi};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::storage;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Run a CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            host,
            port,
            store,
            cors_origins,
        } => serve(HttpServerConfig {
            host,
            port,
            store_uri: store,
            cors_origins,
        }),
        Command::Client { url } => client(&url),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("failed to start async runtime: {}", e)))
}

/// Open the storage engine and serve the record API until Ctrl-C.
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    let store = storage::open(&config.store_uri)?;
    tracing::info!(store = %config.store_uri, records = store.count()?, "storage engine ready");

    let server = HttpServer::with_config(config, store);
    runtime()?.block_on(server.start()).map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Run the interactive client against the server at `url`.
pub fn client(url: &str) -> CliResult<()> {
    let api = HttpRecordApi::new(url)?;
    tracing::debug!(url = api.records_url(), "client starting");

    let mut app = App::new(api);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout();

    runtime()?.block_on(run_shell(&mut app, stdin, &mut stdout))?;
    Ok(())
}
