use clap::Parser;
use todo_core::TodoStore;
use todo_server::{config::Config, telemetry, ServerError};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();
    telemetry::init(config.log_format)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, "listening");

    todo_server::run(listener, TodoStore::new()).await?;
    Ok(())
}
