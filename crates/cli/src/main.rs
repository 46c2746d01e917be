mod commands;
mod config;
mod error;
mod render;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(std::io::stderr)
        .init();

    commands::run(config, command).await
}
