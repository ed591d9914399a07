//! Command-line interface for kafka-to-sqs
//!
//! ```bash
//! RUST_LOG=info kafka-to-sqs \
//!   --brokers kafka:9092 \
//!   --topic orders \
//!   --consumer-group orders-to-sqs \
//!   --sqs-url http://localhost:4566/000000000000/orders \
//!   --sqs-endpoint-url http://localhost:4566
//! ```

use clap::Parser;
use kafka_to_sqs::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    kafka_to_sqs::run(config).await
}
