mod config;

use std::sync::Arc;

use anyhow::Context;
use binance_ai::ToolSet;
use binance_market_data::BinanceProvider;
use clap::{Parser, Subcommand};
use config::{Config, LogFormat};
use serde_json::Value;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "binance-cli", about = "Binance public market data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every tool definition with its JSON argument schema
    List,
    /// Invoke one tool and print its output
    Call {
        /// Tool name, e.g. get_price
        tool: String,
        /// JSON object with the tool arguments (defaults to {})
        args: Option<String>,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries tool output only.
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let provider = BinanceProvider::new(config.client.clone());
    let tools = ToolSet::new(Arc::new(provider));

    match cli.command {
        Commands::List => {
            for definition in tools.definitions() {
                println!("{}", definition.name);
                println!("  {}", definition.description);
                println!("{}", serde_json::to_string_pretty(&definition.parameters)?);
                println!();
            }
        }
        Commands::Call { tool, args } => {
            let args: Value = match args.as_deref() {
                Some(raw) => serde_json::from_str(raw).context("tool arguments must be valid JSON")?,
                None => Value::Object(Default::default()),
            };
            tracing::info!("Calling {} against {}", tool, config.client.base_url);
            println!("{}", tools.dispatch(&tool, args).await);
        }
    }

    Ok(())
}
