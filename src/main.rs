//! Main entry point for Code Converter CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use code_converter::cli::commands::{self, Commands};
use code_converter::{CodeConverter, ConverterConfig};

/// Code Converter - convert code between C, Java and Python with an LLM
#[derive(Parser, Debug)]
#[command(name = "code-converter", version, about, long_about = None)]
struct Args {
    /// API key for Groq (optional, defaults to GROQ_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Configuration file (JSON or YAML); environment is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the model identifier
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Args {
    /// Resolve configuration: file or environment, then CLI overrides
    fn load_config(&self) -> anyhow::Result<ConverterConfig> {
        let mut config = match (&self.config, &self.api_key) {
            (Some(path), _) => ConverterConfig::from_file(path)?,
            (None, Some(api_key)) => ConverterConfig::from_env_with_key(api_key.clone())?,
            (None, None) => ConverterConfig::from_env()?,
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }

        if let Some(model) = &self.model {
            config.model = model.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "code_converter=debug,info"
    } else {
        "code_converter=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    match args.command {
        Some(Commands::Convert {
            from,
            to,
            ref file,
            ref output,
        }) => {
            let converter = CodeConverter::from_config(&args.load_config()?)?;
            commands::handle_convert(converter, from, to, file.clone(), output.clone()).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages();
        }
        Some(Commands::Server { ref host, port }) => {
            let converter = CodeConverter::from_config(&args.load_config()?)?;
            commands::handle_server(converter, host.clone(), port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
