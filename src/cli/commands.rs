//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::client::TextCompletion;
use crate::core::converter::CodeConverter;
use crate::core::models::{ConversionRequest, Language};

/// Commands for Code Converter
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a source file (or stdin) to another language
    Convert {
        /// Source language (c, java, python)
        #[arg(long)]
        from: Language,

        /// Target language (c, java, python)
        #[arg(long)]
        to: Language,

        /// Input file; reads stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported languages
    Languages,

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Read source code from a file, or from stdin
fn read_source(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Handle conversion command
pub async fn handle_convert<C: TextCompletion>(
    converter: CodeConverter<C>,
    from: Language,
    to: Language,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use tracing::info;

    let source_code = read_source(file.as_ref())?;
    let request = ConversionRequest::new(source_code, from, to);
    request.validate()?;

    info!("Starting conversion: {} -> {}", from.label(), to.label());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Converting {} to {}...", from.label(), to.label()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = converter.convert_request(&request).await;
    spinner.finish_and_clear();

    let converted = match result {
        Ok(converted) => converted,
        Err(e) => {
            eprintln!("❌ Conversion failed: an error occurred while converting your code. Please try again.");
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", converted))?;
            println!("✅ Converted code written to {}", path.display());
        }
        None => println!("{}", converted),
    }

    Ok(())
}

/// Handle languages command
pub fn handle_languages() {
    for lang in Language::ALL {
        println!("{:<8} {}", lang.value(), lang.label());
    }
}

/// Handle server command
pub async fn handle_server<C: TextCompletion + 'static>(
    converter: CodeConverter<C>,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("🔁 Convert endpoint: POST http://{}:{}/v1/convert", host, port);

    run_server(converter, host, port).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_convert_command() {
        let cli = TestCli::try_parse_from([
            "code-converter",
            "convert",
            "--from",
            "python",
            "--to",
            "C",
            "--file",
            "main.py",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert { from, to, file, output } => {
                assert_eq!(from, Language::Python);
                assert_eq!(to, Language::C);
                assert_eq!(file, Some(PathBuf::from("main.py")));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        let parsed = TestCli::try_parse_from(["code-converter", "convert", "--from", "rust", "--to", "c"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_server_defaults() {
        let cli = TestCli::try_parse_from(["code-converter", "server"]).unwrap();
        match cli.command {
            Commands::Server { host, port } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 8000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_source_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Main.java");
        std::fs::write(&path, "class Main {}\n").unwrap();

        assert_eq!(read_source(Some(&path)).unwrap(), "class Main {}\n");
        assert!(read_source(Some(&dir.path().join("missing.c"))).is_err());
    }
}
