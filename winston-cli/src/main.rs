mod client;
mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use winston_core::config::ServerConfig;
use winston_core::params::AnalysisParameters;
use winston_core::wire::UploadOutcome;
use winston_core::Error;
use client::Client;

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "winston", about = "Run Winston-Lutz analyses against an analysis server")]
struct Cli {
    /// Server base URL (overrides WINSTON_SERVER env var and the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// JSON file with server paths, e.g. {"base_url": "...", "image_dir": "..."}
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload images, analyze them and print the results table
    Analyze {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// BB diameter in mm
        #[arg(long)]
        bb_size: String,

        /// Pass/fail tolerance on the CAX-to-BB distance, in mm
        #[arg(long)]
        tolerance: String,

        /// Use the low-density BB detection
        #[arg(long)]
        low_density: bool,
    },
    /// Delete every uploaded file on the server
    Clear,
}

/// Config file first, then `WINSTON_SERVER`, then `--server` for the base URL.
fn server_config(server_arg: &Option<String>, config_text: Option<&str>) -> Result<ServerConfig, Error> {
    let mut cfg = match config_text {
        Some(text) => ServerConfig::from_json(text)?,
        None => ServerConfig::with_base_url(DEFAULT_SERVER),
    };
    if let Some(base) = server_arg.clone().or_else(|| std::env::var("WINSTON_SERVER").ok()) {
        cfg.base_url = base;
    }
    if cfg.base_url.is_empty() {
        cfg.base_url = DEFAULT_SERVER.to_string();
    }
    Ok(cfg)
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config_text = cli.config.as_ref().map(|path| {
        std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("{}: {e}", path.display())))
    });
    let config = server_config(&cli.server, config_text.as_deref()).unwrap_or_else(|e| fail(e));
    let client = Client::new(config);

    match cli.command {
        Commands::Clear => {
            client.clear_files().await.unwrap_or_else(|e| fail(e));
            eprintln!("Files cleared");
        }
        Commands::Analyze {
            files,
            bb_size,
            tolerance,
            low_density,
        } => {
            let params = AnalysisParameters::from_inputs(&bb_size, low_density, &tolerance)
                .unwrap_or_else(|e| fail(e));

            client.clear_files().await.unwrap_or_else(|e| fail(e));

            for path in &files {
                match client.upload(path).await {
                    Ok(UploadOutcome::Confirmed) => eprintln!("Uploaded {}", path.display()),
                    Ok(UploadOutcome::Rejected) => {
                        eprintln!("Server did not accept {}", path.display())
                    }
                    Err(e) => eprintln!("Upload failed for {}: {e}", path.display()),
                }
            }

            client.check_files().await.unwrap_or_else(|e| fail(e));

            eprintln!("Analyzing {} files...", files.len());
            let result = client.analyze(&params).await.unwrap_or_else(|e| fail(e));

            let summary = result.summary();
            for (key, value) in &summary {
                println!("{key}: {value}");
            }
            if !summary.is_empty() {
                println!();
            }
            let rows = result.rows(params.tolerance_mm as f64);
            print!("{}", report::format_table(&rows, result.has_names()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_flag_wins() {
        let cfg = server_config(&Some("http://lab:9000".into()), None).unwrap();
        assert_eq!(cfg.upload_url(), "http://lab:9000/upload");
    }

    #[test]
    fn config_file_paths_apply() {
        let text = r#"{"base_url": "http://lab:7000", "image_dir": "/plots"}"#;
        let cfg = server_config(&Some("http://lab:9000".into()), Some(text)).unwrap();
        assert_eq!(cfg.image_url("image1"), "http://lab:9000/plots/image1.png");
        assert_eq!(cfg.analyze_url(), "http://lab:9000/analyze");
    }

    #[test]
    fn bad_config_file_is_an_error() {
        assert!(server_config(&None, Some("not json")).is_err());
    }

    #[test]
    fn analyze_args_parse() {
        let cli = Cli::try_parse_from([
            "winston", "analyze", "a.dcm", "b.dcm", "--bb-size", "10", "--tolerance", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { files, low_density, .. } => {
                assert_eq!(files.len(), 2);
                assert!(!low_density);
            }
            Commands::Clear => panic!("expected analyze"),
        }
    }
}
