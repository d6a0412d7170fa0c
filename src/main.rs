mod analyze;
mod error;
mod github;
mod model;
mod report;
mod sprint;
mod utils;

use crate::error::{ReportError, Result};
use crate::github::GithubFetcher;
use crate::model::ReportConfig;
use crate::utils::MultiProgressNew;
use clap::Parser;
use indicatif::MultiProgress;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct Args {
    #[arg(long = "config", default_value = "sprint-report.json")]
    config_path: String,
    #[arg(long = "output", default_value = "report.md")]
    output_path: String,
    #[arg(long = "github_token", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(e) = run(&args).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args) -> Result<()> {
    let token = args
        .github_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ReportError::config(
                "please provide a personal access token (--github_token or GITHUB_TOKEN) to use GitHub's GraphQL endpoint",
            )
        })?;

    let multi_progress = MultiProgress::default();
    let config = parse_config(&args.config_path, &multi_progress)?;

    let fetcher = GithubFetcher::new(token, &config)?;
    let records = sprint::fetch_records(&fetcher, &config, &multi_progress).await?;
    let report = sprint::render_report(&records, &config);

    fs::write(&args.output_path, report)?;
    info!("Sprint report has been successfully generated: {}", args.output_path);
    Ok(())
}

fn parse_config(path: &str, multi_progress: &MultiProgress) -> Result<ReportConfig> {
    let pb = multi_progress.add_spinner(format!("Read file `{}` ...", path));
    let config = ReportConfig::from_config(path);
    match &config {
        Ok(config) => pb.finish_with_message(format!(
            "✅ Completed parsing file `{}` ({}/{}, milestone #{})",
            path, config.owner, config.repository, config.milestone
        )),
        Err(_) => pb.abandon_with_message(format!("❌ Failed parsing file `{}`", path)),
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_before_reading_config() {
        let output = tempfile::tempdir().unwrap();
        let output_path = output.path().join("report.md");
        let args = Args {
            config_path: "/nonexistent/sprint-report.json".to_string(),
            output_path: output_path.to_string_lossy().to_string(),
            github_token: Some("   ".to_string()),
        };
        let err = run(&args).await.unwrap_err();
        assert!(matches!(err, ReportError::Configuration(ref m) if m.contains("personal access token")));
        assert!(!output_path.exists());
    }

    #[test]
    fn arguments_have_defaults() {
        let args = Args::try_parse_from(["sprint-report", "--github_token", "ghp_x"]).unwrap();
        assert_eq!(args.config_path, "sprint-report.json");
        assert_eq!(args.output_path, "report.md");
        assert_eq!(args.github_token.as_deref(), Some("ghp_x"));
    }
}
