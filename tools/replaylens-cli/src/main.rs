//! Replaylens CLI: command-line interface for match replay analysis.
//!
//! Usage:
//!   replaylens analyze <PATH>     Profile both players and list highlights
//!   replaylens series <PATH>      Export per-window series as CSV
//!   replaylens info <PATH>        Show replay information
//!   replaylens validate <PATH>    Validate a replay folder

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use replaylens_common::{config_file_path, AnalysisConfig, AppConfig, ReplaylensError};

mod commands;

#[derive(Parser)]
#[command(
    name = "replaylens",
    about = "Behavioral analytics for recorded two-player matches",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/replaylens/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile both players, detect bots, and list highlights
    Analyze {
        /// Path to the replay folder
        path: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export per-window APM, attack, and position series as CSV
    Series {
        /// Path to the replay folder
        path: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show replay information
    Info {
        /// Path to the replay folder
        path: PathBuf,
    },

    /// Validate a replay folder
    Validate {
        /// Path to the replay folder
        path: PathBuf,
    },
}

/// Overrides for the configured analysis parameters.
#[derive(Args)]
struct AnalysisArgs {
    /// Frames per analysis window
    #[arg(long)]
    window_size: Option<u64>,

    /// Seconds per replay frame
    #[arg(long)]
    frame_duration: Option<f64>,

    /// Average APM above which a player is flagged as a bot
    #[arg(long)]
    bot_threshold: Option<f64>,

    /// Per-axis distance for two mean positions to count as an engagement
    #[arg(long)]
    distance_threshold: Option<f64>,

    /// Maximum window gap merged by highlight compression
    #[arg(long)]
    compression_length: Option<u64>,

    /// Maximum window gap merged by attack-record compression
    #[arg(long)]
    attack_compression: Option<u64>,

    /// Keep every candidate window instead of merging nearby ones
    #[arg(long)]
    no_compression: bool,

    /// Skip spatial engagement detection
    #[arg(long)]
    no_engagements: bool,

    /// Track the mean location of attack orders per window
    #[arg(long)]
    attack_locations: bool,

    /// Profile players one after the other instead of in parallel
    #[arg(long)]
    sequential: bool,
}

impl AnalysisArgs {
    fn apply(self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(v) = self.window_size {
            config.window_size = v;
        }
        if let Some(v) = self.frame_duration {
            config.frame_duration_secs = v;
        }
        if let Some(v) = self.bot_threshold {
            config.bot_threshold_apm = v;
        }
        if let Some(v) = self.distance_threshold {
            config.distance_threshold = v;
        }
        if let Some(v) = self.compression_length {
            config.compression_length = v;
        }
        if let Some(v) = self.attack_compression {
            config.attack_compression = v;
        }
        config.compress_highlights &= !self.no_compression;
        config.detect_engagements &= !self.no_engagements;
        config.track_attack_locations |= self.attack_locations;
        config.parallel &= !self.sequential;
        config
    }
}

/// Resolve the configuration before logging exists.
///
/// An explicit `--config` file must load. A broken file at the default
/// location falls back to the defaults; its error is handed back so it can be
/// reported once logging is up.
fn resolve_config(
    explicit: Option<&Path>,
    default_path: &Path,
) -> anyhow::Result<(AppConfig, Option<ReplaylensError>)> {
    if let Some(path) = explicit {
        return Ok((AppConfig::load_from(path)?, None));
    }
    Ok(match AppConfig::load_if_present(default_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut app_config, config_error) =
        resolve_config(cli.config.as_deref(), &config_file_path())?;

    // Initialize logging
    if cli.verbose {
        app_config.logging.level = "debug".to_string();
    }
    app_config.logging.json |= cli.log_json;
    replaylens_common::logging::init_logging(&app_config.logging);

    if let Some(e) = config_error {
        tracing::warn!(
            path = %config_file_path().display(),
            error = %e,
            "Ignoring unreadable config file; using defaults"
        );
    }

    match cli.command {
        Commands::Analyze {
            path,
            analysis,
            json,
        } => commands::analyze::run(path, analysis.apply(app_config.analysis), json),
        Commands::Series {
            path,
            analysis,
            output,
        } => commands::series::run(path, analysis.apply(app_config.analysis), output),
        Commands::Info { path } => commands::info::run(path, &app_config.analysis),
        Commands::Validate { path } => commands::validate::run(path),
    }
}
