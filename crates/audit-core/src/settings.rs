use clap::Parser;
use std::path::PathBuf;

/// TRAI call-drop compliance analysis for telecom call data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "trai-audit",
    about = "TRAI call-drop compliance analysis for telecom call data",
    version
)]
pub struct Settings {
    /// Call-data file to analyze (.csv, .xlsx, or .xls)
    pub dataset: PathBuf,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Also print an LLM-ready analysis prompt after the report
    #[arg(long)]
    pub prompt: bool,

    /// JSON file overriding penalty ranges per severity tier
    #[arg(long)]
    pub penalty_schedule: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply flag interactions.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but with an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn from_args(args: Vec<std::ffi::OsString>) -> Self {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
