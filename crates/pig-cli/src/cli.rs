use clap::{Parser, Subcommand};
use pig_validate::CheckId;

#[derive(Parser)]
#[command(
    name = "pig",
    about = "PIG: package-level constraint validation for product information graphs",
    version
)]
pub struct Cli {
    /// Log filter for stderr diagnostics (overrides RUST_LOG), e.g. `debug`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one package document
    Check {
        /// Path to the package JSON document
        package: String,

        /// Run only this check; repeatable (see `pig checks`)
        #[arg(long = "check", value_name = "ID")]
        checks: Vec<CheckId>,

        /// Config file path (default: ./pig.toml when present)
        #[arg(long)]
        config: Option<String>,

        /// Reject package documents larger than this many bytes
        #[arg(long, value_name = "N")]
        max_bytes: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List check identifiers in run order with their status codes
    Checks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
