use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spotaudit - coordinate integrity checks for the spot catalog
#[derive(Parser, Debug)]
#[command(name = "spotaudit")]
#[command(about = "Coordinate integrity checks for the spot catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit every catalog record's coordinates
    Audit(AuditArgs),

    /// Verify a single coordinate against the reverse-geocoding service
    Verify(VerifyArgs),
}

#[derive(Parser, Debug)]
pub struct AuditArgs {
    /// Catalog data directory containing the partition files
    pub data_dir: PathBuf,

    /// Path to a spotaudit.toml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum decimal digits before a coordinate is low-precision
    #[arg(long)]
    pub min_decimal_digits: Option<usize>,

    /// Cross-partition proximity window in degrees
    #[arg(long)]
    pub proximity_epsilon_deg: Option<f64>,

    /// Planar outlier distance threshold in degrees
    #[arg(long)]
    pub outlier_threshold_deg: Option<f64>,

    /// Partition file name prefix
    #[arg(long, default_value = "spots")]
    pub partition_prefix: String,

    /// Partition file extension
    #[arg(long, default_value = "ts")]
    pub partition_ext: String,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Latitude of the coordinate to verify
    pub latitude: f64,

    /// Longitude of the coordinate to verify
    pub longitude: f64,

    /// Path to a spotaudit.toml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reverse-geocoding service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Hard per-call timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
