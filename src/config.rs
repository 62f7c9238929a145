use std::path::PathBuf;

use clap::Parser;

/// File the dashboard opens when none is given.
pub const DEFAULT_DATA_FILE: &str = "sifted_50_germany_top_growing_startups.csv";

#[derive(Parser, Debug)]
#[command(version, about = "Dashboard of the fastest growing startups")]
pub struct Args {
    /// Startup table to open (.csv, .tsv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1400.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

/// Startup settings for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_file: PathBuf,
    pub window_size: [f32; 2],
}

impl From<&Args> for DashboardConfig {
    fn from(args: &Args) -> Self {
        DashboardConfig {
            data_file: args.data_file.clone(),
            window_size: [args.width.max(600.0), args.height.max(400.0)],
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            window_size: [1400.0, 900.0],
        }
    }
}
