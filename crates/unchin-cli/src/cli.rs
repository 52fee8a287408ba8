//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use unchin_types::OutputFormat;

#[derive(Parser)]
#[command(name = "unchin")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Truck and light-van fare comparison under the Japanese standard tariffs")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare fares for one job
    ///
    /// Trucks (vehicle 1-4) need distance fares from a rate table: set a TOML
    /// with `config --set-rate-table` or a CSV with `config --set-distance-csv`.
    Compare {
        /// Route distance in km
        distance: f64,

        /// Region code 1-10 (1=北海道 ... 3=関東 ... 10=沖縄)
        #[arg(long, short = 'r')]
        region: Option<i64>,

        /// Prefecture name (e.g., "東京都"); overrides --region
        #[arg(long, short = 'p')]
        prefecture: Option<String>,

        /// Vehicle code 0-4 (0=軽貨物/赤帽, 1=2t, 2=4t, 3=10t, 4=トレーラー)
        #[arg(long, short = 'c')]
        vehicle: Option<i64>,

        /// Driving time in minutes
        #[arg(long)]
        driving: Option<u32>,

        /// Loading time in minutes
        #[arg(long)]
        loading: Option<u32>,

        /// Apply the night surcharge
        #[arg(long)]
        night: bool,

        /// Apply the holiday surcharge
        #[arg(long)]
        holiday: bool,

        /// Departure time "YYYY-MM-DD HH:MM"; sets night/holiday flags
        #[arg(long)]
        departure: Option<String>,

        /// Use the fixed 30 km / 50 km allowance for the time tariff
        #[arg(long)]
        simple_allowance: bool,

        /// Akabou surcharge area (e.g., "東京23区", "大阪市内")
        #[arg(long)]
        area: Option<String>,

        /// Pickup address; fills --area when not given
        #[arg(long)]
        address: Option<String>,

        /// Akabou work time in minutes
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        work: i64,

        /// Akabou waiting time in minutes
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        waiting: i64,
    },

    /// Show the billing distance of the distance tariff
    Round {
        /// Distance in km
        distance: u32,

        /// Region code 1-10. Uses config value if not specified.
        #[arg(long, short = 'r')]
        region: Option<i64>,
    },

    /// Show time-tariff rates for a region and vehicle
    Rates {
        /// Region code 1-10. Uses config value if not specified.
        #[arg(long, short = 'r')]
        region: Option<i64>,

        /// Vehicle code 1-4. Uses config value if not specified.
        #[arg(long, short = 'c')]
        vehicle: Option<i64>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the TOML rate table
        #[arg(long)]
        set_rate_table: Option<PathBuf>,

        /// Set the distance fare CSV
        #[arg(long)]
        set_distance_csv: Option<PathBuf>,

        /// Set default region code
        #[arg(long)]
        set_region: Option<u8>,

        /// Set default vehicle code
        #[arg(long)]
        set_vehicle: Option<u8>,

        /// Set default driving minutes
        #[arg(long)]
        set_driving: Option<u32>,

        /// Set default loading minutes
        #[arg(long)]
        set_loading: Option<u32>,

        /// Enable/disable the simple allowance
        #[arg(long)]
        set_simple_allowance: Option<bool>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "unchin",
            "compare",
            "123.4",
            "--prefecture",
            "大阪府",
            "-c",
            "0",
            "--work",
            "45",
            "-f",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Compare {
                distance,
                prefecture,
                vehicle,
                work,
                ..
            } => {
                assert!((distance - 123.4).abs() < 1e-9);
                assert_eq!(prefecture.as_deref(), Some("大阪府"));
                assert_eq!(vehicle, Some(0));
                assert_eq!(work, 45);
            }
            _ => panic!("expected compare"),
        }
    }
}
