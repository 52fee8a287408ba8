//! Command implementations

use unchin_app::{
    billing_distance, compare_fares, open_rate_repository, rate_summary, Config, FareQuery,
    FareServiceError,
};
use unchin_types::{Error, FareScheme, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_comparison, output_rates, output_rounded};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Compare {
            distance,
            region,
            prefecture,
            vehicle,
            driving,
            loading,
            night,
            holiday,
            departure,
            simple_allowance,
            area,
            address,
            work,
            waiting,
        } => {
            let query = FareQuery {
                region,
                prefecture,
                vehicle,
                distance_km: distance,
                driving_minutes: driving,
                loading_minutes: loading,
                night,
                holiday,
                departure,
                simple_allowance,
                area,
                address,
                work_minutes: work,
                waiting_minutes: waiting,
            };
            cmd_compare(&config, &query, output_format)
        }

        Commands::Round { distance, region } => {
            let region = region.unwrap_or(i64::from(config.default_region));
            let rounded = billing_distance(region, distance)?;
            output_rounded(output_format, &rounded)
        }

        Commands::Rates { region, vehicle } => {
            let region = region.unwrap_or(i64::from(config.default_region));
            let vehicle = vehicle.unwrap_or(i64::from(config.default_vehicle));
            let repo = open_rate_repository(&config)?;
            let summary = rate_summary(&repo, region, vehicle)?;
            output_rates(output_format, &summary)
        }

        Commands::Config {
            show,
            set_rate_table,
            set_distance_csv,
            set_region,
            set_vehicle,
            set_driving,
            set_loading,
            set_simple_allowance,
            set_output,
            reset,
        } => cmd_config(
            ConfigChanges {
                rate_table: set_rate_table,
                distance_csv: set_distance_csv,
                region: set_region,
                vehicle: set_vehicle,
                driving: set_driving,
                loading: set_loading,
                simple_allowance: set_simple_allowance,
                output: set_output,
            },
            show,
            reset,
        ),
    }
}

fn cmd_compare(config: &Config, query: &FareQuery, output_format: OutputFormat) -> Result<()> {
    let result = compare_fares(config, query).map_err(|e| match e {
        FareServiceError::Repository(e) => e,
        FareServiceError::InvalidRequest(e) => Error::Fare(e),
        FareServiceError::Comparison(e) => Error::Comparison(e),
    })?;
    output_comparison(output_format, &result)
}

/// Follow-up advice for errors the user can fix with configuration
pub fn hint_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Comparison(e)
            if e.scheme == FareScheme::Distance && e.is_rate_lookup_failure() =>
        {
            Some(
                "truck distance fares are not built in; \
                 set a table with `unchin config --set-rate-table <toml>` \
                 or `unchin config --set-distance-csv <csv>`",
            )
        }
        _ => None,
    }
}

#[derive(Default)]
struct ConfigChanges {
    rate_table: Option<std::path::PathBuf>,
    distance_csv: Option<std::path::PathBuf>,
    region: Option<u8>,
    vehicle: Option<u8>,
    driving: Option<u32>,
    loading: Option<u32>,
    simple_allowance: Option<bool>,
    output: Option<OutputFormat>,
}

impl ConfigChanges {
    /// Apply to `config`; true when anything changed
    fn apply(self, config: &mut Config) -> Result<bool> {
        let mut modified = false;

        if let Some(path) = self.rate_table {
            config.rate_table = Some(path);
            modified = true;
        }
        if let Some(path) = self.distance_csv {
            config.distance_fare_csv = Some(path);
            modified = true;
        }
        if let Some(region) = self.region {
            unchin_types::Region::try_from(region)?;
            config.default_region = region;
            modified = true;
        }
        if let Some(vehicle) = self.vehicle {
            unchin_types::VehicleClass::try_from(vehicle)?;
            config.default_vehicle = vehicle;
            modified = true;
        }
        if let Some(minutes) = self.driving {
            config.default_driving_minutes = minutes;
            modified = true;
        }
        if let Some(minutes) = self.loading {
            config.default_loading_minutes = minutes;
            modified = true;
        }
        if let Some(enabled) = self.simple_allowance {
            config.use_simple_allowance = enabled;
            modified = true;
        }
        if let Some(format) = self.output {
            config.output_format = format;
            modified = true;
        }

        Ok(modified)
    }
}

fn cmd_config(changes: ConfigChanges, show: bool, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = changes.apply(&mut config)?;

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
