//! Output formatting module

use unchin_app::{RateSummary, RoundedDistance};
use unchin_domain::service::FareComparisonResult;
use unchin_types::{OutputFormat, Result};

pub fn output_comparison(output_format: OutputFormat, result: &FareComparisonResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
    } else {
        print!("{}", result.breakdown());
    }
    Ok(())
}

pub fn output_rounded(output_format: OutputFormat, rounded: &RoundedDistance) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rounded)?);
    } else {
        println!("運輸局:       {}", rounded.region.name());
        println!("経路距離:     {}km", rounded.distance_km);
        println!("運賃計算距離: {}km", rounded.rounded_km);
    }
    Ok(())
}

pub fn output_rates(output_format: OutputFormat, summary: &RateSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", summary.report());
    }
    Ok(())
}
