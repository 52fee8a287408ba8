//! CSV importer for distance-tariff rows (距離制運賃表)
//!
//! Files exported from Japanese spreadsheets are often CP932 (Shift-JIS);
//! anything that is not valid UTF-8 is decoded as CP932.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::SHIFT_JIS;
use thiserror::Error;
use tracing::{debug, warn};
use unchin_types::{FareError, Region, TruckTier, Yen};

use crate::rate_table::DistanceFareRow;

const COLUMNS: [&str; 4] = ["region_code", "vehicle_code", "upto_km", "fare_yen"];

#[derive(Error, Debug)]
pub enum DistanceFareCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid code in row {row}: {source}")]
    InvalidCode {
        row: usize,
        #[source]
        source: FareError,
    },
}

/// Load distance fare rows from a UTF-8 or CP932 CSV file
///
/// Expected header: region_code,vehicle_code,upto_km,fare_yen
pub fn load_distance_fares_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<DistanceFareRow>, DistanceFareCsvError> {
    let bytes = fs::read(path)?;
    parse_distance_fares(&bytes)
}

pub fn parse_distance_fares(bytes: &[u8]) -> Result<Vec<DistanceFareRow>, DistanceFareCsvError> {
    let text = decode(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let positions = column_positions(&headers)?;

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // header is row 1
        let row_num = row_idx + 2;
        rows.push(parse_record(&record, &positions, row_num)?);
    }

    debug!(rows = rows.len(), "parsed distance fare CSV");
    Ok(rows)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
            if had_errors {
                warn!("some characters could not be decoded from CP932");
            }
            decoded
        }
    }
}

fn column_positions(headers: &csv::StringRecord) -> Result<[usize; 4], DistanceFareCsvError> {
    let mut positions = [0; 4];
    for (slot, column) in positions.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DistanceFareCsvError::MissingColumn(column.to_string()))?;
    }
    Ok(positions)
}

fn parse_record(
    record: &csv::StringRecord,
    positions: &[usize; 4],
    row: usize,
) -> Result<DistanceFareRow, DistanceFareCsvError> {
    let field = |i: usize| record.get(positions[i]).unwrap_or("");

    let region_code = parse_number::<i64>(field(0), row, COLUMNS[0])?;
    let vehicle_code = parse_number::<i64>(field(1), row, COLUMNS[1])?;
    let upto_km = parse_number::<u32>(field(2), row, COLUMNS[2])?;
    let fare_yen = parse_number::<Yen>(field(3), row, COLUMNS[3])?;

    let region = Region::from_code(region_code)
        .map_err(|source| DistanceFareCsvError::InvalidCode { row, source })?;
    let tier = TruckTier::from_code(vehicle_code)
        .map_err(|source| DistanceFareCsvError::InvalidCode { row, source })?;

    Ok(DistanceFareRow {
        region,
        tier,
        upto_km,
        fare_yen,
    })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    row: usize,
    column: &'static str,
) -> Result<T, DistanceFareCsvError> {
    value
        .replace(',', "")
        .parse()
        .map_err(|_| DistanceFareCsvError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "region_code,vehicle_code,upto_km,fare_yen\n\
                       3,3,10,25000\n\
                       3,3,20,27500\n\
                       10,1,5,12000\n";

    #[test]
    fn test_parse_utf8() {
        let rows = parse_distance_fares(CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region, Region::Kanto);
        assert_eq!(rows[0].tier, TruckTier::Large);
        assert_eq!(rows[1].upto_km, 20);
        assert_eq!(rows[2].region, Region::Okinawa);
        assert_eq!(rows[2].fare_yen, 12000);
    }

    #[test]
    fn test_columns_in_any_order_with_bom() {
        let csv = "\u{FEFF}fare_yen,upto_km,vehicle_code,region_code,note\n30000,50,2,1,札幌\n";
        let rows = parse_distance_fares(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].region, Region::Hokkaido);
        assert_eq!(rows[0].tier, TruckTier::Medium);
        assert_eq!(rows[0].fare_yen, 30000);
    }

    #[test]
    fn test_parse_cp932() {
        let csv = "region_code,vehicle_code,upto_km,fare_yen,備考\n6,4,100,80000,大阪\n";
        let (bytes, _, _) = SHIFT_JIS.encode(csv);
        assert!(std::str::from_utf8(&bytes).is_err());
        let rows = parse_distance_fares(&bytes).unwrap();
        assert_eq!(rows[0].region, Region::Kinki);
        assert_eq!(rows[0].tier, TruckTier::Trailer);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_distance_fares(b"region_code,vehicle_code,fare_yen\n3,3,1000\n").unwrap_err();
        assert!(matches!(err, DistanceFareCsvError::MissingColumn(c) if c == "upto_km"));
    }

    #[test]
    fn test_errors_name_the_row() {
        let csv = format!("{}3,3,abc,1000\n", CSV);
        let err = parse_distance_fares(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DistanceFareCsvError::InvalidNumber { row: 5, column: "upto_km", .. }
        ));

        let csv = format!("{}3,0,10,1000\n", CSV);
        let err = parse_distance_fares(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DistanceFareCsvError::InvalidCode { row: 5, .. }));
        assert!(err.to_string().contains("vehicle_code"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let rows = load_distance_fares_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
    }
}
