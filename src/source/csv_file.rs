use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use super::{RecordSource, SourceError};
use crate::models::IcuRecord;

const DATE: &str = "Date";
const UNIT: &str = "Unit";
const ACUITY_LEVEL: &str = "AcuityLevel";
const ADMISSION_SOURCE: &str = "AdmissionSource";
const BED_OCCUPANCY: &str = "BedOccupancy";
const PATIENT_CENSUS: &str = "PatientCensus";
const VENTILATOR_UTILIZATION: &str = "VentilatorUtilization";
const LENGTH_OF_STAY: &str = "LengthOfStay";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Numeric cells read as missing. Same set spreadsheet and pandas exports use.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads the record set from a CSV file on every `load`.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&self) -> Result<Vec<IcuRecord>, SourceError> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                SourceError::Io {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        let records = parse_records(file)?;
        tracing::debug!(path = %self.path.display(), rows = records.len(), "Loaded ICU records");
        Ok(records)
    }
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    unit: usize,
    acuity_level: usize,
    admission_source: usize,
    bed_occupancy: usize,
    patient_census: usize,
    ventilator_utilization: usize,
    length_of_stay: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, SourceError> {
        let find = |name: &'static str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| find(name).ok_or(SourceError::MissingColumn(name));

        let known = [
            DATE,
            UNIT,
            ACUITY_LEVEL,
            ADMISSION_SOURCE,
            BED_OCCUPANCY,
            PATIENT_CENSUS,
            VENTILATOR_UTILIZATION,
            LENGTH_OF_STAY,
        ];
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty() && !known.contains(h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Self {
            date: require(DATE)?,
            unit: require(UNIT)?,
            acuity_level: require(ACUITY_LEVEL)?,
            admission_source: require(ADMISSION_SOURCE)?,
            bed_occupancy: require(BED_OCCUPANCY)?,
            patient_census: require(PATIENT_CENSUS)?,
            ventilator_utilization: require(VENTILATOR_UTILIZATION)?,
            length_of_stay: find(LENGTH_OF_STAY),
            extra,
        })
    }
}

/// Parses CSV text with a header row into records.
///
/// Text cells keep surrounding whitespace; numeric and date cells are
/// trimmed before parsing. Missing `LengthOfStay` cells become `None`,
/// missing snapshot metrics become NaN.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<IcuRecord>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let length_of_stay = match columns.length_of_stay {
            Some(idx) => parse_optional_number(cell(idx), LENGTH_OF_STAY, line)?,
            None => None,
        };
        let metric = |idx: usize, column: &'static str| {
            parse_optional_number(cell(idx), column, line).map(|v| v.unwrap_or(f64::NAN))
        };

        let extra: BTreeMap<String, String> = columns
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), cell(*idx).to_string()))
            .collect();

        records.push(IcuRecord {
            date: parse_date(cell(columns.date), line)?,
            unit: cell(columns.unit).to_string(),
            acuity_level: cell(columns.acuity_level).to_string(),
            admission_source: cell(columns.admission_source).to_string(),
            bed_occupancy: metric(columns.bed_occupancy, BED_OCCUPANCY)?,
            patient_census: metric(columns.patient_census, PATIENT_CENSUS)?,
            ventilator_utilization: metric(columns.ventilator_utilization, VENTILATOR_UTILIZATION)?,
            length_of_stay,
            extra,
        });
    }

    Ok(records)
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, SourceError> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| SourceError::InvalidValue {
            column: DATE,
            line,
            value: raw.to_string(),
        })
}

/// `None` for a missing-value token.
fn parse_optional_number(
    raw: &str,
    column: &'static str,
    line: u64,
) -> Result<Option<f64>, SourceError> {
    if MISSING_TOKENS.contains(&raw.trim()) {
        return Ok(None);
    }
    parse_number(raw, column, line).map(Some)
}

fn parse_number(raw: &str, column: &'static str, line: u64) -> Result<f64, SourceError> {
    raw.trim().parse::<f64>().map_err(|_| SourceError::InvalidValue {
        column,
        line,
        value: raw.to_string(),
    })
}
