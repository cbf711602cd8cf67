use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One ICU operational observation: a single unit on a single day.
///
/// Serializes as a flat mapping keyed by the source column names, which is
/// the shape the patient detail table renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IcuRecord {
    #[serde(rename = "Date", serialize_with = "serialize_midnight")]
    pub date: NaiveDate,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "AcuityLevel")]
    pub acuity_level: String,
    #[serde(rename = "AdmissionSource")]
    pub admission_source: String,
    #[serde(rename = "BedOccupancy")]
    pub bed_occupancy: f64,
    #[serde(rename = "PatientCensus")]
    pub patient_census: f64,
    #[serde(rename = "VentilatorUtilization")]
    pub ventilator_utilization: f64,
    /// Days; `None` when the cell was empty or the column absent.
    #[serde(rename = "LengthOfStay")]
    pub length_of_stay: Option<f64>,
    /// Source columns outside the fixed schema (e.g. `PatientID`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl IcuRecord {
    /// Length of stay if present and finite.
    pub fn known_length_of_stay(&self) -> Option<f64> {
        self.length_of_stay.filter(|v| v.is_finite())
    }
}

/// Dates leave the API as ISO timestamps at midnight (`2024-01-05T00:00:00`).
fn serialize_midnight<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%dT00:00:00"))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn serializes_with_source_column_names() {
        let mut rec = record(day(5), "ICU-A", "High", "ER", 12.0, Some(3.5));
        rec.extra.insert("PatientID".into(), "P-0042".into());

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["Date"], "2024-01-05T00:00:00");
        assert_eq!(json["Unit"], "ICU-A");
        assert_eq!(json["AcuityLevel"], "High");
        assert_eq!(json["AdmissionSource"], "ER");
        assert_eq!(json["PatientCensus"], 12.0);
        assert_eq!(json["LengthOfStay"], 3.5);
        assert_eq!(json["PatientID"], "P-0042");
    }

    #[test]
    fn missing_length_of_stay_serializes_as_null() {
        let rec = record(day(1), "ICU-A", "Low", "ER", 1.0, None);
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json["LengthOfStay"].is_null());
    }

    #[test]
    fn non_finite_length_of_stay_is_unknown() {
        let rec = record(day(1), "ICU-A", "Low", "ER", 1.0, Some(f64::NAN));
        assert_eq!(rec.known_length_of_stay(), None);
        let rec = record(day(1), "ICU-A", "Low", "ER", 1.0, Some(2.25));
        assert_eq!(rec.known_length_of_stay(), Some(2.25));
    }
}
