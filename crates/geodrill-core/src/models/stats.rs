use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::region::null_as_zero;

/// Headline metrics for one scope, as returned by the KPI endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiBlock {
    #[serde(deserialize_with = "null_as_zero")]
    pub total_enrolments: u64,

    #[serde(deserialize_with = "null_as_zero")]
    pub total_updates: u64,

    /// Updates per enrolment, rounded to two decimals by the backend
    pub operational_ratio: f64,

    /// Percentage in `0..=100`
    pub data_quality_index: f64,
}

impl KpiBlock {
    /// True when every field is zero, i.e. nothing was loaded
    pub fn is_zero(&self) -> bool {
        self.total_enrolments == 0
            && self.total_updates == 0
            && self.operational_ratio == 0.0
            && self.data_quality_index == 0.0
    }
}

/// One day of the enrolment/update time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub enrolments: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub updates: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub biometric_updates: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub demographic_updates: u64,
}

impl TrendPoint {
    /// Total updates for the day; falls back to the biometric/demographic split
    /// when the aggregate column is absent.
    pub fn total_updates(&self) -> u64 {
        if self.updates > 0 {
            self.updates
        } else {
            self.biometric_updates + self.demographic_updates
        }
    }
}

/// Enrolment count for an age band such as `0-5` or `18+`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub range: String,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub count: u64,
}

/// Body of the trends endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendReport {
    pub trends: Vec<TrendPoint>,

    #[serde(rename = "ageData")]
    pub age_data: Vec<AgeBand>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_deserialize() {
        let kpi: KpiBlock = serde_json::from_str(
            r#"{"total_enrolments":1200,"total_updates":300,"operational_ratio":0.25,"data_quality_index":98.5}"#,
        )
        .unwrap();
        assert_eq!(kpi.total_enrolments, 1200);
        assert_eq!(kpi.total_updates, 300);
        assert_eq!(kpi.operational_ratio, 0.25);
        assert_eq!(kpi.data_quality_index, 98.5);
        assert!(!kpi.is_zero());
    }

    #[test]
    fn test_kpi_default_is_zero() {
        assert!(KpiBlock::default().is_zero());
        let partial: KpiBlock = serde_json::from_str(r#"{"total_enrolments":null}"#).unwrap();
        assert!(partial.is_zero());
    }

    #[test]
    fn test_trend_report_deserialize() {
        let report: TrendReport = serde_json::from_str(
            r#"{
                "trends": [
                    {"date": "2025-03-01", "enrolments": 10, "biometric_updates": 4, "demographic_updates": 1}
                ],
                "ageData": [{"range": "0-5", "count": 7}, {"range": "18+", "count": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(report.trends.len(), 1);
        let point = &report.trends[0];
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(point.updates, 0);
        assert_eq!(point.total_updates(), 5);
        assert_eq!(report.age_data[1].count, 0);
    }

    #[test]
    fn test_trend_report_missing_fields_default_empty() {
        let report: TrendReport = serde_json::from_str("{}").unwrap();
        assert!(report.trends.is_empty());
        assert!(report.age_data.is_empty());
    }
}
