use serde::Serialize;

use crate::types::{CheckResult, QualityTier};

/// Text shown instead of a percentage when there are no results.
pub const NO_DATA: &str = "no data";

/// Tier counts for a full result set.
///
/// Every result without a tier (failed checks and unrecognized ratings)
/// lands in `errors`, so `good + medium + bad + errors == total`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub good: usize,
    pub medium: usize,
    pub bad: usize,
    pub errors: usize,
    pub total: usize,
    /// Results whose check succeeded, including unrecognized ratings.
    pub successful: usize,
}

impl CategoryCounts {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut c = CategoryCounts {
            total: results.len(),
            ..Default::default()
        };

        for r in results {
            if r.status.is_success() {
                c.successful += 1;
            }

            match r.tier {
                Some(QualityTier::Good) => c.good += 1,
                Some(QualityTier::Medium) => c.medium += 1,
                Some(QualityTier::Bad) => c.bad += 1,
                None => c.errors += 1,
            }
        }

        c
    }

    pub fn tier(&self, tier: QualityTier) -> usize {
        match tier {
            QualityTier::Good => self.good,
            QualityTier::Medium => self.medium,
            QualityTier::Bad => self.bad,
        }
    }

    /// Share of `part` in `total` as a percentage; `None` when `total` is 0.
    pub fn pct(part: usize, total: usize) -> Option<f64> {
        if total == 0 {
            None
        } else {
            Some((part as f64 / total as f64) * 100.0)
        }
    }

    /// Percentage of `part` in this set, e.g. `33.3%`, or [`NO_DATA`].
    pub fn format_pct(&self, part: usize) -> String {
        match Self::pct(part, self.total) {
            Some(p) => format!("{p:.1}%"),
            None => NO_DATA.to_string(),
        }
    }

    pub fn success_rate(&self) -> String {
        self.format_pct(self.successful)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckStatus, InputRow, QualityReading};
    use serde_json::json;

    fn result(reading: QualityReading) -> CheckResult {
        let row = InputRow {
            name: "n".into(),
            display_number: "d".into(),
            provider_id: "p".into(),
        };
        let at = chrono::NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        CheckResult::new(row, reading, at)
    }

    fn rated(raw: &str) -> CheckResult {
        result(QualityReading::rated(raw.into(), json!({ "quality_rating": raw })))
    }

    fn failed(status: CheckStatus) -> CheckResult {
        result(QualityReading::failure(status, "x"))
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(CategoryCounts::pct(10, 0), None);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(CategoryCounts::pct(50, 100), Some(50.0));
        assert_eq!(CategoryCounts::pct(1, 4), Some(25.0));
    }

    #[test]
    fn test_one_good_two_errors() {
        let results = vec![
            rated("GREEN"),
            failed(CheckStatus::NotFound),
            result(QualityReading::no_quality_info(json!({}))),
        ];
        let c = CategoryCounts::from_results(&results);

        assert_eq!((c.good, c.medium, c.bad, c.errors, c.total), (1, 0, 0, 2, 3));
        assert_eq!(c.format_pct(c.good), "33.3%");
        assert_eq!(c.format_pct(c.errors), "66.7%");
        assert_eq!(c.format_pct(c.medium), "0.0%");
        assert_eq!(c.success_rate(), "33.3%");
    }

    #[test]
    fn test_empty_reports_no_data() {
        let c = CategoryCounts::from_results(&[]);
        assert!(c.is_empty());
        assert_eq!(c.format_pct(c.good), NO_DATA);
        assert_eq!(c.success_rate(), NO_DATA);
    }

    #[test]
    fn test_buckets_always_sum_to_total() {
        let results = vec![
            rated("GREEN"),
            rated("YELLOW"),
            rated("RED"),
            rated("RED"),
            rated("BLUE"),
            failed(CheckStatus::AuthError),
            failed(CheckStatus::BadRequest),
            failed(CheckStatus::ApiError),
            failed(CheckStatus::ConnectionError),
        ];
        for n in 0..=results.len() {
            let c = CategoryCounts::from_results(&results[..n]);
            assert_eq!(c.good + c.medium + c.bad + c.errors, c.total);
        }

        let c = CategoryCounts::from_results(&results);
        assert_eq!(c.bad, 2);
        // unrecognized rating is successful but untiered
        assert_eq!(c.successful, 5);
        assert_eq!(c.errors, 5);
    }
}
