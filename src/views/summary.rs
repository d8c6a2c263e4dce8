use crate::filter::Subset;
use serde::Serialize;

/// One row of the summary table. `average` holds a mean for the income row
/// and a plain count for the `call_id` row; NaN serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Column")]
    pub column: String,
    #[serde(rename = "Average")]
    pub average: f64,
}

/// Mean of the present incomes, NaN when there are none.
pub fn mean_income(subset: &Subset<'_>) -> f64 {
    let (sum, n) = subset
        .iter()
        .filter_map(|l| l.monthly_total_income)
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

pub fn call_count(subset: &Subset<'_>) -> usize {
    subset.iter().filter(|l| l.call_id.is_some()).count()
}

/// Always exactly two rows: income mean, then call count.
pub fn build_summary(subset: &Subset<'_>) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            column: "monthly_total_income".to_string(),
            average: mean_income(subset),
        },
        SummaryRow {
            column: "call_id".to_string(),
            average: call_count(subset) as f64,
        },
    ]
}
