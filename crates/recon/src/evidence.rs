use crate::model::{ReconSummary, SummaryViews, ViewRow};

/// Compute summary statistics from classified views.
pub fn compute_summary(views: &SummaryViews) -> ReconSummary {
    let units = |rows: &[ViewRow]| rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.quantity));

    ReconSummary {
        total_items: views.correct.len() + views.missing.len() + views.extra.len(),
        correct: views.correct.len(),
        missing: views.missing.len(),
        extra: views.extra.len(),
        missing_units: units(&views.missing),
        extra_units: units(&views.extra),
    }
}
