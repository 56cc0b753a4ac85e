use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::config::ReconConfig;
use crate::differ::diff;
use crate::error::Result;
use crate::evidence::compute_summary;
use crate::model::{Inventory, InventorySource, ReconInput, ReconMeta, ReconReport};
use crate::parse::parse_records;

/// Parse one side and aggregate it.
pub fn load_inventory(source: InventorySource<'_>) -> Result<Inventory> {
    let records = parse_records(source.text, source.format)?;
    aggregate(&records)
}

/// Reconcile `subject` against `reference`.
///
/// The two sides are parsed and aggregated in parallel. If both fail, the
/// subject's error is returned.
pub fn reconcile(subject: InventorySource<'_>, reference: InventorySource<'_>) -> Result<ReconReport> {
    let (subject_inv, reference_inv) =
        rayon::join(|| load_inventory(subject), || load_inventory(reference));
    let subject_inv = subject_inv?;
    let reference_inv = reference_inv?;

    tracing::debug!(
        subject_items = subject_inv.len(),
        reference_items = reference_inv.len(),
        "aggregated inventories"
    );

    let table = diff(&subject_inv, &reference_inv);
    let views = classify(&table);
    let summary = compute_summary(&views);

    tracing::info!(
        items = summary.total_items,
        correct = summary.correct,
        missing = summary.missing,
        extra = summary.extra,
        "reconciliation complete"
    );

    Ok(ReconReport {
        meta: ReconMeta {
            job_name: None,
            subject_format: subject.format,
            reference_format: reference.format,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary,
        table,
        views,
    })
}

/// Run a job against pre-loaded input text.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconReport> {
    let subject = InventorySource::new(&input.subject, config.subject.input_format()?);
    let reference = InventorySource::new(&input.reference, config.reference.input_format()?);

    let mut report = reconcile(subject, reference)?;
    report.meta.job_name = config.name.clone();
    Ok(report)
}
