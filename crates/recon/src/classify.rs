use crate::model::{ReconRow, ReconTable, SummaryViews, ViewKind, ViewRow};

/// Which view a row belongs to, by the sign of its diff.
pub fn view_for(row: &ReconRow) -> ViewKind {
    match row.diff {
        0 => ViewKind::Correct,
        d if d < 0 => ViewKind::Missing,
        _ => ViewKind::Extra,
    }
}

/// Partition a reconciliation table into Correct / Missing / Extra.
///
/// Every row lands in exactly one view; table order is preserved within each.
pub fn classify(table: &ReconTable) -> SummaryViews {
    let mut views = SummaryViews::default();

    for row in table.rows() {
        let (bucket, quantity) = match view_for(row) {
            ViewKind::Correct => (&mut views.correct, row.subject_qty),
            ViewKind::Missing => (&mut views.missing, row.diff.unsigned_abs()),
            ViewKind::Extra => (&mut views.extra, row.diff.unsigned_abs()),
        };
        bucket.push(ViewRow {
            item: row.item.clone(),
            quantity,
        });
    }

    views
}
