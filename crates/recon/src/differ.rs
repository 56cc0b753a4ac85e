use std::cmp::Ordering;

use crate::model::{Inventory, ReconRow, ReconTable};

/// Outer join two inventories on item name. Absent sides count as zero.
///
/// Both inventories iterate in ascending item order, so the join is a single
/// merge pass and the output is already sorted.
pub fn diff(subject: &Inventory, reference: &Inventory) -> ReconTable {
    let mut rows = Vec::with_capacity(subject.len().max(reference.len()));
    let mut left = subject.iter().peekable();
    let mut right = reference.iter().peekable();

    loop {
        let order = match (left.peek(), right.peek()) {
            (Some((l, _)), Some((r, _))) => l.cmp(r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };

        let (item, subject_qty, reference_qty) = match order {
            Ordering::Less => {
                let Some((item, qty)) = left.next() else { break };
                (item, qty, 0)
            }
            Ordering::Greater => {
                let Some((item, qty)) = right.next() else { break };
                (item, 0, qty)
            }
            Ordering::Equal => {
                let (Some((item, s)), Some((_, r))) = (left.next(), right.next()) else { break };
                (item, s, r)
            }
        };

        rows.push(row(item, subject_qty, reference_qty));
    }

    ReconTable::from_sorted(rows)
}

fn row(item: &str, subject_qty: u64, reference_qty: u64) -> ReconRow {
    // Inventory totals are capped at i64::MAX, so neither cast truncates and
    // the subtraction cannot overflow.
    ReconRow {
        item: item.to_string(),
        subject_qty,
        reference_qty,
        diff: subject_qty as i64 - reference_qty as i64,
    }
}
