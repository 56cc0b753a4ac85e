use std::collections::BTreeMap;

use crate::error::{ReconError, Result};
use crate::model::{Inventory, RawRecord};

/// Largest total an inventory entry may hold; keeps `subject - reference` in `i64`.
pub const MAX_QUANTITY: u64 = i64::MAX as u64;

/// Group records by exact item name and sum their quantities.
pub fn aggregate(records: &[RawRecord]) -> Result<Inventory> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        let total = totals.entry(record.item.clone()).or_insert(0);
        *total = total
            .checked_add(record.quantity)
            .filter(|t| *t <= MAX_QUANTITY)
            .ok_or_else(|| ReconError::Aggregation {
                item: record.item.clone(),
                reason: format!("total quantity exceeds {MAX_QUANTITY} (line {})", record.line),
            })?;
    }

    Ok(Inventory::from_map(totals))
}
