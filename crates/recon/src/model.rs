use std::collections::BTreeMap;

use serde::Serialize;

use crate::parse::InputFormat;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One parsed line of an inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub item: String,
    pub quantity: u64,
    /// 1-based source line number.
    pub line: usize,
}

impl RawRecord {
    pub fn new(item: impl Into<String>, quantity: u64, line: usize) -> Self {
        Self {
            item: item.into(),
            quantity,
            line,
        }
    }
}

/// Raw text plus the layout it is written in.
#[derive(Debug, Clone, Copy)]
pub struct InventorySource<'a> {
    pub text: &'a str,
    pub format: InputFormat,
}

impl<'a> InventorySource<'a> {
    pub fn new(text: &'a str, format: InputFormat) -> Self {
        Self { text, format }
    }
}

/// Pre-loaded text of both sides of a job.
#[derive(Debug, Clone)]
pub struct ReconInput {
    pub subject: String,
    pub reference: String,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Item name → total quantity. One entry per distinct item, ascending order.
///
/// Only built by [`crate::aggregate::aggregate`], which guarantees every
/// total fits in an `i64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, u64>,
}

impl Inventory {
    pub(crate) fn from_map(items: BTreeMap<String, u64>) -> Self {
        Self { items }
    }

    pub fn get(&self, item: &str) -> Option<u64> {
        self.items.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn total_units(&self) -> u64 {
        self.items.values().fold(0u64, |acc, q| acc.saturating_add(*q))
    }

    /// Flatten back to one record per item. Line numbers are positional.
    pub fn to_records(&self) -> Vec<RawRecord> {
        self.iter()
            .enumerate()
            .map(|(i, (item, qty))| RawRecord::new(item, qty, i + 1))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconRow {
    pub item: String,
    pub subject_qty: u64,
    pub reference_qty: u64,
    /// `subject_qty - reference_qty`
    pub diff: i64,
}

/// Outer join of two inventories, sorted by item name ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReconTable {
    rows: Vec<ReconRow>,
}

impl ReconTable {
    pub(crate) fn from_sorted(rows: Vec<ReconRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].item < w[1].item));
        Self { rows }
    }

    pub fn rows(&self) -> &[ReconRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, item: &str) -> Option<&ReconRow> {
        self.rows
            .binary_search_by(|r| r.item.as_str().cmp(item))
            .ok()
            .map(|i| &self.rows[i])
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Correct,
    Missing,
    Extra,
}

impl ViewKind {
    /// Render order.
    pub const ALL: [ViewKind; 3] = [ViewKind::Correct, ViewKind::Missing, ViewKind::Extra];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Correct => "Correct Items",
            Self::Missing => "Missing Items",
            Self::Extra => "Extra Items",
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Missing => write!(f, "missing"),
            Self::Extra => write!(f, "extra"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    pub item: String,
    pub quantity: u64,
}

/// The three disjoint views of a reconciliation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryViews {
    pub correct: Vec<ViewRow>,
    pub missing: Vec<ViewRow>,
    pub extra: Vec<ViewRow>,
}

impl SummaryViews {
    pub fn get(&self, kind: ViewKind) -> &[ViewRow] {
        match kind {
            ViewKind::Correct => &self.correct,
            ViewKind::Missing => &self.missing,
            ViewKind::Extra => &self.extra,
        }
    }

    /// Views in render order, each paired with its kind.
    pub fn iter(&self) -> impl Iterator<Item = (ViewKind, &[ViewRow])> {
        ViewKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total_items: usize,
    pub correct: usize,
    pub missing: usize,
    pub extra: usize,
    pub missing_units: u64,
    pub extra_units: u64,
}

impl ReconSummary {
    /// True when the subject holds exactly the reference.
    pub fn is_reconciled(&self) -> bool {
        self.missing == 0 && self.extra == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    pub subject_format: InputFormat,
    pub reference_format: InputFormat,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub table: ReconTable,
    pub views: SummaryViews,
}

impl ReconReport {
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
