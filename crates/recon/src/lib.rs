//! `fitdiff-recon`: inventory reconciliation engine.
//!
//! Pure engine crate: receives inventory text, returns classified results.
//! No CLI dependencies; file access is limited to loading job inputs.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod differ;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod model;
pub mod parse;

pub use aggregate::aggregate;
pub use classify::classify;
pub use config::ReconConfig;
pub use differ::diff;
pub use engine::{load_inventory, reconcile, run};
pub use error::ReconError;
pub use model::{
    Inventory, InventorySource, RawRecord, ReconInput, ReconReport, ReconRow, ReconSummary,
    ReconTable, SummaryViews, ViewKind, ViewRow,
};
pub use parse::{parse, parse_records, InputFormat};
