//! Transformation module.
//!
//! - Reconcile: left join on SKU and GTIN replacement
//! - Project: reconciled rows to the import schema
//! - Pipeline: the end-to-end run

pub mod pipeline;
pub mod project;
pub mod reconcile;

pub use pipeline::*;
pub use project::prepare_output;
pub use reconcile::*;
