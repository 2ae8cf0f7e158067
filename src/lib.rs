//! Consolidate heterogeneous brokerage portfolio exports into one
//! holdings table.
//!
//! Inputs (spreadsheet, delimited text, tabular PDF) are extracted into
//! raw cell grids, normalized onto the canonical field set, aggregated,
//! reconciled per symbol (summed quantity, weighted-average cost,
//! mark-to-market value), and projected into the requested export shape.

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod project;
pub mod reconcile;
pub mod writers;
