//! Snapshot selection, account scoping, aggregation and deltas.
//!
//! Everything in here is a pure function over immutable records: no I/O, no
//! shared state, and no failure path. Bad inputs degrade to zeros.

pub mod aggregate;
pub mod delta;
pub mod filter;
pub mod kpi;
pub mod ranking;
pub mod snapshot;
pub mod types;
pub mod utility;
