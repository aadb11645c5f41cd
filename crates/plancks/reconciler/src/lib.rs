//! Plancks Reconciler - Replica counts from observed cluster state
//!
//! Folds three independently listed collections (services, nodes, tasks)
//! into one [`ServiceState`] per replicated service. The computation is pure:
//! no I/O, no shared state, linear in the size of its inputs.
//!
//! ## Passes
//!
//! 1. [`ActiveNodes`]: ids of nodes that are not down
//! 2. [`ReplicaTally`]: per-service running and non-shutdown counters
//! 3. Emission: one record per replicated service
//!
//! Each pass completes before the next one starts.
//!
//! [`ServiceState`]: plancks_types::ServiceState

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod nodes;
pub mod reconcile;
pub mod tally;

pub use nodes::ActiveNodes;
pub use reconcile::{reconcile, reconcile_detailed, Reconciliation};
pub use tally::ReplicaTally;
