//! View-state synchronization between the store and displayed panels.
//!
//! # Responsibility
//! - Turn repository reads into display rows with their action affordances.
//! - Rebuild a panel's items from scratch on every refresh.
//!
//! # Invariants
//! - `refresh` always clears the view before rendering; no stale row survives.
//! - Rows are rendered in query order (newest first).
//! - Full rebuild is O(n) per refresh; there is no incremental diffing.

pub mod rows;
pub mod sync;

pub use rows::{Affordance, ListCard, TaskDetails, TaskRow, ViewItem};
pub use sync::{RenderedViews, ViewKey, ViewSink, ViewSynchronizer};
