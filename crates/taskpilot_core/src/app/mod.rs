//! Headless UI handler layer for the five-panel window.
//!
//! # Responsibility
//! - Validate user input, call repositories, and re-synchronize views.
//! - Translate failures into transient notifications or inline text.
//! - Dispatch AI requests to background workers and apply their results on
//!   the UI thread.
//!
//! # Invariants
//! - Nothing here propagates an error to the caller; every outcome becomes UI
//!   state.
//! - `AppState` is mutated only on the thread that owns the controller.

mod controller;
pub mod notification;
pub mod panel;

pub use controller::{AppController, AppState};
pub use notification::{Notification, NotificationBanner, NotificationLevel};
pub use panel::{Appearance, Panel};
