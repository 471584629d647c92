//! # Date Picker Backend
//!
//! Calendar sheets, locale formatting and the selection state machine of a
//! date picker, plus a small virtual DOM to render them.
//!
//! ## Architecture
//!
//! ```text
//! Host (DOM events, data-* attributes)
//!     ↓
//! IO Layer (vdom, sheet_view)
//!     ↓
//! Domain Layer (controller, calendar, locale, value codec)
//! ```
//!
//! Configuration lives in [`config`], logging setup for binaries in
//! [`logging`]. The data model shared with other crates is in `shared`.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;

pub use domain::{ControllerOptions, DatePickerController, PickerState};
pub use error::{PickerError, PickerResult};
