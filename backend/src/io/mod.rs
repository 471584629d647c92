//! # IO Module
//!
//! The boundary between the picker's domain logic and whatever draws it.
//!
//! The domain layer produces [`shared::Sheet`] values and a
//! [`crate::domain::PickerState`]; this layer turns them into a virtual DOM
//! tree the host can serialize to HTML or patch into a live document. Events
//! travel the other way as `data-subject` / `data-value` attribute pairs.
//!
//! ## Module Organization
//!
//! - **vdom**: Element/text nodes, positional diff, patch application, HTML output
//! - **sheet_view**: Markup for sheets, time panels and the picker as a whole

pub mod sheet_view;
pub mod vdom;

pub use sheet_view::{render_picker, render_sheet, render_state, render_time_panel};
pub use vdom::{apply_patches, diff, h, render_to_string, text, Patch, VElement, VNode};
