//! # nosh-builder: Menu Builder Editor
//!
//! The restaurant-owner side of Nosh: compose and reorder the menu document
//! through a drag-and-drop tree editor with a live preview mode.
//!
//! ## Modules
//!
//! - [`drag`] - Reorder state machine, closest-center drop targets,
//!   sensor-agnostic [`drag::ReorderHandler`]
//! - [`editor`] - [`editor::MenuBuilder`]: one owned schema, edit operations,
//!   preview/edit mode, the submit gate
//! - [`render`] - Read-only text rendering of a schema for preview
//!
//! ## Example
//! ```rust
//! use nosh_builder::editor::MenuBuilder;
//! use nosh_core::menu::MenuGroup;
//!
//! let mut builder = MenuBuilder::new();
//! builder.add_group(MenuGroup::new("Starters", "11:00", "22:00"));
//! builder.add_group(MenuGroup::new("Mains", "11:00", "22:00"));
//! builder.move_group(1, 0);
//!
//! assert_eq!(builder.schema().menu[0].name, "Mains");
//! ```

pub mod drag;
pub mod editor;
pub mod render;

pub use drag::{DragState, Point, Rect, ReorderHandler};
pub use editor::{MenuBuilder, ViewMode};
