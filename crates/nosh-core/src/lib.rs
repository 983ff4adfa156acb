//! # nosh-core: Pure Business Logic for Nosh
//!
//! This crate is the **heart** of the Nosh table-ordering system. It contains
//! the diner's cart session and the restaurant menu schema as pure data types
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Nosh Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Table-Ordering UI / Owner Dashboard            │   │
//! │  │    Menu Cards ──► Nosh Bar ──► Order Submit   Builder Forms     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ nosh-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  session  │  │   menu    │  │ validation│  │   │
//! │  │   │   Money   │  │ OrderSess │  │  Schema   │  │   rules   │  │   │
//! │  │   │   Price   │  │ CartLine  │  │  Groups   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌──────────────────┐  ┌──────▼───────────┐                           │
//! │  │   nosh-builder   │  │   nosh-client    │                           │
//! │  │   (editor)       │  │   (remote API)   │                           │
//! │  └──────────────────┘  └──────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - The diner's order/cart session store
//! - [`menu`] - The menu builder schema (groups, items, header blocks)
//! - [`validation`] - Submit-time schema validation with field paths
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64)
//! 4. **Derived Totals**: Cart totals are always recomputed, never cached
//!
//! ## Example Usage
//!
//! ```rust
//! use nosh_core::money::{Money, Price};
//! use nosh_core::session::{CartLine, OrderSession};
//!
//! let mut session = OrderSession::new();
//! session.add_item(
//!     CartLine::new("soup", "Tomato Soup", Price::new(500, "USD")),
//!     3,
//! );
//!
//! assert_eq!(session.total_items(), 3);
//! assert_eq!(session.total_price(), Money::from_minor(1500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod menu;
pub mod money;
pub mod session;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use nosh_core::Money` instead of
// `use nosh_core::money::Money`.

pub use error::{CoreError, ValidationError};
pub use menu::{BlobImage, BuilderSchema, HeaderBlock, MenuGroup, MenuItem, MenuItemV1};
pub use money::{Money, Price};
pub use session::{CartLine, OrderSession, SessionState, SessionTotals};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of images attached to a single menu item.
///
/// The builder form renders a single image slot per dish; the schema keeps
/// a sequence for forward compatibility but rejects more than one on submit.
pub const MAX_ITEM_IMAGES: usize = 1;

/// Maximum length of a dish or group name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a dish description.
pub const MAX_DESCRIPTION_LEN: usize = 1000;
