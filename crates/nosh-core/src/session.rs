//! # Order/Cart Session Store
//!
//! Holds the diner's working cart for the duration of one table-ordering
//! visit and exposes mutation operations with derived totals.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Session Operations                             │
//! │                                                                         │
//! │  UI Action                Operation                State Change         │
//! │  ─────────                ─────────                ────────────         │
//! │                                                                         │
//! │  Tap Dish Card ─────────► add_item() ────────────► merge or append     │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ─────► set qty / remove    │
//! │                                                                         │
//! │  Tap Remove ────────────► remove_item() ─────────► drop line (no-op    │
//! │                                                     if absent)         │
//! │                                                                         │
//! │  Tap Clear ─────────────► clear_order() ─────────► items.clear()       │
//! │                                                                         │
//! │  Close Table ───────────► toggle_session() ──────► flip/set flag       │
//! │                                                                         │
//! │  Nosh Bar ──────────────► total_items() /                              │
//! │                           total_price() ─────────► (derived, pure)     │
//! │                                                                         │
//! │  NONE of these operations can fail: they act on in-memory state only.  │
//! │  Totals are never stored; they are recomputed from `items` on every    │
//! │  read so a separately maintained counter can never drift.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A session is created empty when a table's ordering context mounts and
//! dropped when it unmounts. Nothing is persisted.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::menu::MenuItemV1;
use crate::money::{Money, Price};

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the diner's cart.
///
/// ## Invariants
/// - At most one line per dish `id` (adding the same dish merges quantities)
/// - `quantity` is never kept at 0 or below; such updates remove the line
///
/// The price is a snapshot taken when the dish was added. The store itself
/// imposes no quantity upper bound and no price guard; those constraints
/// live at the UI/form boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Dish identity, unique within the cart.
    pub id: String,

    /// Dish name at time of adding.
    pub name: String,

    /// Price snapshot at time of adding.
    pub price: Price,

    /// Quantity in the cart (always >= 1 while the line exists).
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new line with quantity 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        CartLine {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Creates a line from a renderable menu item.
    pub fn from_menu_item(item: &MenuItemV1) -> Self {
        CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price.clone(),
            quantity: 1,
        }
    }

    /// Line total: unit price x quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.amount.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Session
// =============================================================================

/// The diner's order session: the cart plus a "still ordering" flag.
///
/// Scoped to one restaurant+table visit. Owned by exactly one UI subtree;
/// never persisted, never shared between tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSession {
    /// Lines in the cart, in insertion order.
    pub items: Vec<CartLine>,

    /// Whether the table is still actively ordering.
    pub is_session_active: bool,
}

impl OrderSession {
    /// Creates a new empty session.
    pub fn new() -> Self {
        OrderSession {
            items: Vec::new(),
            is_session_active: false,
        }
    }

    /// Adds a dish to the cart, merging by id.
    ///
    /// ## Behavior
    /// - Dish already in cart: its quantity is incremented by `quantity`
    ///   (no upper bound is enforced here)
    /// - Dish not in cart: a new line is appended with that quantity
    pub fn add_item(&mut self, line: CartLine, quantity: i64) {
        if let Some(existing) = self.items.iter_mut().find(|l| l.id == line.id) {
            existing.quantity += quantity;
            return;
        }

        self.items.push(CartLine { quantity, ..line });
    }

    /// Removes the line with the given dish id.
    ///
    /// Removing an id that is not in the cart is a no-op, not an error.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|l| l.id != id);
    }

    /// Replaces the quantity of the line with the given dish id.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to [`remove_item`](Self::remove_item)
    /// - Dish not in cart: no-op
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear_order(&mut self) {
        self.items.clear();
    }

    /// Sets or flips the session-active flag.
    ///
    /// `Some(value)` sets the flag; `None` toggles it.
    pub fn toggle_session(&mut self, decision: Option<bool>) {
        self.is_session_active = decision.unwrap_or(!self.is_session_active);
    }

    // =========================================================================
    // Derived Values
    // =========================================================================
    // Always recomputed from `items`, never cached.

    /// Total quantity across all lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Total price across all lines (sum of amount x quantity).
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|l| l.line_total()).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Session Totals
// =============================================================================

/// Read-only totals summary for the persistent "nosh bar" UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price: Money,
    pub is_session_active: bool,
}

impl From<&OrderSession> for SessionTotals {
    fn from(session: &OrderSession) -> Self {
        SessionTotals {
            line_count: session.line_count(),
            total_items: session.total_items(),
            total_price: session.total_price(),
            is_session_active: session.is_session_active,
        }
    }
}

// =============================================================================
// Scoped Session Holder
// =============================================================================

/// Scoped holder for one table's order session.
///
/// Injected into the cards and the nosh bar of one ordering UI subtree
/// instead of living in an ambient global. Using a session outside its
/// owning subtree is a wiring mistake, not a runtime condition; the holder
/// therefore panics on a poisoned lock rather than surfacing a recoverable
/// error.
///
/// ## Thread Safety
/// All mutations happen on a single logical thread of UI event handling,
/// but the holder may be cloned into event callbacks, so the session is
/// behind `Arc<Mutex<T>>`. Operations are applied atomically relative to
/// re-render (single-writer, read-after-write).
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<OrderSession>>,
}

impl SessionState {
    /// Creates a holder around a fresh empty session.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(OrderSession::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use nosh_core::session::{SessionState, SessionTotals};
    ///
    /// let state = SessionState::new();
    /// let totals = state.with_session(|s| SessionTotals::from(s));
    /// assert_eq!(totals.total_items, 0);
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, amount_minor: i64) -> CartLine {
        CartLine::new(id, format!("Dish {}", id), Price::new(amount_minor, "USD"))
    }

    #[test]
    fn test_add_item_appends_with_quantity() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 2);

        assert_eq!(session.line_count(), 1);
        assert_eq!(session.items[0].quantity, 2);
        assert_eq!(session.total_items(), 2);
    }

    #[test]
    fn test_add_same_dish_merges_quantities() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 2);
        session.add_item(line("soup", 500), 3);

        // One entry with quantity 5, not two entries
        assert_eq!(session.line_count(), 1);
        assert_eq!(session.items[0].quantity, 5);
        assert_eq!(session.total_items(), 5);
    }

    #[test]
    fn test_totals_are_derived_from_items() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 1);
        session.add_item(line("soup", 500), 2);
        session.add_item(line("bread", 250), 4);

        assert_eq!(session.total_items(), 7);
        assert_eq!(session.total_price(), Money::from_minor(3 * 500 + 4 * 250));

        session.update_quantity("bread", 1);
        assert_eq!(session.total_items(), 4);
        assert_eq!(session.total_price(), Money::from_minor(3 * 500 + 250));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 3);

        session.update_quantity("soup", 0);
        assert!(session.is_empty());
        assert_eq!(session.total_items(), 0);

        // Negative quantities remove as well
        session.add_item(line("soup", 500), 3);
        session.update_quantity("soup", -2);
        assert!(session.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 1);

        session.remove_item("not-in-cart");
        assert_eq!(session.line_count(), 1);
        assert_eq!(session.items[0].id, "soup");
    }

    #[test]
    fn test_update_quantity_missing_is_noop() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 1);

        session.update_quantity("not-in-cart", 4);
        assert_eq!(session.line_count(), 1);
        assert_eq!(session.items[0].quantity, 1);
    }

    #[test]
    fn test_clear_order() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 2);
        session.add_item(line("bread", 250), 1);
        session.toggle_session(Some(true));

        session.clear_order();
        assert!(session.is_empty());
        // Clearing the cart does not end the session
        assert!(session.is_session_active);
    }

    #[test]
    fn test_toggle_session() {
        let mut session = OrderSession::new();
        assert!(!session.is_session_active);

        session.toggle_session(None);
        assert!(session.is_session_active);

        session.toggle_session(None);
        assert!(!session.is_session_active);

        session.toggle_session(Some(true));
        assert!(session.is_session_active);

        session.toggle_session(Some(true));
        assert!(session.is_session_active);
    }

    /// The worked example: soup at $5.00, add 1 then 2 more, then remove
    /// via a zero-quantity update.
    #[test]
    fn test_example_scenario() {
        let mut session = OrderSession::new();

        session.add_item(line("soup", 500), 1);
        session.add_item(line("soup", 500), 2);

        assert_eq!(session.line_count(), 1);
        assert_eq!(session.items[0].quantity, 3);
        assert_eq!(session.total_items(), 3);
        assert_eq!(session.total_price(), Money::from_minor(1500));

        session.update_quantity("soup", 0);
        assert!(session.is_empty());
        assert_eq!(session.total_items(), 0);
        assert_eq!(session.total_price(), Money::zero());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut session = OrderSession::new();
        session.add_item(line("a", 100), 1);
        session.add_item(line("b", 100), 1);
        session.add_item(line("c", 100), 1);
        session.add_item(line("a", 100), 1); // merge, must not move "a"

        let ids: Vec<&str> = session.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_session_state_holder() {
        let state = SessionState::new();

        state.with_session_mut(|s| s.add_item(line("soup", 500), 2));
        let totals = state.with_session(|s| SessionTotals::from(s));

        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_price, Money::from_minor(1000));
        assert!(!totals.is_session_active);
    }

    #[test]
    fn test_serde_shape() {
        let mut session = OrderSession::new();
        session.add_item(line("soup", 500), 2);
        session.toggle_session(Some(true));

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["isSessionActive"], serde_json::json!(true));
        assert_eq!(json["items"][0]["id"], serde_json::json!("soup"));
        assert_eq!(json["items"][0]["price"]["amount"], serde_json::json!(500));
    }
}
