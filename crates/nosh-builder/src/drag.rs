//! # Drag-and-Drop Reorder State Machine
//!
//! Sensor-agnostic reordering for one list at a time (the groups list, or
//! the items-within-a-group list).
//!
//! ## State Machine (per list being reordered)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Drag State Machine                                │
//! │                                                                         │
//! │                 pointer-down / keyboard-activate                        │
//! │                        over a drag handle                               │
//! │       ┌──────┐ ───────────────────────────────► ┌──────────┐           │
//! │       │ Idle │                                  │ Dragging │           │
//! │       └──────┘ ◄─────────────────────────────── └──────────┘           │
//! │                  drop (reorder if target differs)                       │
//! │                  cancel (escape / outside target: unchanged)            │
//! │                                                                         │
//! │  Drop target resolution: closest-center heuristic                       │
//! │  ──────────────────────────────────────────────                         │
//! │  Compare the pointer position against the bounding-box CENTER of every  │
//! │  slot; the slot whose center is nearest wins. Ties resolve to the       │
//! │  lowest index so a drop is deterministic.                               │
//! │                                                                         │
//! │  A reorder is a SINGLE-ELEMENT MOVE: remove from origin, reinsert at    │
//! │  target. The relative order of all other elements is preserved.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The input sensor (pointer events, keyboard arrows) lives in the frontend.
//! Both paths end in [`ReorderHandler::on_reorder`], so pointer and keyboard
//! share one reducer.

use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Geometry
// =============================================================================

/// A point in list coordinate space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The bounding box of one list slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Resolves the drop target: the slot whose center is nearest the pointer.
///
/// Returns `None` for an empty slot list (drop outside any valid target).
/// Ties resolve to the lowest index.
pub fn closest_center(pointer: Point, slots: &[Rect]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, slot) in slots.iter().enumerate() {
        let distance = pointer.distance_to(slot.center());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

// =============================================================================
// Reorder Handler
// =============================================================================

/// The single reducer both input paths feed into.
///
/// Implementors apply a single-element move from `origin` to `target`.
/// Called only when `origin != target`.
pub trait ReorderHandler {
    fn on_reorder(&mut self, origin: usize, target: usize);
}

/// Moves one element of `list` from `from` to `to`, preserving the relative
/// order of everything else.
///
/// Out-of-range indices and `from == to` are no-ops.
pub fn move_element<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= list.len() || to >= list.len() {
        return;
    }

    let element = list.remove(from);
    list.insert(to, element);
}

// =============================================================================
// Drag State
// =============================================================================

/// Where a drag interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,

    /// An element is being dragged from `origin`.
    Dragging { origin: usize },
}

/// Drives one list's drag interaction.
///
/// The controller owns only the interaction state; the list itself lives in
/// the editor and is mutated through a [`ReorderHandler`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// `idle -> dragging` on pointer-down or keyboard-activate over a handle.
    ///
    /// Activating while already dragging restarts from the new origin.
    pub fn activate(&mut self, origin: usize) {
        self.state = DragState::Dragging { origin };
    }

    /// `dragging -> idle` on drop at a pointer position.
    ///
    /// Resolves the target via [`closest_center`] and applies the reorder if
    /// the target differs from the origin. Returns the applied
    /// `(origin, target)` pair, or `None` when nothing moved.
    pub fn drop_at<H: ReorderHandler>(
        &mut self,
        pointer: Point,
        slots: &[Rect],
        handler: &mut H,
    ) -> Option<(usize, usize)> {
        let target = closest_center(pointer, slots);
        match target {
            Some(target) => self.drop_on(target, handler),
            None => {
                // Dropped outside any valid target: treated as cancel
                self.cancel();
                None
            }
        }
    }

    /// `dragging -> idle` on drop at a known target index.
    ///
    /// This is the keyboard path: the frontend computes the target from
    /// arrow keys and drops directly, sharing the reducer with the pointer
    /// path. No-op guard: origin == target leaves the list unchanged.
    pub fn drop_on<H: ReorderHandler>(
        &mut self,
        target: usize,
        handler: &mut H,
    ) -> Option<(usize, usize)> {
        let DragState::Dragging { origin } = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        if origin == target {
            return None;
        }

        debug!(origin, target, "applying reorder");
        handler.on_reorder(origin, target);
        Some((origin, target))
    }

    /// `dragging -> idle` on cancel (escape key, drop outside any target).
    /// The sequence is left unchanged.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Three vertically stacked 100x40 slots, like a group list.
    fn stacked_slots() -> Vec<Rect> {
        vec![
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(0.0, 40.0, 100.0, 40.0),
            Rect::new(0.0, 80.0, 100.0, 40.0),
        ]
    }

    struct VecHandler(Vec<&'static str>);

    impl ReorderHandler for VecHandler {
        fn on_reorder(&mut self, origin: usize, target: usize) {
            move_element(&mut self.0, origin, target);
        }
    }

    #[test]
    fn test_closest_center_picks_nearest() {
        let slots = stacked_slots();

        assert_eq!(closest_center(Point::new(50.0, 10.0), &slots), Some(0));
        assert_eq!(closest_center(Point::new(50.0, 61.0), &slots), Some(1));
        assert_eq!(closest_center(Point::new(50.0, 118.0), &slots), Some(2));
    }

    #[test]
    fn test_closest_center_tie_is_lowest_index() {
        let slots = stacked_slots();
        // y=40 is equidistant from the centers of slot 0 (20) and slot 1 (60)
        assert_eq!(closest_center(Point::new(50.0, 40.0), &slots), Some(0));
    }

    #[test]
    fn test_closest_center_empty_is_none() {
        assert_eq!(closest_center(Point::new(0.0, 0.0), &[]), None);
    }

    #[test]
    fn test_move_element_single_move() {
        let mut list = vec!["a", "b", "c", "d"];
        move_element(&mut list, 3, 1);
        assert_eq!(list, vec!["a", "d", "b", "c"]);

        move_element(&mut list, 0, 3);
        assert_eq!(list, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_element_noop_cases() {
        let mut list = vec!["a", "b", "c"];
        move_element(&mut list, 1, 1);
        assert_eq!(list, vec!["a", "b", "c"]);

        move_element(&mut list, 5, 0);
        assert_eq!(list, vec!["a", "b", "c"]);

        move_element(&mut list, 0, 5);
        assert_eq!(list, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drop_reorders_c_onto_a() {
        let mut handler = VecHandler(vec!["A", "B", "C"]);
        let mut controller = DragController::new();
        let slots = stacked_slots();

        // Drag C (index 2) onto A's position
        controller.activate(2);
        let applied = controller.drop_at(Point::new(50.0, 15.0), &slots, &mut handler);

        assert_eq!(applied, Some((2, 0)));
        assert_eq!(handler.0, vec!["C", "A", "B"]);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_onto_self_is_noop() {
        let mut handler = VecHandler(vec!["A", "B", "C"]);
        let mut controller = DragController::new();
        let slots = stacked_slots();

        controller.activate(0);
        let applied = controller.drop_at(Point::new(50.0, 15.0), &slots, &mut handler);

        assert_eq!(applied, None);
        assert_eq!(handler.0, vec!["A", "B", "C"]);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cancel_leaves_sequence_unchanged() {
        let mut handler = VecHandler(vec!["A", "B", "C"]);
        let mut controller = DragController::new();

        controller.activate(2);
        assert!(controller.is_dragging());
        controller.cancel();

        assert_eq!(handler.0, vec!["A", "B", "C"]);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_outside_targets_cancels() {
        let mut handler = VecHandler(vec!["A", "B", "C"]);
        let mut controller = DragController::new();

        controller.activate(1);
        let applied = controller.drop_at(Point::new(50.0, 15.0), &[], &mut handler);

        assert_eq!(applied, None);
        assert_eq!(handler.0, vec!["A", "B", "C"]);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_keyboard_path_shares_reducer() {
        let mut handler = VecHandler(vec!["A", "B", "C"]);
        let mut controller = DragController::new();

        // Keyboard: activate on B, arrow-down once, drop
        controller.activate(1);
        let applied = controller.drop_on(2, &mut handler);

        assert_eq!(applied, Some((1, 2)));
        assert_eq!(handler.0, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let mut handler = VecHandler(vec!["A", "B"]);
        let mut controller = DragController::new();

        assert_eq!(controller.drop_on(1, &mut handler), None);
        assert_eq!(handler.0, vec!["A", "B"]);
    }
}
