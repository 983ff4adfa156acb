//! # Menu Builder Editor
//!
//! Owns one [`BuilderSchema`] for one restaurant's management session and
//! exposes the editing operations the builder UI drives.
//!
//! ## Editor Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Menu Builder Flow                                │
//! │                                                                         │
//! │  load from API ──► MenuBuilder::from_schema(schema)                     │
//! │                           │                                             │
//! │        edit ops ──────────┤  add/remove/rename groups & dishes          │
//! │        drag ops ──────────┤  move_group / move_item (ReorderHandler)    │
//! │        mode toggle ───────┤  Edit ⇄ Preview (never mutates the schema)  │
//! │                           │                                             │
//! │                           ▼                                             │
//! │                      validate()  ◄── the submit gate, runs before any   │
//! │                      │       │       network call                       │
//! │             Ok ◄─────┘       └─────► per-field errors, submit blocked   │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   nosh-client PUT (all-or-nothing; a rejected submit keeps the          │
//! │   in-progress schema so the owner can retry without re-entering data)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is a whole-new-collection replacement of one list, so a
//! failure partway through is impossible; no operation leaves the document
//! partially edited.

use nosh_core::error::ValidationError;
use nosh_core::menu::{BuilderSchema, HeaderBlock, ItemVersion, MenuGroup, MenuItem, MenuItemV1};
use nosh_core::money::Price;
use nosh_core::validation::validate_schema;
use tracing::debug;
use uuid::Uuid;

use crate::drag::{move_element, ReorderHandler};

// =============================================================================
// View Mode
// =============================================================================

/// Whether the builder renders editable forms or the read-only preview.
///
/// Independent of drag state; toggling never mutates the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
}

// =============================================================================
// Menu Builder
// =============================================================================

/// The menu builder: one schema, one view mode, scoped to one restaurant's
/// management UI tree.
#[derive(Debug, Clone, Default)]
pub struct MenuBuilder {
    schema: BuilderSchema,
    mode: ViewMode,
}

impl MenuBuilder {
    /// Starts an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a schema fetched from the remote API.
    pub fn from_schema(schema: BuilderSchema) -> Self {
        MenuBuilder {
            schema,
            mode: ViewMode::Edit,
        }
    }

    /// The document being edited.
    pub fn schema(&self) -> &BuilderSchema {
        &self.schema
    }

    /// Consumes the builder, handing the document to the submit path.
    pub fn into_schema(self) -> BuilderSchema {
        self.schema
    }

    // =========================================================================
    // View Mode
    // =========================================================================

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_preview(&self) -> bool {
        self.mode == ViewMode::Preview
    }

    /// Flips between the editable form view and the read-only preview of
    /// the same underlying data.
    pub fn toggle_preview(&mut self) {
        self.mode = match self.mode {
            ViewMode::Edit => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        };
    }

    // =========================================================================
    // Header Blocks
    // =========================================================================

    pub fn add_header_block(&mut self, block: HeaderBlock) {
        self.schema.header.push(block);
    }

    pub fn remove_header_block(&mut self, index: usize) -> Option<HeaderBlock> {
        if index < self.schema.header.len() {
            Some(self.schema.header.remove(index))
        } else {
            None
        }
    }

    // =========================================================================
    // Groups
    // =========================================================================

    pub fn add_group(&mut self, group: MenuGroup) {
        debug!(name = %group.name, "adding menu group");
        self.schema.menu.push(group);
    }

    pub fn remove_group(&mut self, index: usize) -> Option<MenuGroup> {
        if index < self.schema.menu.len() {
            Some(self.schema.menu.remove(index))
        } else {
            None
        }
    }

    /// Moves a group from `from` to `to`; other groups keep their relative
    /// order. Out-of-range indices and `from == to` are no-ops.
    pub fn move_group(&mut self, from: usize, to: usize) {
        move_element(&mut self.schema.menu, from, to);
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Creates a fresh dish with a generated unique id and appends it to
    /// the group. Returns the new id, or `None` for an unknown group.
    pub fn new_item(
        &mut self,
        group: usize,
        name: impl Into<String>,
        price: Price,
    ) -> Option<String> {
        let id = Uuid::new_v4().to_string();
        let item = MenuItemV1 {
            version: ItemVersion::V1,
            id: id.clone(),
            name: name.into(),
            description: None,
            price,
            ingredients: Vec::new(),
            categories: Vec::new(),
            image: Vec::new(),
        };
        self.add_item(group, item)?;
        Some(id)
    }

    /// Appends an existing dish to a group. Returns `None` for an unknown
    /// group index.
    pub fn add_item(&mut self, group: usize, item: MenuItemV1) -> Option<()> {
        let group = self.schema.menu.get_mut(group)?;
        group.items.push(MenuItem::V1(item));
        Some(())
    }

    pub fn remove_item(&mut self, group: usize, index: usize) -> Option<MenuItem> {
        let group = self.schema.menu.get_mut(group)?;
        if index < group.items.len() {
            Some(group.items.remove(index))
        } else {
            None
        }
    }

    /// Applies an edit to one dish in place. Returns `None` when the slot
    /// does not exist or holds an unsupported version.
    pub fn edit_item<F>(&mut self, group: usize, index: usize, edit: F) -> Option<()>
    where
        F: FnOnce(&mut MenuItemV1),
    {
        let item = self
            .schema
            .menu
            .get_mut(group)?
            .items
            .get_mut(index)?
            .as_v1_mut()?;
        edit(item);
        Some(())
    }

    /// Moves a dish within its group from `from` to `to`.
    pub fn move_item(&mut self, group: usize, from: usize, to: usize) {
        if let Some(group) = self.schema.menu.get_mut(group) {
            move_element(&mut group.items, from, to);
        }
    }

    // =========================================================================
    // Reorder Seams
    // =========================================================================

    /// Reorder seam for the groups list; hand this to a `DragController`.
    pub fn groups_handler(&mut self) -> GroupsHandler<'_> {
        GroupsHandler { builder: self }
    }

    /// Reorder seam for one group's item list.
    pub fn items_handler(&mut self, group: usize) -> ItemsHandler<'_> {
        ItemsHandler {
            builder: self,
            group,
        }
    }

    // =========================================================================
    // Submit Gate
    // =========================================================================

    /// Validates the whole document against its declared shape.
    ///
    /// Runs on explicit submit only, never on every edit, and always before
    /// any network call. Failures block submission; the in-progress schema
    /// is retained either way.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_schema(&self.schema)
    }
}

/// [`ReorderHandler`] over the groups list.
pub struct GroupsHandler<'a> {
    builder: &'a mut MenuBuilder,
}

impl ReorderHandler for GroupsHandler<'_> {
    fn on_reorder(&mut self, origin: usize, target: usize) {
        self.builder.move_group(origin, target);
    }
}

/// [`ReorderHandler`] over one group's item list.
pub struct ItemsHandler<'a> {
    builder: &'a mut MenuBuilder,
    group: usize,
}

impl ReorderHandler for ItemsHandler<'_> {
    fn on_reorder(&mut self, origin: usize, target: usize) {
        self.builder.move_item(self.group, origin, target);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
