//! # Preview Rendering
//!
//! Read-only text rendering of a [`BuilderSchema`] - what the preview mode
//! shows instead of the editable forms. Rendering never mutates the schema;
//! unsupported item versions render nothing rather than erroring.

use nosh_core::menu::{BuilderSchema, HeaderBlock};

/// Renders the whole menu document as display text.
pub fn render_schema(schema: &BuilderSchema) -> String {
    let mut out = String::new();

    for block in &schema.header {
        // Closed sum type: a new block kind must be handled here
        match block {
            HeaderBlock::Heading { heading } => {
                out += &format!("== {} ==\n", heading);
            }
            HeaderBlock::Text { text } => {
                out += &format!("{}\n", text);
            }
        }
    }

    for group in &schema.menu {
        out += &format!("\n{} ({} - {})\n", group.name, group.time_from, group.time_to);

        for item in group.renderable_items() {
            out += &format!(" • {} - {}\n", item.name, item.price);

            if let Some(description) = &item.description {
                out += &format!("   {}\n", description);
            }
            for ingredient in &item.ingredients {
                out += &format!("     + {}\n", ingredient);
            }
        }
    }

    out
}
