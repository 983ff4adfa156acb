//! # Validation Module
//!
//! Submit-time validation of the whole [`BuilderSchema`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Builder forms (frontend)                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate owner feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - whole-document check on explicit submit        │
//! │  ├── Runs before ANY network call                                      │
//! │  ├── Collects every failure with its field path                        │
//! │  └── Never partially applies an edit; the document is untouched        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API (out of scope here)                               │
//! │                                                                         │
//! │  The same invalid document always produces the same ordered error      │
//! │  list - the walk is strictly top-to-bottom through the document.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nosh_core::menu::BuilderSchema;
//! use nosh_core::validation::validate_schema;
//!
//! let schema = BuilderSchema::new();
//! assert!(validate_schema(&schema).is_ok());
//! ```

use std::collections::HashSet;

use chrono::NaiveTime;
use url::Url;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::menu::{BlobImage, BuilderSchema, HeaderBlock, MenuGroup, MenuItemV1};
use crate::{MAX_DESCRIPTION_LEN, MAX_ITEM_IMAGES, MAX_NAME_LEN};

// =============================================================================
// Entry Points
// =============================================================================

/// Validates the whole schema, collecting every per-field failure.
///
/// Unsupported item versions are skipped, matching the renderer: they are
/// opaque payload, not owner input, and must not block a save.
pub fn validate_schema(schema: &BuilderSchema) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (i, block) in schema.header.iter().enumerate() {
        validate_header_block(block, &format!("header[{}]", i), &mut errors);
    }

    for (i, group) in schema.menu.iter().enumerate() {
        validate_group(group, &format!("menu[{}]", i), &mut seen_ids, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Like [`validate_schema`], but folds the failures into one [`CoreError`]
/// for callers that want a single `?`-able result.
pub fn ensure_valid(schema: &BuilderSchema) -> CoreResult<()> {
    validate_schema(schema).map_err(CoreError::SchemaInvalid)
}

// =============================================================================
// Block/Group/Item Rules
// =============================================================================

fn validate_header_block(block: &HeaderBlock, path: &str, errors: &mut Vec<ValidationError>) {
    match block {
        HeaderBlock::Text { text } => {
            require_non_empty(text, &format!("{}.text", path), errors);
            check_max_len(text, MAX_DESCRIPTION_LEN, &format!("{}.text", path), errors);
        }
        HeaderBlock::Heading { heading } => {
            require_non_empty(heading, &format!("{}.heading", path), errors);
            check_max_len(heading, MAX_NAME_LEN, &format!("{}.heading", path), errors);
        }
    }
}

fn validate_group<'a>(
    group: &'a MenuGroup,
    path: &str,
    seen_ids: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    require_non_empty(&group.name, &format!("{}.name", path), errors);
    check_max_len(&group.name, MAX_NAME_LEN, &format!("{}.name", path), errors);

    check_serving_time(&group.time_from, &format!("{}.timeFrom", path), errors);
    check_serving_time(&group.time_to, &format!("{}.timeTo", path), errors);

    for (j, item) in group.items.iter().enumerate() {
        // Unsupported versions are not owner input; skip them
        if let Some(v1) = item.as_v1() {
            validate_item(v1, &format!("{}.items[{}]", path, j), seen_ids, errors);
        }
    }
}

fn validate_item<'a>(
    item: &'a MenuItemV1,
    path: &str,
    seen_ids: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if item.id.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: format!("{}.id", path),
        });
    } else if !seen_ids.insert(item.id.as_str()) {
        // Dish ids are unique across the WHOLE schema, not per group
        errors.push(ValidationError::Duplicate {
            field: format!("{}.id", path),
            value: item.id.clone(),
        });
    }

    require_non_empty(&item.name, &format!("{}.name", path), errors);
    check_max_len(&item.name, MAX_NAME_LEN, &format!("{}.name", path), errors);

    if let Some(description) = &item.description {
        check_max_len(
            description,
            MAX_DESCRIPTION_LEN,
            &format!("{}.description", path),
            errors,
        );
    }

    if item.price.amount.is_negative() {
        errors.push(ValidationError::Negative {
            field: format!("{}.price.amount", path),
        });
    }
    require_non_empty(
        &item.price.currency,
        &format!("{}.price.currency", path),
        errors,
    );

    if item.image.len() > MAX_ITEM_IMAGES {
        errors.push(ValidationError::TooMany {
            field: format!("{}.image", path),
            max: MAX_ITEM_IMAGES,
        });
    }
    for (k, image) in item.image.iter().enumerate() {
        check_image(image, &format!("{}.image[{}]", path, k), errors);
    }
}

// =============================================================================
// Field Checks
// =============================================================================

fn require_non_empty(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
    }
}

fn check_max_len(value: &str, max: usize, field: &str, errors: &mut Vec<ValidationError>) {
    if value.chars().count() > max {
        errors.push(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
}

/// Serving times come from `<input type="time">` and must be 24h "HH:MM".
fn check_serving_time(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
        return;
    }

    if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        errors.push(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a 24h time like 13:30".to_string(),
        });
    }
}

fn check_image(image: &BlobImage, field: &str, errors: &mut Vec<ValidationError>) {
    if image.url.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: format!("{}.url", field),
        });
        return;
    }

    if Url::parse(&image.url).is_err() {
        errors.push(ValidationError::InvalidFormat {
            field: format!("{}.url", field),
            reason: "must be a valid URL".to_string(),
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ItemVersion, MenuItem};
    use crate::money::Price;
    use serde_json::json;

    fn dish(id: &str, name: &str, amount: i64) -> MenuItemV1 {
        MenuItemV1 {
            version: ItemVersion::V1,
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price: Price::new(amount, "USD"),
            ingredients: Vec::new(),
            categories: Vec::new(),
            image: Vec::new(),
        }
    }

    fn schema_with(items: Vec<MenuItemV1>) -> BuilderSchema {
        let mut group = MenuGroup::new("Dinner", "18:00", "22:00");
        group.items = items.into_iter().map(MenuItem::from).collect();
        BuilderSchema {
            header: Vec::new(),
            menu: vec![group],
        }
    }

    #[test]
    fn test_valid_schema_passes() {
        let schema = schema_with(vec![dish("soup", "Tomato Soup", 500)]);
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_missing_item_name_identifies_field() {
        let schema = schema_with(vec![dish("soup", "", 500)]);

        let errors = validate_schema(&schema).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ValidationError::Required {
                field: "menu[0].items[0].name".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_is_deterministic() {
        let schema = schema_with(vec![dish("", "", -100)]);

        let first = validate_schema(&schema).unwrap_err();
        let second = validate_schema(&schema).unwrap_err();
        assert_eq!(first, second);

        let fields: Vec<&str> = first.iter().map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                "menu[0].items[0].id",
                "menu[0].items[0].name",
                "menu[0].items[0].price.amount",
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_across_groups() {
        let mut schema = schema_with(vec![dish("soup", "Tomato Soup", 500)]);
        let mut second = MenuGroup::new("Lunch", "11:00", "14:00");
        second.items.push(dish("soup", "Other Soup", 300).into());
        schema.menu.push(second);

        let errors = validate_schema(&schema).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Duplicate {
                field: "menu[1].items[0].id".to_string(),
                value: "soup".to_string(),
            }]
        );
    }

    #[test]
    fn test_zero_price_is_allowed_negative_is_not() {
        let schema = schema_with(vec![dish("water", "Tap Water", 0)]);
        assert!(validate_schema(&schema).is_ok());

        let schema = schema_with(vec![dish("weird", "Weird", -1)]);
        let errors = validate_schema(&schema).unwrap_err();
        assert!(matches!(errors[0], ValidationError::Negative { .. }));
    }

    #[test]
    fn test_serving_time_format() {
        let mut schema = schema_with(vec![dish("soup", "Soup", 500)]);
        schema.menu[0].time_from = "6pm".to_string();

        let errors = validate_schema(&schema).unwrap_err();
        assert_eq!(errors[0].field(), "menu[0].timeFrom");
        assert!(matches!(errors[0], ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_image_url_and_count() {
        let good = BlobImage {
            url: "https://blobs.example.com/soup.webp".to_string(),
            pathname: None,
            content_type: None,
        };
        let bad = BlobImage {
            url: "not a url".to_string(),
            pathname: None,
            content_type: None,
        };

        let mut item = dish("soup", "Soup", 500);
        item.image = vec![good.clone()];
        assert!(validate_schema(&schema_with(vec![item.clone()])).is_ok());

        item.image = vec![bad];
        let errors = validate_schema(&schema_with(vec![item.clone()])).unwrap_err();
        assert_eq!(errors[0].field(), "menu[0].items[0].image[0].url");

        item.image = vec![good.clone(), good];
        let errors = validate_schema(&schema_with(vec![item])).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::TooMany { max: 1, .. }
        ));
    }

    #[test]
    fn test_unsupported_versions_do_not_block_submit() {
        let mut schema = schema_with(vec![dish("soup", "Soup", 500)]);
        schema.menu[0].items.push(MenuItem::Unsupported(json!({
            "version": "v9", "name": ""
        })));

        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_header_blocks() {
        let mut schema = BuilderSchema::new();
        schema.header = vec![
            HeaderBlock::Heading {
                heading: "Welcome".to_string(),
            },
            HeaderBlock::Text {
                text: "   ".to_string(),
            },
        ];

        let errors = validate_schema(&schema).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Required {
                field: "header[1].text".to_string()
            }]
        );
    }

    #[test]
    fn test_ensure_valid_folds_errors() {
        let schema = schema_with(vec![dish("soup", "", 500)]);
        let err = ensure_valid(&schema).unwrap_err();
        assert!(matches!(err, CoreError::SchemaInvalid(ref errs) if errs.len() == 1));
    }
}
