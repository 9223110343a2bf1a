//! Item database and bulk settings validation.

use crate::schema::ItemDatabase;
use crate::settings::BulkSettings;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: i32, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: i32, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_database(db: &ItemDatabase) -> Result<(), ValidationError> {
    let mut item_ids = HashSet::new();
    for item in &db.items {
        if item.id <= 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("item '{}' id", item.name),
                value: item.id.to_string(),
                reason: "item ids must be positive".to_string(),
            });
        }
        if !item_ids.insert(item.id) {
            return Err(ValidationError::DuplicateId {
                id: item.id,
                context: "items".to_string(),
            });
        }
    }

    let mut enchant_ids = HashSet::new();
    for enchant in &db.enchants {
        if !enchant_ids.insert(enchant.effect_id) {
            return Err(ValidationError::DuplicateId {
                id: enchant.effect_id,
                context: "enchants".to_string(),
            });
        }
    }

    let mut gem_ids = HashSet::new();
    for gem in &db.gems {
        if !gem_ids.insert(gem.id) {
            return Err(ValidationError::DuplicateId {
                id: gem.id,
                context: "gems".to_string(),
            });
        }
    }

    Ok(())
}

/// Check settings against the database they will be simulated with.
pub fn validate_settings(settings: &BulkSettings, db: &ItemDatabase) -> Result<(), ValidationError> {
    if settings.iterations_per_combo == 0 {
        return Err(ValidationError::InvalidValue {
            field: "iterations_per_combo".to_string(),
            value: "0".to_string(),
            reason: "at least one iteration per combination is required".to_string(),
        });
    }

    for (index, spec) in settings.items.iter().enumerate() {
        if !db.has_item(spec.id) {
            return Err(ValidationError::MissingReference {
                id: spec.id,
                context: format!("bulk item #{index}"),
            });
        }
    }

    Ok(())
}
