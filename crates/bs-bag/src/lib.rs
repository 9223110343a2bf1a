//! bs-bag: item database format, bag import and bulk settings.

pub mod import;
pub mod schema;
pub mod settings;
pub mod validate;

pub use import::{import_bag_items, parse_equipment_json};
pub use schema::*;
pub use settings::{BulkSettings, build_bulk_items_database};
pub use validate::{ValidationError, validate_database, validate_settings};

use std::path::Path;

pub type BagResult<T> = Result<T, BagError>;

#[derive(thiserror::Error, Debug)]
pub enum BagError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot find item with ID {id}")]
    UnknownItem { id: i32 },

    #[error("item with ID {id} not found in database")]
    NotInDatabase { id: i32 },

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> BagResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(BagError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load and validate an item database from a `.json` or `.yaml` file.
pub fn load_database(path: &Path) -> BagResult<ItemDatabase> {
    let content = std::fs::read_to_string(path)?;
    let db: ItemDatabase = match format_of(path)? {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    };
    validate_database(&db)?;
    Ok(db)
}

pub fn save_database(path: &Path, db: &ItemDatabase) -> BagResult<()> {
    validate_database(db)?;
    let content = match format_of(path)? {
        Format::Json => serde_json::to_string_pretty(db)?,
        Format::Yaml => serde_yaml::to_string(db)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Read a bag export file and import it against `db`.
pub fn load_bag(path: &Path, db: &ItemDatabase) -> BagResult<Vec<bs_core::ItemSpec>> {
    let content = std::fs::read_to_string(path)?;
    import_bag_items(&content, db)
}

pub fn load_settings(path: &Path) -> BagResult<BulkSettings> {
    let content = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&content)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &BulkSettings) -> BagResult<()> {
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
