use crate::error::Error;
use crate::record::{MetadataDocument, OccurrenceRecord};
use log::info;
use std::fs;
use std::path::Path;

/// Write the metadata and citation document for one record as indented
/// JSON, creating parent directories as needed and overwriting any
/// previous file.
pub fn save_metadata(record: &OccurrenceRecord, save_path: &Path) -> Result<(), Error> {
    let document = MetadataDocument::from_record(record);

    if let Some(parent) = save_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&document)?;
    fs::write(save_path, json)?;

    info!("Metadata written for record {}", record.id_string());
    println!("Metadata saved to {}", save_path.display());

    Ok(())
}
