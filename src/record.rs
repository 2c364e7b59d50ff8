use serde::{Deserialize, Serialize};

/// One occurrence record from the GBIF search API. The API omits fields
/// freely, so everything projected downstream is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccurrenceRecord {
    #[serde(rename = "gbifID")]
    pub gbif_id: Option<u64>,
    pub scientific_name: Option<String>,
    pub species: Option<String>,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    pub country: Option<String>,
    pub locality: Option<String>,
    pub event_date: Option<String>,
    pub recorded_by: Option<String>,
    pub institution_code: Option<String>,
    pub collection_code: Option<String>,
    pub catalog_number: Option<String>,
    pub basis_of_record: Option<String>,
    pub license: Option<String>,
    pub publisher: Option<String>,
    pub media: Vec<MediaEntry>,
    pub dataset_key: Option<String>,
    pub publishing_org_key: Option<String>,
}

impl OccurrenceRecord {
    /// Record identifier as a string, or "unknown" when the API omitted it.
    pub fn id_string(&self) -> String {
        self.gbif_id
            .map_or_else(|| String::from("unknown"), |id| id.to_string())
    }
}

/// One media attachment on an occurrence record. Only `identifier` (the
/// image source URL) matters for the download; the rest rides along into
/// the metadata file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaEntry {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub format: Option<String>,
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub created: Option<String>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    pub license: Option<String>,
    pub rights_holder: Option<String>,
    pub references: Option<String>,
}

/// The document written next to each downloaded image: a fixed projection
/// of the record plus the derived download citation. Absent fields stay
/// null in the output, never dropped or renamed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    #[serde(rename = "gbifID")]
    pub gbif_id: Option<u64>,
    pub scientific_name: Option<String>,
    pub species: Option<String>,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    pub country: Option<String>,
    pub locality: Option<String>,
    pub event_date: Option<String>,
    pub recorded_by: Option<String>,
    pub institution_code: Option<String>,
    pub collection_code: Option<String>,
    pub catalog_number: Option<String>,
    pub basis_of_record: Option<String>,
    pub license: Option<String>,
    pub publisher: Option<String>,
    pub media: Vec<MediaEntry>,
    pub citation: String,
    pub dataset_key: Option<String>,
    pub publishing_org_key: Option<String>,
}

impl MetadataDocument {
    pub fn from_record(record: &OccurrenceRecord) -> Self {
        Self {
            gbif_id: record.gbif_id,
            scientific_name: record.scientific_name.clone(),
            species: record.species.clone(),
            decimal_latitude: record.decimal_latitude,
            decimal_longitude: record.decimal_longitude,
            country: record.country.clone(),
            locality: record.locality.clone(),
            event_date: record.event_date.clone(),
            recorded_by: record.recorded_by.clone(),
            institution_code: record.institution_code.clone(),
            collection_code: record.collection_code.clone(),
            catalog_number: record.catalog_number.clone(),
            basis_of_record: record.basis_of_record.clone(),
            license: record.license.clone(),
            publisher: record.publisher.clone(),
            media: record.media.clone(),
            citation: format!(
                "GBIF Occurrence Download https://doi.org/10.15468/dl.{}",
                record.id_string()
            ),
            dataset_key: record.dataset_key.clone(),
            publishing_org_key: record.publishing_org_key.clone(),
        }
    }
}
