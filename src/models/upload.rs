use serde::{Deserialize, Serialize};

/// What an upload row represents for its batch
///
/// The tag replaces the nullable cycle/prediction columns of a single flat
/// row shape: an initial reference image carries neither, a comparison
/// image always carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UploadKind {
    /// The reference image a batch starts with
    Initial,
    /// A later image compared against the batch's initial image
    Comparison {
        cycle_number: String,
        predicted_value: f64,
    },
}

/// Image upload record stored in redb
///
/// Rows are created once and never mutated or deleted. A comparison row
/// copies batch_number and powder_type from its initial row at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Owning user id
    pub user_id: u64,
    pub batch_number: String,
    pub powder_type: String,
    /// Sanitized filename under the upload directory
    pub image_path: String,
    /// When the upload was created (Unix timestamp)
    pub created_at: i64,
    pub kind: UploadKind,
}

impl UploadRecord {
    pub fn is_initial(&self) -> bool {
        matches!(self.kind, UploadKind::Initial)
    }

    pub fn cycle_number(&self) -> Option<&str> {
        match &self.kind {
            UploadKind::Initial => None,
            UploadKind::Comparison { cycle_number, .. } => Some(cycle_number),
        }
    }

    pub fn predicted_value(&self) -> Option<f64> {
        match &self.kind {
            UploadKind::Initial => None,
            UploadKind::Comparison {
                predicted_value, ..
            } => Some(*predicted_value),
        }
    }
}

/// JSON view of an upload row for page responses
///
/// Flattens the kind tag back into the optional fields the external
/// surface exposes.
#[derive(Debug, Clone, Serialize)]
pub struct UploadView {
    pub id: u64,
    pub user_id: u64,
    pub batch_number: String,
    pub powder_type: String,
    pub image_path: String,
    pub cycle_number: Option<String>,
    pub predicted_value: Option<f64>,
}

impl UploadView {
    pub fn from_record(id: u64, record: &UploadRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            batch_number: record.batch_number.clone(),
            powder_type: record.powder_type.clone(),
            image_path: record.image_path.clone(),
            cycle_number: record.cycle_number().map(str::to_string),
            predicted_value: record.predicted_value(),
        }
    }
}
