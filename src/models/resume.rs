use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInfo {
    pub file_id: String,
    pub file_name: String,
}
