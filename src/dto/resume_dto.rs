use serde::Deserialize;

use crate::dto::deserialize_string_flexible;
use crate::models::resume::ResumeInfo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItem {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub file_id: String,
    pub file_name: String,
}

impl ResumeItem {
    pub fn into_info(self) -> ResumeInfo {
        ResumeInfo {
            file_id: self.file_id,
            file_name: self.file_name,
        }
    }
}
