pub mod application_dto;
pub mod auth_dto;
pub mod note_dto;
pub mod resume_dto;

use serde::{Deserialize, Deserializer};

/// Older backend snapshots emit numeric ids where newer ones emit strings.
pub(crate) fn deserialize_string_flexible<'de, D>(
    deserializer: D,
) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Int(i64),
        Str(String),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(value) => Ok(value.to_string()),
        StringOrInt::Str(value) => Ok(value),
    }
}
