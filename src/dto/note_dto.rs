use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::deserialize_string_flexible;
use crate::models::note::Note;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Raw(String),
}

impl TagsField {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsField::List(tags) => tags,
            TagsField::Raw(raw) => raw
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub application_id: String,
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsField>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl NoteItem {
    pub fn into_note(self) -> Note {
        Note {
            id: self.id,
            application_id: self.application_id,
            content: self.content,
            title: self.title.unwrap_or_default(),
            tags: self.tags.map(TagsField::into_tags).unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub application_id: i64,
    #[validate(length(min = 1))]
    pub content: String,
    pub title: String,
    pub tags: Vec<String>,
}
