use async_trait::async_trait;
use reqwest::Client;

use crate::dto::note_dto::{CreateNoteRequest, NoteItem};
use crate::error::Result;
use crate::models::note::Note;
use crate::services::check_response;
use crate::utils::validation::validate;

#[async_trait]
pub trait NotesStore: Send + Sync {
    async fn list_by_application(&self, application_id: i64) -> Result<Vec<Note>>;
    async fn create(&self, request: CreateNoteRequest) -> Result<Note>;
    async fn delete(&self, note_id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct HttpNotesStore {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpNotesStore {
    pub fn new(client: Client, base_url: String, access_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl NotesStore for HttpNotesStore {
    async fn list_by_application(&self, application_id: i64) -> Result<Vec<Note>> {
        let url = format!("{}/notes", self.base_url);
        let response = self
            .authorize(self.client.get(&url))
            .query(&[("applicationId", application_id.to_string())])
            .send()
            .await?;
        let response = check_response(response).await?;
        let items = response.json::<Vec<NoteItem>>().await?;
        Ok(items.into_iter().map(NoteItem::into_note).collect())
    }

    async fn create(&self, request: CreateNoteRequest) -> Result<Note> {
        validate(&request)?;
        let url = format!("{}/notes", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        let response = check_response(response).await?;
        let item = response.json::<NoteItem>().await?;
        Ok(item.into_note())
    }

    async fn delete(&self, note_id: &str) -> Result<()> {
        let url = format!("{}/notes/{}", self.base_url, note_id);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        check_response(response).await?;
        Ok(())
    }
}
