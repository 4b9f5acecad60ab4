use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::dto::resume_dto::ResumeItem;
use crate::error::Result;
use crate::models::resume::ResumeInfo;
use crate::services::check_response;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeInfo>;
    async fn download(&self, file_id: &str) -> Result<Bytes>;
    async fn delete(&self, file_id: &str) -> Result<()>;
    async fn list(&self) -> Result<Vec<ResumeInfo>>;
}

#[derive(Clone)]
pub struct HttpResumeStore {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpResumeStore {
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
impl ResumeStore for HttpResumeStore {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeInfo> {
        let url = format!("{}/resumes", self.base_url);
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);
        tracing::info!(file_name, "Uploading resume");
        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;
        let response = check_response(response).await?;
        let item = response.json::<ResumeItem>().await?;
        Ok(item.into_info())
    }

    async fn download(&self, file_id: &str) -> Result<Bytes> {
        let url = format!("{}/resumes/{}", self.base_url, file_id);
        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = check_response(response).await?;
        Ok(response.bytes().await?)
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let url = format!("{}/resumes/{}", self.base_url, file_id);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        check_response(response).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ResumeInfo>> {
        let url = format!("{}/resumes", self.base_url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = check_response(response).await?;
        let items = response.json::<Vec<ResumeItem>>().await?;
        Ok(items.into_iter().map(ResumeItem::into_info).collect())
    }
}
