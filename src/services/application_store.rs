use async_trait::async_trait;
use reqwest::Client;

use crate::dto::application_dto::{
    ApplicationListItem, CreateApplicationRequest, UpdateApplicationRequest,
};
use crate::error::Result;
use crate::models::application::ApplicationRecord;
use crate::services::check_response;
use crate::utils::validation::validate;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn list(&self, user_id: i64) -> Result<Vec<ApplicationRecord>>;
    async fn create(&self, request: CreateApplicationRequest) -> Result<ApplicationRecord>;
    async fn update(&self, id: i64, request: UpdateApplicationRequest)
        -> Result<ApplicationRecord>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct HttpApplicationStore {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpApplicationStore {
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
impl ApplicationStore for HttpApplicationStore {
    async fn list(&self, user_id: i64) -> Result<Vec<ApplicationRecord>> {
        let url = format!("{}/users/{}/applications", self.base_url, user_id);
        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = check_response(response).await?;
        let items = response.json::<Vec<ApplicationListItem>>().await?;
        items
            .into_iter()
            .map(ApplicationListItem::into_record)
            .collect()
    }

    async fn create(&self, request: CreateApplicationRequest) -> Result<ApplicationRecord> {
        validate(&request)?;
        let url = format!("{}/applications", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        let response = check_response(response).await?;
        let item = response.json::<ApplicationListItem>().await?;
        item.into_record()
    }

    async fn update(
        &self,
        id: i64,
        request: UpdateApplicationRequest,
    ) -> Result<ApplicationRecord> {
        validate(&request)?;
        let url = format!("{}/applications/{}", self.base_url, id);
        let response = self
            .authorize(self.client.patch(&url))
            .json(&request)
            .send()
            .await?;
        let response = check_response(response).await?;
        let item = response.json::<ApplicationListItem>().await?;
        item.into_record()
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/applications/{}", self.base_url, id);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        check_response(response).await?;
        Ok(())
    }
}
