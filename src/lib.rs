pub mod config;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::{
    application_store::HttpApplicationStore, auth_service::AuthService,
    notes_store::HttpNotesStore, resume_store::HttpResumeStore,
};
use reqwest::Client;

#[derive(Clone)]
pub struct ClientState {
    pub application_store: HttpApplicationStore,
    pub resume_store: HttpResumeStore,
    pub notes_store: HttpNotesStore,
    pub auth_service: AuthService,
}

impl ClientState {
    pub fn new(access_token: Option<String>) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap();

        let application_store = HttpApplicationStore::new(
            http_client.clone(),
            config.api_base_url.clone(),
            access_token.clone(),
        );
        let resume_store = HttpResumeStore::new(
            http_client.clone(),
            config.api_base_url.clone(),
            access_token.clone(),
        );
        let notes_store = HttpNotesStore::new(
            http_client.clone(),
            config.api_base_url.clone(),
            access_token,
        );
        let auth_service = AuthService::new(http_client, config.api_base_url.clone());

        Self {
            application_store,
            resume_store,
            notes_store,
            auth_service,
        }
    }
}
