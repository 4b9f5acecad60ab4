use reqwest::Client;

use crate::dto::auth_dto::{
    ApiEnvelope, ChangePasswordRequest, LoginRequest, RegisterRequest, UserPayload,
};
use crate::error::{Error, Result};
use crate::models::user::{Session, User};
use crate::services::check_response;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
}

impl AuthService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        validate(&request)?;

        let url = format!("{}/auth/login", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;
        let response = check_response(response).await?;
        let envelope = response.json::<ApiEnvelope<UserPayload>>().await?;
        session_from_envelope(envelope)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Session> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        validate(&request)?;

        let url = format!("{}/users/register", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;
        let response = check_response(response).await?;
        let envelope = response.json::<ApiEnvelope<UserPayload>>().await?;
        session_from_envelope(envelope)
    }

    pub async fn change_password(
        &self,
        access_token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        validate(&request)?;

        let url = format!("{}/users/me/change-password", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;
        let response = check_response(response).await?;
        let envelope = response.json::<ApiEnvelope<serde_json::Value>>().await?;
        if !envelope.success {
            return Err(Error::BadRequest(envelope.message));
        }
        Ok(())
    }
}

fn session_from_envelope(envelope: ApiEnvelope<UserPayload>) -> Result<Session> {
    if !envelope.success {
        return Err(Error::Unauthorized(envelope.message));
    }
    let payload = envelope
        .data
        .ok_or_else(|| Error::Internal("Auth response carries no user payload".to_string()))?;
    let access_token = payload
        .access_token
        .ok_or_else(|| Error::Unauthorized("Auth response carries no access token".to_string()))?;

    Ok(Session {
        user: User {
            id: payload.id,
            email: payload.email,
            user_name: payload.user_name,
            created_at: payload.created_at,
        },
        access_token,
    })
}
