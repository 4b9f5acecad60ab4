pub mod application_store;
pub mod auth_service;
pub mod notes_store;
pub mod resume_store;
pub mod session;

use crate::error::{Error, Result};

pub(crate) async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::from_status(status.as_u16(), message))
}
