use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::{ApplicationRecord, ApplicationStatus};
use crate::utils::time;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
    pub id: i64,
    pub status: String,
    pub company_name: String,
    #[serde(default)]
    pub company_link: Option<String>,
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cv_file_name: Option<String>,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub interview_time: Option<String>,
    #[serde(default)]
    pub email_notifications: Option<bool>,
    pub apply_date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ApplicationListItem {
    pub fn into_record(self) -> Result<ApplicationRecord> {
        let status = ApplicationStatus::parse_code(&self.status).ok_or_else(|| {
            Error::BadRequest(format!("Unknown application status: {}", self.status))
        })?;
        let date_applied = time::parse_backend_datetime(&self.apply_date)?;
        let interview_time = match self.interview_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(time::parse_backend_datetime(raw)?),
        };
        // The flag is meaningless without a scheduled interview.
        let email_notifications_enabled =
            interview_time.is_some() && self.email_notifications.unwrap_or(false);

        Ok(ApplicationRecord {
            id: self.id,
            company: self.company_name,
            position: self.position,
            location: self.location,
            status,
            company_url: self.company_link,
            date_applied,
            notes: self.notes,
            cv_file_name: self.cv_file_name,
            resume_id: self.resume_id,
            interview_time,
            email_notifications_enabled,
            created_at: self
                .created_at
                .as_deref()
                .and_then(|raw| time::parse_backend_datetime(raw).ok()),
            updated_at: self
                .updated_at
                .as_deref()
                .and_then(|raw| time::parse_backend_datetime(raw).ok()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(custom(function = "crate::utils::validation::validate_absolute_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_link: Option<String>,
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(length(min = 1))]
    pub status: String,
    pub apply_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[validate(custom(function = "crate::utils::validation::validate_absolute_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_link: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    // Tri-state PATCH fields: absent = unchanged, null = cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_time: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
}
