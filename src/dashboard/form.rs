use crate::dto::application_dto::{CreateApplicationRequest, UpdateApplicationRequest};
use crate::models::application::{ApplicationRecord, ApplicationStatus};
use crate::models::resume::ResumeInfo;
use crate::services::application_store::ApplicationStore;
use crate::services::resume_store::ResumeStore;
use crate::utils::{time, validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub company_url: Option<String>,
    pub apply_date: Option<String>,
    pub attachment: Option<String>,
}

impl FieldErrors {
    /// Attachment errors block attaching, not submitting, so they are not
    /// counted here.
    pub fn blocks_submit(&self) -> bool {
        self.company.is_some()
            || self.position.is_some()
            || self.status.is_some()
            || self.company_url.is_some()
            || self.apply_date.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PendingFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, PartialEq)]
pub enum SubmitResult {
    /// Record saved; the caller reconciles by reloading the list rather than
    /// patching it from this echo.
    Saved(ApplicationRecord),
    /// Validation failed; field errors are populated.
    Rejected,
    /// Another submit is still in flight.
    InFlight,
    /// The store rejected the save; the draft is kept for retry.
    Failed,
}

/// One mutable draft for creating or editing a single application. Text
/// fields hold the raw UI strings; normalization to the backend forms
/// happens at submit time.
#[derive(Debug)]
pub struct ApplicationForm {
    phase: FormPhase,
    editing_id: Option<i64>,
    pub company: String,
    pub position: String,
    pub location: String,
    status: ApplicationStatus,
    pub company_url: String,
    pub apply_date: String,
    pub notes: String,
    interview_time: String,
    email_notifications_enabled: bool,
    cv_file_name: Option<String>,
    resume_id: Option<String>,
    pending_file: Option<PendingFile>,
    resume_marked_for_deletion: bool,
    pub errors: FieldErrors,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl ApplicationForm {
    pub fn new_add() -> Self {
        Self {
            phase: FormPhase::Editing,
            editing_id: None,
            company: String::new(),
            position: String::new(),
            location: String::new(),
            status: ApplicationStatus::Applied,
            company_url: String::new(),
            apply_date: String::new(),
            notes: String::new(),
            interview_time: String::new(),
            email_notifications_enabled: false,
            cv_file_name: None,
            resume_id: None,
            pending_file: None,
            resume_marked_for_deletion: false,
            errors: FieldErrors::default(),
            warning: None,
            error: None,
        }
    }

    pub fn new_edit(record: &ApplicationRecord) -> Self {
        Self {
            phase: FormPhase::Editing,
            editing_id: Some(record.id),
            company: record.company.clone(),
            position: record.position.clone(),
            location: record.location.clone().unwrap_or_default(),
            status: record.status,
            company_url: record.company_url.clone().unwrap_or_default(),
            apply_date: time::format_datetime_input(record.date_applied),
            notes: record.notes.clone().unwrap_or_default(),
            interview_time: record
                .interview_time
                .map(time::format_datetime_input)
                .unwrap_or_default(),
            email_notifications_enabled: record.email_notifications_enabled
                && record.interview_time.is_some(),
            cv_file_name: record.cv_file_name.clone(),
            resume_id: record.resume_id.clone(),
            pending_file: None,
            resume_marked_for_deletion: false,
            errors: FieldErrors::default(),
            warning: None,
            error: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn interview_time(&self) -> &str {
        &self.interview_time
    }

    pub fn email_notifications_enabled(&self) -> bool {
        self.email_notifications_enabled
    }

    pub fn cv_file_name(&self) -> Option<&str> {
        self.cv_file_name.as_deref()
    }

    pub fn has_pending_file(&self) -> bool {
        self.pending_file.is_some()
    }

    /// Switching away from an interview stage retires the interview fields
    /// immediately, not at submit time.
    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
        if !status.is_interview_stage() {
            self.interview_time.clear();
            self.email_notifications_enabled = false;
        }
    }

    pub fn set_interview_time(&mut self, raw: &str) {
        self.interview_time = raw.to_string();
        if self.interview_time.trim().is_empty() {
            self.email_notifications_enabled = false;
        }
    }

    /// The switch only engages while an interview time is present.
    pub fn set_email_notifications(&mut self, enabled: bool) {
        self.email_notifications_enabled = enabled && self.notifications_control_enabled();
    }

    pub fn notifications_control_enabled(&self) -> bool {
        !self.interview_time.trim().is_empty()
    }

    /// Checks the attachment against the resume constraints at selection
    /// time. A rejected file never becomes part of the draft.
    pub fn attach_file(&mut self, file_name: &str, content: Vec<u8>) -> bool {
        match validation::check_resume_attachment(file_name, content.len()) {
            Ok(()) => {
                self.errors.attachment = None;
                self.pending_file = Some(PendingFile {
                    file_name: file_name.to_string(),
                    content,
                });
                self.resume_marked_for_deletion = false;
                true
            }
            Err(e) => {
                self.errors.attachment = Some(e.to_string());
                false
            }
        }
    }

    pub fn remove_attachment(&mut self) {
        self.pending_file = None;
        self.errors.attachment = None;
        if self.resume_id.is_some() {
            self.resume_marked_for_deletion = true;
        }
        self.cv_file_name = None;
    }

    /// Recomputes field errors. Meant to run on every field change as well
    /// as at submit, where it is authoritative.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors {
            attachment: self.errors.attachment.clone(),
            ..Default::default()
        };

        if self.company.trim().is_empty() {
            errors.company = Some("Company is required".to_string());
        }
        if self.position.trim().is_empty() {
            errors.position = Some("Position is required".to_string());
        }

        let url = self.company_url.trim();
        if !url.is_empty() && !validation::is_absolute_url(url) {
            errors.company_url = Some("Company link must be an absolute URL".to_string());
        }

        let apply = self.apply_date.trim();
        if apply.is_empty() {
            errors.apply_date = Some("Apply date is required".to_string());
        } else {
            match time::parse_backend_datetime(apply) {
                Ok(dt) if dt > time::now_local() => {
                    errors.apply_date = Some("Apply date cannot be in the future".to_string());
                }
                Ok(_) => {}
                Err(_) => {
                    errors.apply_date = Some("Apply date is not a valid date".to_string());
                }
            }
        }

        let ok = !errors.blocks_submit();
        self.errors = errors;
        ok
    }

    pub fn cancel(&mut self) {
        if self.phase == FormPhase::Editing {
            self.phase = FormPhase::Closed;
        }
    }

    /// Two-phase submit: best-effort resume upload/delete first, then the
    /// authoritative record save. Resume failures warn and never block the
    /// save; a failed save keeps the draft editable for retry.
    pub async fn submit(
        &mut self,
        applications: &dyn ApplicationStore,
        resumes: &dyn ResumeStore,
    ) -> SubmitResult {
        if self.phase == FormPhase::Submitting {
            return SubmitResult::InFlight;
        }
        if self.phase == FormPhase::Closed {
            return SubmitResult::Rejected;
        }
        if !self.validate() {
            return SubmitResult::Rejected;
        }
        self.phase = FormPhase::Submitting;
        self.warning = None;
        self.error = None;

        let mut new_resume: Option<ResumeInfo> = None;
        if let Some(pending) = &self.pending_file {
            match resumes
                .upload(&pending.file_name, pending.content.clone())
                .await
            {
                Ok(info) => new_resume = Some(info),
                Err(e) => {
                    tracing::warn!(error = %e, "Resume upload failed, saving without the new file");
                    self.warning = Some(
                        "Resume upload failed; the application was saved without the new file"
                            .to_string(),
                    );
                }
            }
        }

        // The old blob goes away only once it has been replaced or the user
        // explicitly removed it; a failed upload leaves it in place.
        let old_reference = self.resume_id.clone();
        let replaced = new_resume.is_some() || self.resume_marked_for_deletion;
        if replaced {
            if let Some(old_id) = &old_reference {
                if let Err(e) = resumes.delete(old_id).await {
                    tracing::warn!(error = %e, file_id = %old_id, "Failed to delete old resume");
                }
            }
        }

        // Settle the blob operations into the draft so a retry after a
        // failed record save does not repeat them.
        let clear_reference = new_resume.is_none() && self.resume_marked_for_deletion;
        if let Some(info) = &new_resume {
            self.resume_id = Some(info.file_id.clone());
            self.cv_file_name = Some(info.file_name.clone());
            self.pending_file = None;
        } else if clear_reference {
            self.resume_id = None;
            self.cv_file_name = None;
        }
        self.resume_marked_for_deletion = false;

        let normalized_apply = time::normalize_datetime_input(&self.apply_date);
        let normalized_interview = {
            let raw = self.interview_time.trim();
            if raw.is_empty() {
                None
            } else {
                Some(time::normalize_datetime_input(raw))
            }
        };

        let outcome = match self.editing_id {
            None => {
                let request = CreateApplicationRequest {
                    company_name: self.company.trim().to_string(),
                    company_link: none_if_empty(&self.company_url),
                    position: self.position.trim().to_string(),
                    status: self.status.as_code().to_string(),
                    apply_date: normalized_apply,
                    location: none_if_empty(&self.location),
                    notes: none_if_empty(&self.notes),
                    cv_file_name: self.cv_file_name.clone(),
                    resume_id: self.resume_id.clone(),
                    interview_time: normalized_interview,
                    email_notifications: Some(self.email_notifications_enabled),
                };
                applications.create(request).await
            }
            Some(id) => {
                let (resume_id_field, cv_file_field) = if new_resume.is_some() {
                    (
                        Some(self.resume_id.clone()),
                        Some(self.cv_file_name.clone()),
                    )
                } else if clear_reference {
                    (Some(None), Some(None))
                } else {
                    (None, None)
                };
                let request = UpdateApplicationRequest {
                    company_name: Some(self.company.trim().to_string()),
                    company_link: none_if_empty(&self.company_url),
                    position: Some(self.position.trim().to_string()),
                    status: Some(self.status.as_code().to_string()),
                    apply_date: Some(normalized_apply),
                    location: Some(self.location.trim().to_string()),
                    notes: Some(self.notes.trim().to_string()),
                    cv_file_name: cv_file_field,
                    resume_id: resume_id_field,
                    interview_time: Some(normalized_interview),
                    email_notifications: Some(self.email_notifications_enabled),
                };
                applications.update(id, request).await
            }
        };

        match outcome {
            Ok(record) => {
                tracing::info!(id = record.id, "Application saved");
                self.phase = FormPhase::Closed;
                SubmitResult::Saved(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save application");
                self.error = Some("Failed to save the application".to_string());
                self.phase = FormPhase::Editing;
                SubmitResult::Failed
            }
        }
    }
}

fn none_if_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
