use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, NaiveDateTime};
use mockall::{mock, Sequence};

use jobtrack_client::dashboard::form::{ApplicationForm, FormPhase, SubmitResult};
use jobtrack_client::dto::application_dto::{CreateApplicationRequest, UpdateApplicationRequest};
use jobtrack_client::error::{Error, Result};
use jobtrack_client::models::application::{ApplicationRecord, ApplicationStatus};
use jobtrack_client::models::resume::ResumeInfo;
use jobtrack_client::services::application_store::ApplicationStore;
use jobtrack_client::services::resume_store::ResumeStore;
use jobtrack_client::utils::time;

mock! {
    Applications {}

    #[async_trait]
    impl ApplicationStore for Applications {
        async fn list(&self, user_id: i64) -> Result<Vec<ApplicationRecord>>;
        async fn create(&self, request: CreateApplicationRequest) -> Result<ApplicationRecord>;
        async fn update(&self, id: i64, request: UpdateApplicationRequest) -> Result<ApplicationRecord>;
        async fn delete(&self, id: i64) -> Result<()>;
    }
}

mock! {
    Resumes {}

    #[async_trait]
    impl ResumeStore for Resumes {
        async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeInfo>;
        async fn download(&self, file_id: &str) -> Result<Bytes>;
        async fn delete(&self, file_id: &str) -> Result<()>;
        async fn list(&self) -> Result<Vec<ResumeInfo>>;
    }
}

fn saved_record(id: i64) -> ApplicationRecord {
    ApplicationRecord {
        id,
        company: "Acme".to_string(),
        position: "Backend Engineer".to_string(),
        location: None,
        status: ApplicationStatus::Applied,
        company_url: None,
        date_applied: NaiveDateTime::parse_from_str("2026-01-10 09:00:00", "%Y-%m-%d %H:%M:%S")
            .expect("fixture date"),
        notes: None,
        cv_file_name: None,
        resume_id: None,
        interview_time: None,
        email_notifications_enabled: false,
        created_at: None,
        updated_at: None,
    }
}

fn valid_draft() -> ApplicationForm {
    let mut form = ApplicationForm::new_add();
    form.company = "Acme".to_string();
    form.position = "Backend Engineer".to_string();
    form.apply_date = "2026-01-10T09:00".to_string();
    form
}

#[test]
fn leaving_interview_stage_retires_interview_fields() {
    let mut form = valid_draft();
    form.set_status(ApplicationStatus::TechnicalInterview);
    form.set_interview_time("2026-08-20T10:00");
    form.set_email_notifications(true);
    assert!(form.email_notifications_enabled());

    form.set_status(ApplicationStatus::Rejected);
    assert!(form.interview_time().is_empty());
    assert!(!form.email_notifications_enabled());
    assert!(!form.notifications_control_enabled());
}

#[test]
fn notifications_switch_needs_an_interview_time() {
    let mut form = valid_draft();
    form.set_status(ApplicationStatus::HrScreen);

    form.set_email_notifications(true);
    assert!(!form.email_notifications_enabled());

    form.set_interview_time("2026-08-20T10:00");
    form.set_email_notifications(true);
    assert!(form.email_notifications_enabled());

    form.set_interview_time("   ");
    assert!(!form.email_notifications_enabled());
    assert!(!form.notifications_control_enabled());
}

#[test]
fn validation_flags_each_broken_field() {
    let mut form = ApplicationForm::new_add();
    form.company = "   ".to_string();
    form.position = String::new();
    form.company_url = "not-a-url".to_string();
    form.apply_date = String::new();

    assert!(!form.validate());
    assert!(form.errors.company.is_some());
    assert!(form.errors.position.is_some());
    assert!(form.errors.company_url.is_some());
    assert!(form.errors.apply_date.is_some());
    assert!(form.errors.blocks_submit());
}

#[test]
fn validation_rejects_a_future_apply_date() {
    let mut form = valid_draft();
    let future = time::now_local() + Duration::days(2);
    form.apply_date = future.format("%Y-%m-%dT%H:%M").to_string();

    assert!(!form.validate());
    assert!(form.errors.apply_date.is_some());
}

#[tokio::test]
async fn oversized_attachment_blocks_attaching_not_submitting() {
    let mut form = valid_draft();
    let attached = form.attach_file("cv.pdf", vec![0u8; 6 * 1024 * 1024]);
    assert!(!attached);
    assert!(form.errors.attachment.is_some());
    assert!(!form.has_pending_file());

    let mut applications = MockApplications::new();
    applications
        .expect_create()
        .withf(|req| req.resume_id.is_none() && req.cv_file_name.is_none())
        .times(1)
        .returning(|_| Ok(saved_record(1)));
    let resumes = MockResumes::new();

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
}

#[tokio::test]
async fn valid_attachment_uploads_then_saves() {
    let mut form = valid_draft();
    assert!(form.attach_file("cv.pdf", b"%PDF-1.4 test".to_vec()));

    let mut resumes = MockResumes::new();
    resumes
        .expect_upload()
        .withf(|file_name, _| file_name == "cv.pdf")
        .times(1)
        .returning(|_, _| {
            Ok(ResumeInfo {
                file_id: "file-1".to_string(),
                file_name: "cv.pdf".to_string(),
            })
        });

    let mut applications = MockApplications::new();
    applications
        .expect_create()
        .withf(|req| {
            req.resume_id.as_deref() == Some("file-1")
                && req.cv_file_name.as_deref() == Some("cv.pdf")
        })
        .times(1)
        .returning(|_| Ok(saved_record(1)));

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
    assert_eq!(form.phase(), FormPhase::Closed);
}

#[tokio::test]
async fn failed_upload_warns_and_saves_without_the_new_file() {
    let mut form = valid_draft();
    assert!(form.attach_file("cv.pdf", b"%PDF-1.4 test".to_vec()));

    let mut resumes = MockResumes::new();
    resumes
        .expect_upload()
        .times(1)
        .returning(|_, _| Err(Error::Api(500, "storage down".to_string())));

    let mut applications = MockApplications::new();
    applications
        .expect_create()
        .withf(|req| req.resume_id.is_none() && req.cv_file_name.is_none())
        .times(1)
        .returning(|_| Ok(saved_record(1)));

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
    assert!(form.warning.is_some());
}

#[tokio::test]
async fn submit_normalizes_timestamps_to_the_backend_form() {
    let mut form = valid_draft();
    form.apply_date = "2024-01-01T09:00".to_string();
    form.set_status(ApplicationStatus::TechnicalInterview);
    form.set_interview_time("2024-02-02T10:30");

    let mut applications = MockApplications::new();
    applications
        .expect_create()
        .withf(|req| {
            req.apply_date == "2024-01-01 09:00:00"
                && req.interview_time.as_deref() == Some("2024-02-02 10:30:00")
        })
        .times(1)
        .returning(|_| Ok(saved_record(1)));
    let resumes = MockResumes::new();

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
}

#[tokio::test]
async fn closed_form_rejects_further_submits() {
    let mut form = valid_draft();

    let mut applications = MockApplications::new();
    applications
        .expect_create()
        .times(1)
        .returning(|_| Ok(saved_record(1)));
    let resumes = MockResumes::new();

    assert!(matches!(
        form.submit(&applications, &resumes).await,
        SubmitResult::Saved(_)
    ));
    assert_eq!(
        form.submit(&applications, &resumes).await,
        SubmitResult::Rejected
    );
}

#[tokio::test]
async fn failed_save_keeps_draft_and_blob_work_is_not_repeated() {
    let mut form = valid_draft();
    assert!(form.attach_file("cv.pdf", b"%PDF-1.4 test".to_vec()));

    let mut resumes = MockResumes::new();
    resumes.expect_upload().times(1).returning(|_, _| {
        Ok(ResumeInfo {
            file_id: "file-1".to_string(),
            file_name: "cv.pdf".to_string(),
        })
    });

    let mut applications = MockApplications::new();
    let mut seq = Sequence::new();
    applications
        .expect_create()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(Error::Api(500, "boom".to_string())));
    applications
        .expect_create()
        .withf(|req| req.resume_id.as_deref() == Some("file-1"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(saved_record(1)));

    assert_eq!(
        form.submit(&applications, &resumes).await,
        SubmitResult::Failed
    );
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(form.error.is_some());

    // Retry saves the already-uploaded reference without touching the blob
    // store again.
    assert!(matches!(
        form.submit(&applications, &resumes).await,
        SubmitResult::Saved(_)
    ));
}

#[tokio::test]
async fn removing_an_existing_attachment_clears_references_on_update() {
    let mut record = saved_record(7);
    record.resume_id = Some("old-id".to_string());
    record.cv_file_name = Some("old.pdf".to_string());
    let mut form = ApplicationForm::new_edit(&record);
    form.remove_attachment();

    let mut resumes = MockResumes::new();
    resumes
        .expect_delete()
        .withf(|file_id| file_id == "old-id")
        .times(1)
        .returning(|_| Ok(()));

    let mut applications = MockApplications::new();
    applications
        .expect_update()
        .withf(|id, req| {
            *id == 7 && req.resume_id == Some(None) && req.cv_file_name == Some(None)
        })
        .times(1)
        .returning(|_, _| Ok(saved_record(7)));

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
}

#[tokio::test]
async fn replacing_an_attachment_deletes_the_old_blob() {
    let mut record = saved_record(7);
    record.resume_id = Some("old-id".to_string());
    record.cv_file_name = Some("old.pdf".to_string());
    let mut form = ApplicationForm::new_edit(&record);
    assert!(form.attach_file("new.pdf", b"%PDF-1.4 new".to_vec()));

    let mut resumes = MockResumes::new();
    let mut seq = Sequence::new();
    resumes
        .expect_upload()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Ok(ResumeInfo {
                file_id: "new-id".to_string(),
                file_name: "new.pdf".to_string(),
            })
        });
    resumes
        .expect_delete()
        .withf(|file_id| file_id == "old-id")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut applications = MockApplications::new();
    applications
        .expect_update()
        .withf(|_, req| {
            req.resume_id == Some(Some("new-id".to_string()))
                && req.cv_file_name == Some(Some("new.pdf".to_string()))
        })
        .times(1)
        .returning(|_, _| Ok(saved_record(7)));

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
}

#[tokio::test]
async fn edit_clearing_the_interview_sends_an_explicit_null() {
    let mut record = saved_record(7);
    record.status = ApplicationStatus::TechnicalInterview;
    record.interview_time = Some(
        NaiveDateTime::parse_from_str("2026-02-01 10:00:00", "%Y-%m-%d %H:%M:%S")
            .expect("fixture date"),
    );
    record.email_notifications_enabled = true;
    let mut form = ApplicationForm::new_edit(&record);
    form.set_status(ApplicationStatus::Rejected);

    let mut applications = MockApplications::new();
    applications
        .expect_update()
        .withf(|_, req| {
            req.interview_time == Some(None) && req.email_notifications == Some(false)
        })
        .times(1)
        .returning(|_, _| Ok(saved_record(7)));
    let resumes = MockResumes::new();

    let outcome = form.submit(&applications, &resumes).await;
    assert!(matches!(outcome, SubmitResult::Saved(_)));
}

#[tokio::test]
async fn cancel_closes_an_editing_form() {
    let mut form = valid_draft();
    form.cancel();
    assert_eq!(form.phase(), FormPhase::Closed);

    let applications = MockApplications::new();
    let resumes = MockResumes::new();
    assert_eq!(
        form.submit(&applications, &resumes).await,
        SubmitResult::Rejected
    );
}
