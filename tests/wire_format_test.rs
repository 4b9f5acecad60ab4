use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::json;

use jobtrack_client::dto::application_dto::{ApplicationListItem, UpdateApplicationRequest};
use jobtrack_client::dto::note_dto::NoteItem;
use jobtrack_client::models::application::ApplicationStatus;
use jobtrack_client::utils::{time, token, validation};

fn list_item(value: serde_json::Value) -> ApplicationListItem {
    serde_json::from_value(value).expect("list item payload")
}

#[test]
fn list_item_maps_legacy_status_codes() {
    let item = list_item(json!({
        "id": 1,
        "status": "interview",
        "companyName": "Acme",
        "position": "Backend Engineer",
        "applyDate": "2026-01-10 09:00:00"
    }));
    let record = item.into_record().expect("record");
    assert_eq!(record.status, ApplicationStatus::TechnicalInterview);

    let item = list_item(json!({
        "id": 2,
        "status": "offer",
        "companyName": "Globex",
        "position": "Data Engineer",
        "applyDate": "2026-02-01"
    }));
    let record = item.into_record().expect("record");
    assert_eq!(record.status, ApplicationStatus::Offered);

    let item = list_item(json!({
        "id": 3,
        "status": "sabbatical",
        "companyName": "Initech",
        "position": "SRE",
        "applyDate": "2026-02-01"
    }));
    assert!(item.into_record().is_err());
}

#[test]
fn list_item_forces_the_flag_off_without_an_interview_time() {
    let item = list_item(json!({
        "id": 1,
        "status": "HR_SCREEN",
        "companyName": "Acme",
        "position": "Backend Engineer",
        "applyDate": "2026-01-10 09:00:00",
        "emailNotifications": true
    }));
    let record = item.into_record().expect("record");
    assert!(record.interview_time.is_none());
    assert!(!record.email_notifications_enabled);
}

#[test]
fn update_request_distinguishes_absent_from_null() {
    let request = UpdateApplicationRequest {
        company_name: Some("Acme".to_string()),
        company_link: None,
        position: None,
        status: None,
        apply_date: None,
        location: None,
        notes: None,
        cv_file_name: Some(None),
        resume_id: None,
        interview_time: Some(Some("2026-02-01 10:00:00".to_string())),
        email_notifications: None,
    };
    let value = serde_json::to_value(&request).expect("serialize");
    let object = value.as_object().expect("object");

    assert_eq!(object["companyName"], json!("Acme"));
    // Cleared field travels as an explicit null, untouched field is absent.
    assert_eq!(object["cvFileName"], serde_json::Value::Null);
    assert!(!object.contains_key("resumeId"));
    assert!(!object.contains_key("position"));
    assert_eq!(object["interviewTime"], json!("2026-02-01 10:00:00"));
}

#[test]
fn datetime_input_normalizes_to_the_backend_form() {
    assert_eq!(
        time::normalize_datetime_input("2024-01-01T09:00"),
        "2024-01-01 09:00:00"
    );
    assert_eq!(
        time::normalize_datetime_input("2024-01-01 09:00:00"),
        "2024-01-01 09:00:00"
    );
    assert_eq!(time::normalize_datetime_input("   "), "");
}

#[test]
fn backend_datetimes_of_every_vintage_parse() {
    for raw in [
        "2024-01-01 09:00:00",
        "2024-01-01T09:00:00",
        "2024-01-01 09:00",
        "2024-01-01T09:00",
    ] {
        let parsed = time::parse_backend_datetime(raw).expect("parse");
        assert_eq!(time::format_backend_datetime(parsed), "2024-01-01 09:00:00");
    }

    let midnight = time::parse_backend_datetime("2024-01-01").expect("bare date");
    assert_eq!(time::format_backend_datetime(midnight), "2024-01-01 00:00:00");

    assert!(time::parse_backend_datetime("next tuesday").is_err());
}

#[test]
fn resume_attachment_constraints() {
    assert!(validation::check_resume_attachment("cv.pdf", 1024).is_ok());
    assert!(validation::check_resume_attachment("CV.PDF", validation::MAX_RESUME_BYTES).is_ok());
    assert!(validation::check_resume_attachment("cv.docx", 1024).is_err());
    assert!(validation::check_resume_attachment("cv.pdf", 0).is_err());
    assert!(
        validation::check_resume_attachment("cv.pdf", validation::MAX_RESUME_BYTES + 1).is_err()
    );
}

#[test]
fn company_links_must_be_absolute() {
    assert!(validation::is_absolute_url("https://acme.example/jobs"));
    assert!(!validation::is_absolute_url("acme.example/jobs"));
    assert!(!validation::is_absolute_url("mailto:jobs@acme.example"));
}

fn bearer_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[test]
fn token_expiry_reads_the_exp_claim_only() {
    let now = chrono::Utc::now().timestamp();
    assert!(!token::is_token_expired(&bearer_token(
        json!({"exp": now + 3600})
    )));
    assert!(token::is_token_expired(&bearer_token(
        json!({"exp": now - 3600})
    )));
    assert!(token::is_token_expired(&bearer_token(json!({"sub": "1"}))));
    assert!(token::is_token_expired("not-a-token"));
}

#[test]
fn note_payloads_accept_both_tag_and_id_shapes() {
    let note: NoteItem = serde_json::from_value(json!({
        "id": 12,
        "applicationId": "34",
        "content": "Ask about the remote policy",
        "tags": "remote, follow-up,"
    }))
    .expect("note");
    let note = note.into_note();
    assert_eq!(note.id, "12");
    assert_eq!(note.application_id, "34");
    assert_eq!(note.tags, vec!["remote", "follow-up"]);

    let note: NoteItem = serde_json::from_value(json!({
        "id": "n-1",
        "applicationId": 34,
        "content": "x",
        "tags": ["a", "b"]
    }))
    .expect("note");
    assert_eq!(note.into_note().tags, vec!["a", "b"]);
}

#[test]
fn status_codes_round_trip() {
    for status in ApplicationStatus::ALL {
        assert_eq!(ApplicationStatus::parse_code(status.as_code()), Some(status));
    }
    assert_eq!(
        ApplicationStatus::parse_code("applied"),
        Some(ApplicationStatus::Applied)
    );
    assert_eq!(ApplicationStatus::parse_code("sabbatical"), None);

    let encoded = serde_json::to_string(&ApplicationStatus::HrScreen).expect("serialize");
    assert_eq!(encoded, "\"HR_SCREEN\"");
}
