use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    HrScreen,
    TechnicalInterview,
    FinalInterview,
    Offered,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 8] = [
        ApplicationStatus::Applied,
        ApplicationStatus::HrScreen,
        ApplicationStatus::TechnicalInterview,
        ApplicationStatus::FinalInterview,
        ApplicationStatus::Offered,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::HrScreen => "HR_SCREEN",
            ApplicationStatus::TechnicalInterview => "TECHNICAL_INTERVIEW",
            ApplicationStatus::FinalInterview => "FINAL_INTERVIEW",
            ApplicationStatus::Offered => "OFFERED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    pub fn is_interview_stage(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::HrScreen
                | ApplicationStatus::TechnicalInterview
                | ApplicationStatus::FinalInterview
        )
    }

    /// Accepts canonical codes plus the lowercase codes found in older
    /// backend snapshots.
    pub fn parse_code(raw: &str) -> Option<Self> {
        match raw.trim() {
            "APPLIED" | "applied" => Some(ApplicationStatus::Applied),
            "HR_SCREEN" => Some(ApplicationStatus::HrScreen),
            "TECHNICAL_INTERVIEW" | "interview" => Some(ApplicationStatus::TechnicalInterview),
            "FINAL_INTERVIEW" => Some(ApplicationStatus::FinalInterview),
            "OFFERED" | "offer" => Some(ApplicationStatus::Offered),
            "ACCEPTED" | "accepted" => Some(ApplicationStatus::Accepted),
            "REJECTED" | "rejected" => Some(ApplicationStatus::Rejected),
            "WITHDRAWN" | "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ApplicationStatus::parse_code(s).ok_or_else(|| format!("Unknown status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub status: ApplicationStatus,
    pub company_url: Option<String>,
    pub date_applied: NaiveDateTime,
    pub notes: Option<String>,
    pub cv_file_name: Option<String>,
    pub resume_id: Option<String>,
    pub interview_time: Option<NaiveDateTime>,
    pub email_notifications_enabled: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
