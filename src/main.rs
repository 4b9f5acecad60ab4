use std::io::{self, Write};

use clap::{Parser, Subcommand};
use jobtrack_client::config::init_config;
use jobtrack_client::dashboard::form::{ApplicationForm, SubmitResult};
use jobtrack_client::dashboard::list::{
    ApplicationListModel, ConfirmDelete, SortDirection, SortKey, StatusFilter,
};
use jobtrack_client::dto::note_dto::CreateNoteRequest;
use jobtrack_client::models::application::{ApplicationRecord, ApplicationStatus};
use jobtrack_client::models::user::Session;
use jobtrack_client::services::notes_store::NotesStore;
use jobtrack_client::services::resume_store::ResumeStore;
use jobtrack_client::services::session::{FileSessionStore, SessionStore};
use jobtrack_client::ClientState;

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track job applications from the terminal", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session locally
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and store the session locally
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Change the password of the logged-in account
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// List applications
    List {
        /// Match against company, position or location
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only show one status, e.g. APPLIED or TECHNICAL_INTERVIEW
        #[arg(long)]
        status: Option<ApplicationStatus>,
        /// Sort column: date, company, position or status
        #[arg(long, default_value = "date")]
        sort: String,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Show the dashboard counters
    Stats,
    /// Add an application
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        position: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        url: String,
        /// Apply date, e.g. 2026-08-01T09:00
        #[arg(long)]
        apply_date: String,
        #[arg(long, default_value = "APPLIED")]
        status: ApplicationStatus,
        /// Interview time, only meaningful for interview stages
        #[arg(long, default_value = "")]
        interview_time: String,
        /// Enable interview email reminders
        #[arg(long)]
        notify: bool,
        /// Path to a PDF resume to attach
        #[arg(long)]
        resume: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete an application by id
    Delete { id: i64 },
    /// List the notes attached to an application
    Notes { application_id: i64 },
    /// Add a note to an application
    NoteAdd {
        #[arg(long)]
        application_id: i64,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "")]
        title: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete a note by id
    NoteDelete { id: String },
    /// List uploaded resumes
    Resumes,
    /// Download a resume to a local file
    ResumeDownload { file_id: String, out: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let cli = Cli::parse();
    let sessions = FileSessionStore::from_config();

    match cli.command {
        Commands::Login { email, password } => {
            let state = ClientState::new(None);
            let session = state.auth_service.login(&email, &password).await?;
            sessions.put(&session)?;
            println!("Logged in as {} <{}>", session.user.user_name, session.user.email);
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            let state = ClientState::new(None);
            let session = state.auth_service.register(&username, &email, &password).await?;
            sessions.put(&session)?;
            println!("Registered {} <{}>", session.user.user_name, session.user.email);
        }
        Commands::Logout => {
            sessions.clear();
            println!("Logged out");
        }
        Commands::ChangePassword { current, new } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token.clone()));
            state
                .auth_service
                .change_password(&session.access_token, &current, &new)
                .await?;
            println!("Password changed");
        }
        Commands::List {
            search,
            status,
            sort,
            desc,
        } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let mut model = ApplicationListModel::new();
            model.load(&state.application_store, session.user.id).await;
            if let Some(message) = &model.error {
                println!("{}", message);
                return Ok(());
            }

            let filter = match status {
                Some(wanted) => StatusFilter::Only(wanted),
                None => StatusFilter::All,
            };
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let rows = model.project(&search, filter, parse_sort_key(&sort)?, direction);
            print_table(&rows);
        }
        Commands::Stats => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let mut model = ApplicationListModel::new();
            model.load(&state.application_store, session.user.id).await;
            if let Some(message) = &model.error {
                println!("{}", message);
                return Ok(());
            }

            let stats = model.compute_stats();
            println!("Total:      {}", stats.total);
            println!("Applied:    {}", stats.applied);
            println!("Interviews: {}", stats.interviews);
            println!("Offers:     {}", stats.offers);
            println!("Rejected:   {}", stats.rejected);
            println!("Withdrawn:  {}", stats.withdrawn);
        }
        Commands::Add {
            company,
            position,
            location,
            url,
            apply_date,
            status,
            interview_time,
            notify,
            resume,
            notes,
        } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));

            let mut form = ApplicationForm::new_add();
            form.company = company;
            form.position = position;
            form.location = location;
            form.company_url = url;
            form.apply_date = apply_date;
            form.notes = notes;
            form.set_status(status);
            form.set_interview_time(&interview_time);
            form.set_email_notifications(notify);

            if let Some(path) = resume {
                let content = std::fs::read(&path)?;
                let file_name = std::path::Path::new(&path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or(path.clone());
                if !form.attach_file(&file_name, content) {
                    if let Some(message) = &form.errors.attachment {
                        println!("Resume rejected: {}", message);
                    }
                    return Ok(());
                }
            }

            match form.submit(&state.application_store, &state.resume_store).await {
                SubmitResult::Saved(record) => {
                    if let Some(warning) = &form.warning {
                        println!("Warning: {}", warning);
                    }
                    println!("Saved application #{}", record.id);
                }
                SubmitResult::Rejected => {
                    print_field_errors(&form);
                }
                SubmitResult::Failed => {
                    if let Some(message) = &form.error {
                        println!("{}", message);
                    }
                }
                SubmitResult::InFlight => {}
            }
        }
        Commands::Delete { id } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let mut model = ApplicationListModel::new();
            model.load(&state.application_store, session.user.id).await;
            if let Some(message) = &model.error {
                println!("{}", message);
                return Ok(());
            }

            let removed = model
                .remove(&state.application_store, &StdinConfirm, session.user.id, id)
                .await;
            if removed {
                println!("Deleted application #{}", id);
            } else if let Some(message) = &model.error {
                println!("{}", message);
            } else {
                println!("Nothing deleted");
            }
        }
        Commands::Notes { application_id } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let notes = state.notes_store.list_by_application(application_id).await?;
            if notes.is_empty() {
                println!("No notes");
                return Ok(());
            }
            println!("{:<26} {:<20} {:<20} {:<40}", "ID", "TITLE", "TAGS", "CONTENT");
            println!("{}", "-".repeat(108));
            for note in &notes {
                println!(
                    "{:<26} {:<20} {:<20} {:<40}",
                    truncate(&note.id, 24),
                    truncate(&note.title, 18),
                    truncate(&note.tags.join(","), 18),
                    truncate(&note.content, 38),
                );
            }
            println!("{} note(s)", notes.len());
        }
        Commands::NoteAdd {
            application_id,
            content,
            title,
            tags,
        } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let request = CreateNoteRequest {
                application_id,
                content,
                title,
                tags: tags
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
            let note = state.notes_store.create(request).await?;
            println!("Saved note {}", note.id);
        }
        Commands::NoteDelete { id } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            state.notes_store.delete(&id).await?;
            println!("Deleted note {}", id);
        }
        Commands::Resumes => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let resumes = state.resume_store.list().await?;
            if resumes.is_empty() {
                println!("No resumes");
                return Ok(());
            }
            for info in &resumes {
                println!("{:<26} {}", info.file_id, info.file_name);
            }
        }
        Commands::ResumeDownload { file_id, out } => {
            let Some(session) = require_session(&sessions) else {
                return Ok(());
            };
            let state = ClientState::new(Some(session.access_token));
            let content = state.resume_store.download(&file_id).await?;
            std::fs::write(&out, &content)?;
            println!("Wrote {} byte(s) to {}", content.len(), out);
        }
    }

    Ok(())
}

fn require_session(sessions: &FileSessionStore) -> Option<Session> {
    match sessions.get() {
        Some(session) => Some(session),
        None => {
            println!("Not logged in. Run `jobtrack login` first.");
            None
        }
    }
}

fn parse_sort_key(raw: &str) -> anyhow::Result<SortKey> {
    match raw.to_lowercase().as_str() {
        "date" => Ok(SortKey::DateApplied),
        "company" => Ok(SortKey::Company),
        "position" => Ok(SortKey::Position),
        "status" => Ok(SortKey::Status),
        other => anyhow::bail!("Unknown sort column: {} (use date, company, position or status)", other),
    }
}

fn print_table(rows: &[ApplicationRecord]) {
    if rows.is_empty() {
        println!("No applications");
        return;
    }
    println!(
        "{:<6} {:<20} {:<24} {:<24} {:<17} {:<16}",
        "ID", "STATUS", "COMPANY", "POSITION", "APPLIED", "LOCATION"
    );
    println!("{}", "-".repeat(112));
    for record in rows {
        println!(
            "{:<6} {:<20} {:<24} {:<24} {:<17} {:<16}",
            record.id,
            record.status.as_code(),
            truncate(&record.company, 22),
            truncate(&record.position, 22),
            record.date_applied.format("%Y-%m-%d %H:%M").to_string(),
            truncate(record.location.as_deref().unwrap_or("-"), 14),
        );
    }
    println!("{} application(s)", rows.len());
}

fn print_field_errors(form: &ApplicationForm) {
    println!("Not saved:");
    for message in [
        &form.errors.company,
        &form.errors.position,
        &form.errors.status,
        &form.errors.company_url,
        &form.errors.apply_date,
        &form.errors.attachment,
    ]
    .into_iter()
    .flatten()
    {
        println!("  - {}", message);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

struct StdinConfirm;

impl ConfirmDelete for StdinConfirm {
    fn confirm(&self, record: &ApplicationRecord) -> bool {
        print!(
            "Delete application #{} ({} at {})? [y/N] ",
            record.id, record.position, record.company
        );
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
