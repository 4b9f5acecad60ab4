use std::cmp::Ordering;

use crate::models::application::{ApplicationRecord, ApplicationStatus};
use crate::services::application_store::ApplicationStore;

/// Boundary collaborator for the yes/no prompt guarding deletion.
pub trait ConfirmDelete: Send + Sync {
    fn confirm(&self, record: &ApplicationRecord) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateApplied,
    Company,
    Position,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSummary {
    pub total: usize,
    pub applied: usize,
    pub interviews: usize,
    pub offers: usize,
    pub rejected: usize,
    pub withdrawn: usize,
}

/// Owns the authoritative record set for one user and derives the displayed
/// projection and the dashboard counters from it.
#[derive(Debug, Default)]
pub struct ApplicationListModel {
    records: Vec<ApplicationRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ApplicationListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    /// Replaces the record set from the store. A failed load keeps whatever
    /// was displayed before and surfaces a page-level error; the loading flag
    /// always ends cleared.
    pub async fn load(&mut self, store: &dyn ApplicationStore, user_id: i64) {
        self.is_loading = true;
        self.error = None;
        match store.list(user_id).await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Loaded applications");
                self.records = records;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load applications");
                self.error = Some("Failed to load applications".to_string());
            }
        }
        self.is_loading = false;
    }

    /// Pure projection of the current record set: filter, then a stable sort,
    /// then direction. Never mutates the records.
    pub fn project(
        &self,
        search: &str,
        status_filter: StatusFilter,
        sort_key: SortKey,
        direction: SortDirection,
    ) -> Vec<ApplicationRecord> {
        let needle = search.trim().to_lowercase();
        let mut out: Vec<ApplicationRecord> = self
            .records
            .iter()
            .filter(|record| matches_search(record, &needle) && status_filter.matches(record.status))
            .cloned()
            .collect();

        out.sort_by(|a, b| {
            let ordering = compare(a, b, sort_key);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        out
    }

    /// Counters over the full, unfiltered record set. WITHDRAWN contributes
    /// to the total only; ACCEPTED counts as an offer.
    pub fn compute_stats(&self) -> StatsSummary {
        let mut stats = StatsSummary {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                ApplicationStatus::Applied => stats.applied += 1,
                ApplicationStatus::HrScreen
                | ApplicationStatus::TechnicalInterview
                | ApplicationStatus::FinalInterview => stats.interviews += 1,
                ApplicationStatus::Offered | ApplicationStatus::Accepted => stats.offers += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
                ApplicationStatus::Withdrawn => stats.withdrawn += 1,
            }
        }
        stats
    }

    /// Deletes a record after confirmation. The local copy is only dropped
    /// once the store confirms; on store failure the set is reloaded so the
    /// view never assumes a deletion that did not happen.
    pub async fn remove(
        &mut self,
        store: &dyn ApplicationStore,
        confirm: &dyn ConfirmDelete,
        user_id: i64,
        id: i64,
    ) -> bool {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return false;
        };
        if !confirm.confirm(&self.records[index]) {
            return false;
        }
        match store.delete(id).await {
            Ok(()) => {
                self.records.remove(index);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Failed to delete application, reloading");
                self.load(store, user_id).await;
                self.error = Some("Failed to delete application".to_string());
                false
            }
        }
    }
}

fn matches_search(record: &ApplicationRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.position.to_lowercase().contains(needle)
        || record.company.to_lowercase().contains(needle)
        || record
            .location
            .as_deref()
            .map(|location| location.to_lowercase().contains(needle))
            .unwrap_or(false)
}

fn compare(a: &ApplicationRecord, b: &ApplicationRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::DateApplied => a.date_applied.cmp(&b.date_applied),
        SortKey::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
        SortKey::Position => a.position.to_lowercase().cmp(&b.position.to_lowercase()),
        SortKey::Status => a.status.as_code().cmp(b.status.as_code()),
    }
}
