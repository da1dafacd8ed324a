use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use taska_core::clock::Clock;
use taska_db::db::memory::MemoryStore;
use taska_service::recurrence::CreateTaskRequest;
use taska_service::task::TaskService;

use super::Seeder;

/// One task declaration in a startup plan. Role and shift are given by
/// catalog name rather than id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub description: String,
    pub role: String,
    pub shift: String,
    pub kind: Option<String>,
    pub weekday: Option<String>,
    pub day_of_month: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub repeat_count: Option<i64>,
    pub max_date: Option<NaiveDate>,
}

impl PlanEntry {
    /// ## Summary
    /// Resolves catalog names into a creation request.
    ///
    /// ## Errors
    /// Returns an error naming the role or shift that is not in the store.
    pub fn into_request(self, store: &MemoryStore) -> anyhow::Result<CreateTaskRequest> {
        let role = store
            .role_by_name(&self.role)
            .with_context(|| format!("Unknown role in plan: {}", self.role))?;
        let shift = store
            .shift_by_name(&self.shift)
            .with_context(|| format!("Unknown shift in plan: {}", self.shift))?;

        Ok(CreateTaskRequest {
            description: self.description,
            role_id: role.id,
            shift_id: shift.id,
            kind: self.kind,
            weekday: self.weekday,
            day_of_month: self.day_of_month,
            start_date: self.start_date,
            repeat_count: self.repeat_count,
            max_date: self.max_date,
        })
    }
}

/// ## Summary
/// Parses a JSON array of plan entries.
///
/// ## Errors
/// Returns an error if the document is not a valid plan.
pub fn parse_plan(json: &str) -> anyhow::Result<Vec<PlanEntry>> {
    serde_json::from_str(json).context("Invalid task plan")
}

/// Creates every series listed in a JSON plan file, all or nothing.
pub struct PlanSeeder<'a> {
    pub path: PathBuf,
    pub clock: &'a dyn Clock,
}

impl<'a> PlanSeeder<'a> {
    #[must_use]
    pub fn new(path: PathBuf, clock: &'a dyn Clock) -> Self {
        Self { path, clock }
    }

    /// ## Summary
    /// Resolves and creates the entries of an already parsed plan.
    ///
    /// ## Errors
    /// Returns an error if a name does not resolve or any entry is rejected.
    pub fn apply(&self, entries: Vec<PlanEntry>, store: &MemoryStore) -> anyhow::Result<usize> {
        let requests = entries
            .into_iter()
            .map(|entry| entry.into_request(store))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let roots = TaskService::new(store, self.clock).create_all(&requests)?;
        Ok(roots.len())
    }
}

impl Seeder for PlanSeeder<'_> {
    fn seed(&self, store: &MemoryStore) -> anyhow::Result<()> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read plan {}", self.path.display()))?;
        let created = self.apply(parse_plan(&json)?, store)?;
        tracing::info!(path = %self.path.display(), series = created, "Plan loaded");
        Ok(())
    }
}
