//! ## Summary
//! Task service: series creation and the operations that keep parent/child
//! links consistent when part of a series is removed or edited.
//!
//! Every public operation runs inside one store transaction, so a failure
//! part-way through (for example after promoting a new root but before
//! deleting the old one) leaves storage untouched. Validation always happens
//! before the transaction opens.

use chrono::{Datelike, Days, NaiveDate};
use taska_core::clock::Clock;
use taska_core::validation::FieldErrors;
use taska_db::db::repository::{TaskRepository, TaskStore};
use taska_db::db::transaction::with_transaction;
use taska_db::model::catalog::{Role, Shift};
use taska_db::model::series::Series;
use taska_db::model::task::Task;

use crate::auth::Caller;
use crate::error::{ServiceError, ServiceResult};
use crate::recurrence::declaration::{CreateTaskRequest, ValidatedRecurrence};
use crate::recurrence::{generator, validator};
use crate::task::filter::TaskFilter;
use crate::task::series::{Promotion, plan_promotion, tail_from};

/// Entry point for task operations over a [`TaskStore`].
pub struct TaskService<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
}

impl<'a, S: TaskStore> TaskService<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// ## Summary
    /// Validates a declaration and persists its whole series.
    ///
    /// ## Side Effects
    /// - Inserts the root, then all children pointing at it
    ///
    /// ## Errors
    /// Returns a validation error, `NotFound` for an unknown role or shift, or
    /// a storage error.
    #[tracing::instrument(skip(self, request), fields(kind = ?request.kind))]
    pub fn create(&self, request: &CreateTaskRequest) -> ServiceResult<Task> {
        let today = self.clock.today();
        let decl = validator::validate(request, today)?;
        let root = with_transaction(self.store, |tx| create_series(tx, &decl, today))?;
        tracing::info!(root_id = %root.id, date = %root.date, "Created task series");
        Ok(root)
    }

    /// ## Summary
    /// Creates several series atomically. Either all are stored or none.
    ///
    /// ## Errors
    /// Returns the first failure; nothing is stored in that case.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub fn create_all(&self, requests: &[CreateTaskRequest]) -> ServiceResult<Vec<Task>> {
        let today = self.clock.today();
        let decls = requests
            .iter()
            .map(|request| validator::validate(request, today))
            .collect::<Result<Vec<_>, FieldErrors>>()?;
        with_transaction(self.store, |tx| {
            decls
                .iter()
                .map(|decl| create_series(tx, decl, today))
                .collect()
        })
    }

    /// ## Summary
    /// Removes exactly one occurrence.
    ///
    /// Removing a root that still has children promotes the earliest child to
    /// root and repoints the remaining children at it.
    ///
    /// ## Errors
    /// Returns `NotFound` if `id` does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub fn delete_single(&self, id: uuid::Uuid) -> ServiceResult<()> {
        with_transaction(self.store, |tx| delete_single(tx, id))
    }

    /// ## Summary
    /// Removes an occurrence and every occurrence of its series dated on or
    /// after it. Returns how many rows were deleted.
    ///
    /// ## Errors
    /// Returns `NotFound` if `id` does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub fn delete_from(&self, id: uuid::Uuid) -> ServiceResult<usize> {
        with_transaction(self.store, |tx| delete_from(tx, id))
    }

    /// ## Summary
    /// Rewrites the description of an occurrence and of every later
    /// occurrence in its series. Dates, kinds and links are left alone.
    ///
    /// ## Errors
    /// Returns a validation error for a blank description, `NotFound` if `id`
    /// does not exist, or a storage error.
    #[tracing::instrument(skip(self, description))]
    pub fn update_description_from(
        &self,
        id: uuid::Uuid,
        description: &str,
    ) -> ServiceResult<Vec<Task>> {
        if description.trim().is_empty() {
            return Err(FieldErrors::single("description", "Description must not be blank").into());
        }
        with_transaction(self.store, |tx| update_description_from(tx, id, description))
    }

    /// ## Summary
    /// Occurrences in the Monday–Sunday week containing `date`, ordered by date.
    ///
    /// ## Errors
    /// Returns a storage error.
    #[tracing::instrument(skip(self))]
    pub fn find_week(&self, date: NaiveDate) -> ServiceResult<Vec<Task>> {
        let (monday, sunday) = week_bounds(date);
        with_transaction(self.store, |tx| Ok(tx.find_by_date_range(monday, sunday)?))
    }

    /// ## Summary
    /// Every occurrence of the series `id` belongs to, ordered by date.
    ///
    /// ## Errors
    /// Returns `NotFound` if `id` does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub fn find_series(&self, id: uuid::Uuid) -> ServiceResult<Vec<Task>> {
        with_transaction(self.store, |tx| {
            let task = load_task(tx, id)?;
            Ok(load_series(tx, task.series_root_id())?.into_ordered())
        })
    }

    /// ## Errors
    /// Returns a storage error.
    pub fn find_all(&self) -> ServiceResult<Vec<Task>> {
        with_transaction(self.store, |tx| Ok(tx.find_all()?))
    }

    /// Role catalog, ordered by name.
    ///
    /// ## Errors
    /// Returns a storage error.
    pub fn find_roles(&self) -> ServiceResult<Vec<Role>> {
        with_transaction(self.store, |tx| Ok(tx.find_roles()?))
    }

    /// Shift catalog, ordered by name.
    ///
    /// ## Errors
    /// Returns a storage error.
    pub fn find_shifts(&self) -> ServiceResult<Vec<Shift>> {
        with_transaction(self.store, |tx| Ok(tx.find_shifts()?))
    }

    /// ## Summary
    /// Filtered lookup scoped to what `caller` may see, ordered by date.
    ///
    /// ## Errors
    /// Returns a validation error for malformed filter fields, or a storage error.
    #[tracing::instrument(skip(self, filter), fields(role_id = %caller.role_id, privileged = caller.privileged))]
    pub fn search(&self, filter: &TaskFilter, caller: &Caller) -> ServiceResult<Vec<Task>> {
        let query = filter.to_query(caller)?;
        tracing::debug!(?query, "Searching tasks");
        with_transaction(self.store, |tx| Ok(tx.find_matching(&query)?))
    }

    /// ## Summary
    /// Flips the completed flag, stamping or clearing the completion time.
    ///
    /// ## Errors
    /// Returns `NotFound` if `id` does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub fn toggle_completion(&self, id: uuid::Uuid) -> ServiceResult<Task> {
        let now = self.clock.now();
        with_transaction(self.store, |tx| {
            let mut task = load_task(tx, id)?;
            task.completed = !task.completed;
            task.completed_at = task.completed.then_some(now);
            Ok(tx.save(&task)?)
        })
    }
}

/// Monday on or before `date` and Sunday on or after it.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(from_monday))
        .unwrap_or(NaiveDate::MIN);
    let sunday = date
        .checked_add_days(Days::new(6 - from_monday))
        .unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

fn load_task<R: TaskRepository>(tx: &R, id: uuid::Uuid) -> ServiceResult<Task> {
    tx.find_by_id(id)?
        .ok_or(ServiceError::task_not_found(id))
}

fn load_series<R: TaskRepository>(tx: &R, root_id: uuid::Uuid) -> ServiceResult<Series> {
    Series::from_rows(root_id, tx.find_series(root_id)?)
        .ok_or(ServiceError::InvariantViolation("series root is missing"))
}

fn create_series<R: TaskRepository>(
    tx: &mut R,
    decl: &ValidatedRecurrence,
    today: NaiveDate,
) -> ServiceResult<Task> {
    let role = tx.find_role(decl.role_id)?.ok_or(ServiceError::NotFound {
        entity: "role",
        id: decl.role_id,
    })?;
    let shift = tx.find_shift(decl.shift_id)?.ok_or(ServiceError::NotFound {
        entity: "shift",
        id: decl.shift_id,
    })?;

    let root = tx.insert(generator::build_root(decl, &role, &shift, today))?;
    let children = generator::build_children(&root, decl);
    tracing::debug!(root_id = %root.id, children = children.len(), "Persisting series");
    if !children.is_empty() {
        tx.insert_batch(children)?;
    }
    Ok(root)
}

fn delete_single<R: TaskRepository>(tx: &mut R, id: uuid::Uuid) -> ServiceResult<()> {
    let task = load_task(tx, id)?;
    if !task.is_root() {
        tracing::debug!("Deleting child occurrence");
        return Ok(tx.delete(id)?);
    }

    let children = tx.find_by_parent_id(id)?;
    match plan_promotion(children) {
        None => {
            tracing::debug!("Deleting childless root");
        }
        Some(Promotion {
            promoted,
            repointed,
        }) => {
            tracing::debug!(
                promoted_id = %promoted.id,
                repointed = repointed.len(),
                "Promoting earliest child to root"
            );
            tx.save(&promoted)?;
            if !repointed.is_empty() {
                tx.save_batch(&repointed)?;
            }
        }
    }
    Ok(tx.delete(id)?)
}

fn delete_from<R: TaskRepository>(tx: &mut R, id: uuid::Uuid) -> ServiceResult<usize> {
    let target = load_task(tx, id)?;
    let series = load_series(tx, target.series_root_id())?;
    let ids: Vec<uuid::Uuid> = tail_from(series, &target)
        .iter()
        .map(|task| task.id)
        .collect();

    tx.delete_batch(&ids)?;
    let mut deleted = ids.len();
    if !ids.contains(&target.id) {
        tx.delete(target.id)?;
        deleted += 1;
    }
    tracing::debug!(deleted, from = %target.date, "Deleted series tail");
    Ok(deleted)
}

fn update_description_from<R: TaskRepository>(
    tx: &mut R,
    id: uuid::Uuid,
    description: &str,
) -> ServiceResult<Vec<Task>> {
    let target = load_task(tx, id)?;
    let series = load_series(tx, target.series_root_id())?;
    let mut tail = tail_from(series, &target);
    for task in &mut tail {
        task.description = description.to_string();
    }
    tracing::debug!(updated = tail.len(), from = %target.date, "Updating series tail");
    Ok(tx.save_batch(&tail)?)
}
