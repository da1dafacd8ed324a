//! ## Summary
//! In-process [`TaskStore`] implementation.
//!
//! Transactions work on a private copy of the store state which replaces the
//! shared state only when the transaction callback succeeds. Transactions
//! are serialized on the state mutex.
//!
//! A write budget can be armed with [`MemoryStore::fail_writes_after`] to make
//! the store report `Unavailable` part-way through a transaction.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::db::query::{DateFilter, TaskQuery};
use crate::db::repository::{TaskRepository, TaskStore};
use crate::error::{DbError, DbResult};
use crate::model::catalog::{Role, Shift};
use crate::model::task::{NewTask, Task};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    tasks: BTreeMap<uuid::Uuid, Task>,
    roles: BTreeMap<uuid::Uuid, Role>,
    shifts: BTreeMap<uuid::Uuid, Shift>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    write_budget: Mutex<Option<usize>>,
}

/// Locks a mutex and recovers from poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            mutex.clear_poison();
            poisoned.into_inner()
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a role and returns it.
    pub fn add_role(&self, name: impl Into<String>) -> Role {
        let role = Role {
            id: uuid::Uuid::now_v7(),
            name: name.into(),
        };
        lock(&self.state).roles.insert(role.id, role.clone());
        role
    }

    /// Registers a shift and returns it.
    pub fn add_shift(&self, name: impl Into<String>) -> Shift {
        let shift = Shift {
            id: uuid::Uuid::now_v7(),
            name: name.into(),
        };
        lock(&self.state).shifts.insert(shift.id, shift.clone());
        shift
    }

    #[must_use]
    pub fn role_by_name(&self, name: &str) -> Option<Role> {
        lock(&self.state)
            .roles
            .values()
            .find(|role| role.name == name)
            .cloned()
    }

    #[must_use]
    pub fn shift_by_name(&self, name: &str) -> Option<Shift> {
        lock(&self.state)
            .shifts
            .values()
            .find(|shift| shift.name == name)
            .cloned()
    }

    /// Committed tasks ordered by `(date, id)`.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        sorted(lock(&self.state).tasks.values().cloned())
    }

    /// Makes every transaction fail once it has performed `writes` writes.
    /// `None` disarms the budget.
    pub fn fail_writes_after(&self, writes: Option<usize>) {
        *lock(&self.write_budget) = writes;
    }
}

impl TaskStore for MemoryStore {
    type Tx = MemoryTx;

    fn transaction<T, E, F>(&self, callback: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Tx) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut state = lock(&self.state);
        let mut tx = MemoryTx {
            state: state.clone(),
            writes_left: *lock(&self.write_budget),
        };
        let value = callback(&mut tx)?;
        *state = tx.state;
        tracing::trace!(tasks = state.tasks.len(), "Transaction committed");
        Ok(value)
    }
}

/// Working copy of the store for one transaction.
#[derive(Debug)]
pub struct MemoryTx {
    state: MemoryState,
    writes_left: Option<usize>,
}

impl MemoryTx {
    fn spend_write(&mut self) -> DbResult<()> {
        match self.writes_left.as_mut() {
            Some(0) => Err(DbError::Unavailable("write budget exhausted".to_string())),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn select(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        sorted(self.state.tasks.values().filter(|&t| predicate(t)).cloned())
    }
}

fn sorted(tasks: impl Iterator<Item = Task>) -> Vec<Task> {
    let mut tasks: Vec<Task> = tasks.collect();
    tasks.sort_by_key(|task| (task.date, task.id));
    tasks
}

impl TaskRepository for MemoryTx {
    fn find_by_id(&self, id: uuid::Uuid) -> DbResult<Option<Task>> {
        Ok(self.state.tasks.get(&id).cloned())
    }

    fn find_by_parent_id(&self, parent_id: uuid::Uuid) -> DbResult<Vec<Task>> {
        Ok(self
            .state
            .tasks
            .values()
            .filter(|task| task.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    fn find_series(&self, root_id: uuid::Uuid) -> DbResult<Vec<Task>> {
        Ok(self.select(|task| task.id == root_id || task.parent_id == Some(root_id)))
    }

    fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Task>> {
        let range = DateFilter::Between {
            start: Some(start),
            end: Some(end),
        };
        Ok(self.select(|task| range.matches(task.date)))
    }

    fn find_matching(&self, query: &TaskQuery) -> DbResult<Vec<Task>> {
        Ok(self.select(|task| query.matches(task)))
    }

    fn find_all(&self) -> DbResult<Vec<Task>> {
        Ok(self.select(|_| true))
    }

    fn exists_by_id(&self, id: uuid::Uuid) -> DbResult<bool> {
        Ok(self.state.tasks.contains_key(&id))
    }

    fn insert(&mut self, task: NewTask) -> DbResult<Task> {
        self.spend_write()?;
        let task = task.into_task(uuid::Uuid::now_v7());
        self.state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    fn insert_batch(&mut self, tasks: Vec<NewTask>) -> DbResult<Vec<Task>> {
        self.spend_write()?;
        let inserted: Vec<Task> = tasks
            .into_iter()
            .map(|task| task.into_task(uuid::Uuid::now_v7()))
            .collect();
        for task in &inserted {
            self.state.tasks.insert(task.id, task.clone());
        }
        Ok(inserted)
    }

    fn save(&mut self, task: &Task) -> DbResult<Task> {
        self.spend_write()?;
        let slot = self
            .state
            .tasks
            .get_mut(&task.id)
            .ok_or(DbError::MissingRecord(task.id))?;
        slot.clone_from(task);
        Ok(task.clone())
    }

    fn save_batch(&mut self, tasks: &[Task]) -> DbResult<Vec<Task>> {
        self.spend_write()?;
        if let Some(missing) = tasks.iter().find(|t| !self.state.tasks.contains_key(&t.id)) {
            return Err(DbError::MissingRecord(missing.id));
        }
        for task in tasks {
            self.state.tasks.insert(task.id, task.clone());
        }
        Ok(tasks.to_vec())
    }

    fn delete(&mut self, id: uuid::Uuid) -> DbResult<()> {
        self.spend_write()?;
        self.state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::MissingRecord(id))
    }

    fn delete_batch(&mut self, ids: &[uuid::Uuid]) -> DbResult<()> {
        self.spend_write()?;
        if let Some(missing) = ids.iter().find(|id| !self.state.tasks.contains_key(id)) {
            return Err(DbError::MissingRecord(*missing));
        }
        for id in ids {
            self.state.tasks.remove(id);
        }
        Ok(())
    }

    fn find_role(&self, id: uuid::Uuid) -> DbResult<Option<Role>> {
        Ok(self.state.roles.get(&id).cloned())
    }

    fn find_shift(&self, id: uuid::Uuid) -> DbResult<Option<Shift>> {
        Ok(self.state.shifts.get(&id).cloned())
    }

    fn find_roles(&self) -> DbResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.state.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    fn find_shifts(&self) -> DbResult<Vec<Shift>> {
        let mut shifts: Vec<Shift> = self.state.shifts.values().cloned().collect();
        shifts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shifts)
    }
}
