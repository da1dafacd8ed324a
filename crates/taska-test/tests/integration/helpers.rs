#![allow(dead_code, clippy::expect_used)]
//! Test helpers for integration tests.
//!
//! Provides a seeded store, a pinned clock and request builders.

use chrono::{Days, Months, NaiveDate};

pub use taska_test::component::auth::Caller;
pub use taska_test::component::clock::{Clock, FixedClock};
pub use taska_test::component::db::memory::MemoryStore;
pub use taska_test::component::error::ServiceError;
pub use taska_test::component::model::task::Task;
pub use taska_test::component::recurrence::CreateTaskRequest;
pub use taska_test::component::task::{TaskFilter, TaskService};

/// Monday 2026-10-19.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub fn plus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).expect("date in range")
}

pub fn minus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).expect("date in range")
}

pub fn plus_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).expect("date in range")
}

/// Store with two roles and one shift, plus a clock pinned to a date.
pub struct Fixture {
    pub store: MemoryStore,
    pub clock: FixedClock,
    pub cocina: uuid::Uuid,
    pub sala: uuid::Uuid,
    pub encargado: uuid::Uuid,
    pub tarde: uuid::Uuid,
}

impl Fixture {
    pub fn at(today: NaiveDate) -> Self {
        let store = MemoryStore::new();
        let cocina = store.add_role("COCINA").id;
        let sala = store.add_role("SALA").id;
        let encargado = store.add_role("ENCARGADO").id;
        let tarde = store.add_shift("TARDE").id;
        Self {
            store,
            clock: FixedClock::at_date(today),
            cocina,
            sala,
            encargado,
            tarde,
        }
    }

    pub fn service(&self) -> TaskService<'_, MemoryStore> {
        TaskService::new(&self.store, &self.clock)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Request for the COCINA role on the TARDE shift.
    pub fn request(&self, kind: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            description: "Limpiar campana".to_string(),
            role_id: self.cocina,
            shift_id: self.tarde,
            kind: Some(kind.to_string()),
            ..CreateTaskRequest::default()
        }
    }

    pub fn weekly(&self, weekday: &str, repeat_count: i64) -> CreateTaskRequest {
        CreateTaskRequest {
            weekday: Some(weekday.to_string()),
            repeat_count: Some(repeat_count),
            ..self.request("WEEKLY")
        }
    }

    pub fn monthly(&self, day_of_month: i64, repeat_count: i64) -> CreateTaskRequest {
        CreateTaskRequest {
            day_of_month: Some(day_of_month),
            repeat_count: Some(repeat_count),
            ..self.request("MONTHLY")
        }
    }

    pub fn daily(&self, repeat_count: i64) -> CreateTaskRequest {
        CreateTaskRequest {
            repeat_count: Some(repeat_count),
            ..self.request("DAILY")
        }
    }

    /// Creates a series and returns all of its rows ordered by date.
    pub fn create_series(&self, request: &CreateTaskRequest) -> Vec<Task> {
        let root = self.service().create(request).expect("series is created");
        self.service()
            .find_series(root.id)
            .expect("series is readable")
    }

    pub fn rows(&self) -> Vec<Task> {
        self.store.snapshot()
    }

    pub fn roots(&self) -> Vec<Task> {
        self.rows().into_iter().filter(Task::is_root).collect()
    }
}

pub fn dates(tasks: &[Task]) -> Vec<NaiveDate> {
    tasks.iter().map(|t| t.date).collect()
}
