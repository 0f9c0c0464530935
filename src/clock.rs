use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use chrono::{Days, Local, NaiveDate};

/// Source of the current calendar date
pub trait Clock: Send + Sync + fmt::Debug {
    /// The date considered "today" for due dates and fines
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    /// Current date, shared between clones
    today: Arc<RwLock<NaiveDate>>,
}

impl ManualClock {
    /// Create a clock stopped at `today`
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Arc::new(RwLock::new(today)) }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.today.write().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move the clock forward by `days`; saturates at the end of the calendar
    pub fn advance(&self, days: u64) {
        let mut today = self.today.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.read().unwrap_or_else(PoisonError::into_inner)
    }
}
