//! Injected capabilities for the pricing engine.
//!
//! The engine never reads the system clock or a holiday source directly.
//! Both are passed in so that every computation is deterministic given its
//! inputs.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use routefare_core::{Clock, SystemClock};
///
/// let before = chrono::Utc::now();
/// assert!(SystemClock.now() >= before);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of public holidays used by the holiday surcharge.
pub trait HolidayCalendar: Send + Sync {
    /// Whether `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar with no holidays. The surcharge never applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Calendar backed by an explicit set of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    /// Build a calendar from a list of dates.
    #[must_use]
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list of ISO dates (`2025-12-25,2026-01-01`).
    ///
    /// Entries that are not valid dates are skipped.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .filter_map(|entry| NaiveDate::parse_from_str(entry.trim(), "%Y-%m-%d").ok()),
        )
    }

    /// Number of configured holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no holidays are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Dependencies the HTTP layer hands to the engine on every request.
#[derive(Clone)]
pub struct PricingEnvironment {
    /// Source of "now"
    pub clock: Arc<dyn Clock>,
    /// Holiday lookup
    pub holidays: Arc<dyn HolidayCalendar>,
}

impl PricingEnvironment {
    /// Create an environment from explicit capabilities.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self { clock, holidays }
    }

    /// Production environment: system clock, no holidays.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(NoHolidays))
    }
}

impl Default for PricingEnvironment {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for PricingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEnvironment")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
