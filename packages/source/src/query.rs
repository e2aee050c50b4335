//! Event query windows and page-size limits.

use chrono::{Datelike, NaiveDate, Utc};

/// Page size used when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Largest page size a query may ask for. Clients may cap it further to
/// their configured maximum.
pub const MAX_LIMIT: u32 = 1000;

/// Time window an event query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWindow {
    /// No date restriction.
    All,
    /// A single calendar year.
    Year(i32),
    /// Inclusive range of calendar years.
    Range {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },
}

/// A single capped request for events in the configured country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventQuery {
    /// Time window.
    pub window: QueryWindow,
    /// Page size, always within `1..=MAX_LIMIT`.
    pub limit: u32,
}

impl EventQuery {
    /// All events, optionally restricted to `year`.
    #[must_use]
    pub fn events(year: Option<i32>, limit: Option<i64>) -> Self {
        Self {
            window: year.map_or(QueryWindow::All, QueryWindow::Year),
            limit: clamp_limit(limit),
        }
    }

    /// Events from `start` through `end` inclusive.
    #[must_use]
    pub fn range(start: i32, end: i32, limit: Option<i64>) -> Self {
        Self {
            window: QueryWindow::Range { start, end },
            limit: clamp_limit(limit),
        }
    }

    /// Events from the calendar year before `today`, the most recent
    /// complete year.
    #[must_use]
    pub fn recent_from(today: NaiveDate, limit: Option<i64>) -> Self {
        Self {
            window: QueryWindow::Year(today.year() - 1),
            limit: clamp_limit(limit),
        }
    }

    /// [`EventQuery::recent_from`] relative to the current UTC date.
    #[must_use]
    pub fn recent(limit: Option<i64>) -> Self {
        Self::recent_from(Utc::now().date_naive(), limit)
    }

    /// `(StartDate, EndDate)` bounds in `YYYY-MM-DD` form, if restricted.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(String, String)> {
        match self.window {
            QueryWindow::All => None,
            QueryWindow::Year(year) => Some((format!("{year}-01-01"), format!("{year}-12-31"))),
            QueryWindow::Range { start, end } => {
                Some((format!("{start}-01-01"), format!("{end}-12-31")))
            }
        }
    }

    /// Upstream query parameters for `country_code`.
    #[must_use]
    pub fn params(&self, country_code: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pagesize", self.limit.to_string()),
            ("Country", country_code.to_string()),
        ];
        if let Some((start, end)) = self.date_bounds() {
            params.push(("StartDate", start));
            params.push(("EndDate", end));
        }
        params
    }

    /// Year the query targets when it is a single year.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        match self.window {
            QueryWindow::Year(year) => Some(year),
            QueryWindow::All | QueryWindow::Range { .. } => None,
        }
    }
}

/// Clamps a requested page size into `1..=MAX_LIMIT`, defaulting to
/// [`DEFAULT_LIMIT`].
#[must_use]
pub fn clamp_limit(limit: Option<i64>) -> u32 {
    limit.map_or(DEFAULT_LIMIT, |n| {
        u32::try_from(n.clamp(1, i64::from(MAX_LIMIT))).unwrap_or(DEFAULT_LIMIT)
    })
}
