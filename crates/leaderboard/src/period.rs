//! Leaderboard periods and their keys.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use rankline_primitives::PeriodKey;

use crate::error::{LeaderboardError, Result};

/// One leaderboard period: the set key and the last instant it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    key: PeriodKey,
    ends_at: DateTime<Utc>,
}

impl Period {
    pub fn new(key: PeriodKey, ends_at: DateTime<Utc>) -> Self {
        Self { key, ends_at }
    }

    pub fn key(&self) -> &PeriodKey {
        &self.key
    }

    /// Last millisecond that still belongs to the period.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }
}

/// Maps an instant to the period it falls in.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait PeriodKeyProvider: Send + Sync {
    fn period_at(&self, at: DateTime<Utc>) -> Result<Period>;
}

/// Calendar-month periods keyed `<prefix>:<YYYYMM>`.
///
/// Month boundaries are taken in a fixed UTC offset; the period ends at
/// `23:59:59.999` on the last day of the month in that offset.
#[derive(Debug, Clone)]
pub struct MonthlyPeriods {
    prefix: String,
    offset: FixedOffset,
}

impl MonthlyPeriods {
    pub fn new(prefix: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            prefix: prefix.into(),
            offset,
        }
    }

    pub fn utc(prefix: impl Into<String>) -> Self {
        Self::new(prefix, Utc.fix())
    }
}

impl PeriodKeyProvider for MonthlyPeriods {
    fn period_at(&self, at: DateTime<Utc>) -> Result<Period> {
        let local = at.with_timezone(&self.offset);
        let (year, month) = (local.year(), local.month());
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let next_start = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
            .ok_or_else(|| {
                LeaderboardError::Period(format!("no month follows {year:04}-{month:02}"))
            })?;
        let ends_at = (next_start - TimeDelta::milliseconds(1)).with_timezone(&Utc);

        Ok(Period::new(
            PeriodKey::monthly(&self.prefix, year, month),
            ends_at,
        ))
    }
}

/// Always the same period, whatever the time.
///
/// Pins a service to one set, e.g. to replay or inspect a past month.
#[derive(Debug, Clone)]
pub struct FixedPeriod(Period);

impl FixedPeriod {
    pub fn new(period: Period) -> Self {
        Self(period)
    }
}

impl PeriodKeyProvider for FixedPeriod {
    fn period_at(&self, _at: DateTime<Utc>) -> Result<Period> {
        Ok(self.0.clone())
    }
}
