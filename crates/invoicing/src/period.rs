//! Billing periods.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use toolfleet_core::{DomainError, DomainResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Interval over which rental costs are billed.
///
/// Invariant: `end >= start` (enforced by the constructors and on deserialization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBillingPeriod")]
pub struct BillingPeriod {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBillingPeriod {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    year: Option<i32>,
    month: Option<u32>,
}

impl TryFrom<RawBillingPeriod> for BillingPeriod {
    type Error = DomainError;

    fn try_from(raw: RawBillingPeriod) -> Result<Self, Self::Error> {
        let mut period = BillingPeriod::new(raw.start_date, raw.end_date)?;
        if let Some(year) = raw.year {
            period.year = year;
        }
        if let Some(month) = raw.month {
            if !(1..=12).contains(&month) {
                return Err(DomainError::validation("billing month must be 1-12"));
            }
            period.month = month;
        }
        Ok(period)
    }
}

impl BillingPeriod {
    /// Period between two instants; year and month are taken from `start`.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation(
                "billing period end date must not precede start date",
            ));
        }
        Ok(Self {
            year: start_date.year(),
            month: start_date.month(),
            start_date,
            end_date,
        })
    }

    /// Calendar-month period: first day of the month through the last day of the
    /// month (both at midnight UTC), e.g. Jan 1 – Jan 31.
    pub fn for_month(year: i32, month: u32) -> DomainResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::validation(format!("invalid billing month {year}-{month}")))?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| DomainError::validation(format!("invalid billing month {year}-{month}")))?;
        let last = next_first - Duration::days(1);

        let start = Utc.from_utc_datetime(&first.and_time(chrono::NaiveTime::MIN));
        let end = Utc.from_utc_datetime(&last.and_time(chrono::NaiveTime::MIN));
        Self::new(start, end)
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Days billed for the period: the elapsed time rounded up to whole days.
    ///
    /// A same-instant period bills 0 days; a period exactly one day long bills 1.
    pub fn days_in_period(&self) -> u32 {
        let millis = (self.end_date - self.start_date).num_milliseconds();
        (millis as f64 / MILLIS_PER_DAY).ceil() as u32
    }

    /// `YYYYMM`, as used in invoice numbers.
    pub fn period_code(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Due date for invoices issued for this period.
    pub fn due_date(&self, payment_terms_days: u32) -> DateTime<Utc> {
        self.end_date + Duration::days(i64::from(payment_terms_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn january_bills_thirty_days() {
        let period = BillingPeriod::for_month(2024, 1).unwrap();
        assert_eq!(period.start_date(), at(2024, 1, 1));
        assert_eq!(period.end_date(), at(2024, 1, 31));
        assert_eq!(period.days_in_period(), 30);
        assert_eq!(period.period_code(), "202401");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = BillingPeriod::for_month(2023, 12).unwrap();
        assert_eq!(period.end_date(), at(2023, 12, 31));
        assert_eq!(period.year(), 2023);
        assert_eq!(period.month(), 12);
    }

    #[test]
    fn same_day_period_bills_zero_days() {
        let period = BillingPeriod::new(at(2024, 3, 5), at(2024, 3, 5)).unwrap();
        assert_eq!(period.days_in_period(), 0);
    }

    #[test]
    fn one_day_apart_bills_one_day() {
        let period = BillingPeriod::new(at(2024, 3, 5), at(2024, 3, 6)).unwrap();
        assert_eq!(period.days_in_period(), 1);
    }

    #[test]
    fn partial_days_round_up() {
        let start = at(2024, 3, 5);
        let end = start + Duration::hours(25);
        let period = BillingPeriod::new(start, end).unwrap();
        assert_eq!(period.days_in_period(), 2);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = BillingPeriod::new(at(2024, 3, 6), at(2024, 3, 5)).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("must not precede") => {}
            _ => panic!("Expected validation error for inverted period"),
        }
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(BillingPeriod::for_month(2024, 13).is_err());
    }

    #[test]
    fn due_date_adds_payment_terms() {
        let period = BillingPeriod::for_month(2024, 1).unwrap();
        assert_eq!(period.due_date(30), at(2024, 3, 1));
    }

    #[test]
    fn deserialization_enforces_ordering() {
        let ok = r#"{"startDate":"2024-01-01T00:00:00Z","endDate":"2024-01-31T00:00:00Z","year":2024,"month":1}"#;
        let period: BillingPeriod = serde_json::from_str(ok).unwrap();
        assert_eq!(period.days_in_period(), 30);

        let bad = r#"{"startDate":"2024-02-01T00:00:00Z","endDate":"2024-01-31T00:00:00Z"}"#;
        assert!(serde_json::from_str::<BillingPeriod>(bad).is_err());
    }
}
