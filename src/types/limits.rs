//! Velocity limit windows
//!
//! This module defines the two limits every account carries once it starts
//! loading funds:
//!
//! - [`DailyLimit`]: budget and transaction count for one UTC calendar day
//! - [`WeeklyLimit`]: budget for one UTC calendar week starting on Monday
//!
//! Both limits follow the same contract, captured by [`WindowedLimit`]:
//! a transaction dated in a later period first replaces the limit with a
//! fresh one anchored at the new period, then the amount is checked against
//! what remains. Checking never consumes budget; only [`WindowedLimit::apply`]
//! does, and only after a successful check.

use super::error::Rejection;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Budget available in a fresh daily window
pub const DAILY_BUDGET: f64 = 5000.0;

/// Number of loads accepted in a fresh daily window
pub const DAILY_TRANSACTIONS: u32 = 3;

/// Budget available in a fresh weekly window
pub const WEEKLY_BUDGET: f64 = 20000.0;

/// Start of the UTC calendar day containing `at`
pub fn day_start(at: DateTime<Utc>) -> DateTime<Utc> {
    midnight(at.date_naive())
}

/// Start of the UTC calendar week (Monday 00:00:00) containing `at`
///
/// The date is shifted by the signed day difference to Monday, counting
/// weekdays from Sunday. A Sunday therefore resolves to the following Monday
/// and already belongs to the next week.
pub fn week_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    let offset = 1 - i64::from(date.weekday().num_days_from_sunday());
    midnight(date + Duration::days(offset))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Shared contract of the daily and weekly limits
///
/// Implementors only describe how their window is computed and what a
/// transaction is checked against; rollover and validation are derived.
pub trait WindowedLimit: Sized {
    /// Build a fresh limit with default allowances for the window containing `at`
    fn anchored_at(at: DateTime<Utc>) -> Self;

    /// Start of the window containing `at`
    fn window_for(at: DateTime<Utc>) -> DateTime<Utc>;

    /// Start of the window this limit currently tracks
    fn window_start(&self) -> DateTime<Utc>;

    /// Check `amount` against the remaining allowance without consuming it
    fn check(&self, amount: f64) -> Result<(), Rejection>;

    /// Consume allowance for an accepted transaction
    ///
    /// Callers must only apply an amount that has just passed [`validate`](Self::validate).
    fn apply(&mut self, amount: f64);

    /// Replace this limit with a fresh one if `at` falls in a later window
    ///
    /// Returns the window start that was discarded, if a rollover happened.
    /// A timestamp in an earlier window never moves the window back.
    fn roll_forward(&mut self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let previous = self.window_start();
        if Self::window_for(at) > previous {
            *self = Self::anchored_at(at);
            Some(previous)
        } else {
            None
        }
    }

    /// Roll the window forward if needed, then check `amount`
    ///
    /// The rollover sticks even when the check fails.
    fn validate(&mut self, amount: f64, at: DateTime<Utc>) -> bool {
        self.roll_forward(at);
        self.check(amount).is_ok()
    }
}

/// Per-day velocity limit
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLimit {
    window_start: DateTime<Utc>,
    remaining_budget: f64,
    remaining_transactions: u32,
}

impl DailyLimit {
    /// Create a daily limit with default allowances for the day containing `at`
    pub fn new(at: DateTime<Utc>) -> Self {
        DailyLimit {
            window_start: day_start(at),
            remaining_budget: DAILY_BUDGET,
            remaining_transactions: DAILY_TRANSACTIONS,
        }
    }

    pub fn remaining_budget(&self) -> f64 {
        self.remaining_budget
    }

    pub fn remaining_transactions(&self) -> u32 {
        self.remaining_transactions
    }
}

impl WindowedLimit for DailyLimit {
    fn anchored_at(at: DateTime<Utc>) -> Self {
        DailyLimit::new(at)
    }

    fn window_for(at: DateTime<Utc>) -> DateTime<Utc> {
        day_start(at)
    }

    fn window_start(&self) -> DateTime<Utc> {
        self.window_start
    }

    fn check(&self, amount: f64) -> Result<(), Rejection> {
        if self.remaining_budget - amount < 0.0 {
            return Err(Rejection::DailyBudgetExceeded);
        }
        if self.remaining_transactions == 0 {
            return Err(Rejection::DailyCountExceeded);
        }
        Ok(())
    }

    fn apply(&mut self, amount: f64) {
        self.remaining_budget -= amount;
        self.remaining_transactions = self.remaining_transactions.saturating_sub(1);
    }
}

/// Per-week velocity limit
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyLimit {
    window_start: DateTime<Utc>,
    remaining_budget: f64,
}

impl WeeklyLimit {
    /// Create a weekly limit with the default budget for the week containing `at`
    pub fn new(at: DateTime<Utc>) -> Self {
        WeeklyLimit {
            window_start: week_start(at),
            remaining_budget: WEEKLY_BUDGET,
        }
    }

    pub fn remaining_budget(&self) -> f64 {
        self.remaining_budget
    }
}

impl WindowedLimit for WeeklyLimit {
    fn anchored_at(at: DateTime<Utc>) -> Self {
        WeeklyLimit::new(at)
    }

    fn window_for(at: DateTime<Utc>) -> DateTime<Utc> {
        week_start(at)
    }

    fn window_start(&self) -> DateTime<Utc> {
        self.window_start
    }

    fn check(&self, amount: f64) -> Result<(), Rejection> {
        if self.remaining_budget - amount < 0.0 {
            return Err(Rejection::WeeklyBudgetExceeded);
        }
        Ok(())
    }

    fn apply(&mut self, amount: f64) {
        self.remaining_budget -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[rstest]
    #[case::midday("2000-01-05T13:45:10Z", "2000-01-05T00:00:00Z")]
    #[case::already_midnight("2000-01-05T00:00:00Z", "2000-01-05T00:00:00Z")]
    #[case::last_second("2000-01-05T23:59:59Z", "2000-01-05T00:00:00Z")]
    #[case::offset_normalized("2000-01-05T23:30:00-05:00", "2000-01-06T00:00:00Z")]
    fn test_day_start(#[case] at: &str, #[case] expected: &str) {
        assert_eq!(day_start(utc(at)), utc(expected));
    }

    #[rstest]
    #[case::monday("2000-01-03T08:00:00Z", "2000-01-03T00:00:00Z")]
    #[case::wednesday("2000-01-05T08:00:00Z", "2000-01-03T00:00:00Z")]
    #[case::saturday("2000-01-08T23:59:59Z", "2000-01-03T00:00:00Z")]
    #[case::sunday_opens_next_week("2000-01-09T00:00:00Z", "2000-01-10T00:00:00Z")]
    #[case::sunday_across_month_boundary("2000-01-30T12:00:00Z", "2000-01-31T00:00:00Z")]
    #[case::sunday_across_year_boundary("1999-12-26T12:00:00Z", "1999-12-27T00:00:00Z")]
    #[case::across_year_boundary("2000-01-01T12:00:00Z", "1999-12-27T00:00:00Z")]
    #[case::across_month_boundary("2000-03-02T12:00:00Z", "2000-02-28T00:00:00Z")]
    #[case::leap_day("2000-02-29T12:00:00Z", "2000-02-28T00:00:00Z")]
    fn test_week_start(#[case] at: &str, #[case] expected: &str) {
        assert_eq!(week_start(utc(at)), utc(expected));
    }

    #[test]
    fn test_new_daily_limit_has_defaults() {
        let limit = DailyLimit::new(utc("2000-01-05T13:45:10Z"));

        assert_eq!(limit.window_start(), utc("2000-01-05T00:00:00Z"));
        assert_eq!(limit.remaining_budget(), DAILY_BUDGET);
        assert_eq!(limit.remaining_transactions(), DAILY_TRANSACTIONS);
    }

    #[rstest]
    #[case::exactly_budget(5000.0, true)]
    #[case::over_budget(5001.0, false)]
    #[case::under_budget(0.01, true)]
    fn test_daily_single_transaction(#[case] amount: f64, #[case] expected: bool) {
        let at = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(at);

        assert_eq!(limit.validate(amount, at), expected);
    }

    #[test]
    fn test_daily_validate_does_not_consume() {
        let at = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(at);

        assert!(limit.validate(4000.0, at));
        assert!(limit.validate(4000.0, at));
        assert_eq!(limit.remaining_budget(), DAILY_BUDGET);
        assert_eq!(limit.remaining_transactions(), DAILY_TRANSACTIONS);
    }

    #[test]
    fn test_daily_budget_exhausted_after_apply() {
        let at = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(at - Duration::days(1));

        assert!(limit.validate(5000.0, at));
        limit.apply(5000.0);

        assert!(!limit.validate(10.0, at));
        assert_eq!(limit.check(10.0), Err(Rejection::DailyBudgetExceeded));
    }

    #[test]
    fn test_daily_transaction_count_exhausted() {
        let at = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(at);

        for amount in [2000.0, 1000.0, 500.0] {
            assert!(limit.validate(amount, at));
            limit.apply(amount);
        }

        assert_eq!(limit.remaining_transactions(), 0);
        assert_eq!(limit.remaining_budget(), 1500.0);
        assert!(!limit.validate(500.0, at));
        assert_eq!(limit.check(500.0), Err(Rejection::DailyCountExceeded));
    }

    #[test]
    fn test_daily_rollover_resets_to_defaults() {
        let first = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(first);
        limit.apply(4500.0);
        limit.apply(100.0);

        let next_day = utc("2000-01-06T00:00:01Z");
        assert_eq!(limit.roll_forward(next_day), Some(utc("2000-01-05T00:00:00Z")));
        assert_eq!(limit, DailyLimit::new(next_day));
    }

    #[test]
    fn test_daily_rollover_happens_even_when_rejected() {
        let first = utc("2000-01-05T10:00:00Z");
        let mut limit = DailyLimit::new(first);
        limit.apply(100.0);

        let next_day = utc("2000-01-06T10:00:00Z");
        assert!(!limit.validate(6000.0, next_day));
        assert_eq!(limit.window_start(), utc("2000-01-06T00:00:00Z"));
        assert_eq!(limit.remaining_budget(), DAILY_BUDGET);
    }

    #[test]
    fn test_daily_same_day_does_not_roll() {
        let mut limit = DailyLimit::new(utc("2000-01-05T01:00:00Z"));
        limit.apply(1000.0);

        assert_eq!(limit.roll_forward(utc("2000-01-05T23:59:59Z")), None);
        assert!(limit.validate(4000.0, utc("2000-01-05T23:59:59Z")));
        assert_eq!(limit.remaining_budget(), 4000.0);
        assert_eq!(limit.remaining_transactions(), 2);
    }

    #[test]
    fn test_daily_earlier_day_keeps_current_window() {
        let mut limit = DailyLimit::new(utc("2000-01-05T10:00:00Z"));
        limit.apply(4000.0);

        let earlier = utc("2000-01-04T10:00:00Z");
        assert_eq!(limit.roll_forward(earlier), None);
        assert!(!limit.validate(1500.0, earlier));
        assert_eq!(limit.window_start(), utc("2000-01-05T00:00:00Z"));
    }

    #[rstest]
    #[case::exactly_budget(20000.0, true)]
    #[case::over_budget(20001.0, false)]
    fn test_weekly_single_transaction(#[case] amount: f64, #[case] expected: bool) {
        let at = utc("2000-01-05T10:00:00Z");
        let mut limit = WeeklyLimit::new(at);

        assert_eq!(limit.validate(amount, at), expected);
    }

    #[test]
    fn test_weekly_budget_accumulates_across_days() {
        let mut limit = WeeklyLimit::new(utc("2000-01-03T10:00:00Z"));
        let days = [
            ("2000-01-03T10:00:00Z", 5000.0),
            ("2000-01-04T10:00:00Z", 1000.0),
            ("2000-01-05T10:00:00Z", 5000.0),
            ("2000-01-06T10:00:00Z", 4000.0),
            ("2000-01-07T10:00:00Z", 5000.0),
        ];

        for (at, amount) in days {
            assert!(limit.validate(amount, utc(at)), "expected {} at {} to pass", amount, at);
            limit.apply(amount);
        }

        assert!(!limit.validate(100.0, utc("2000-01-08T10:00:00Z")));
        assert_eq!(limit.check(100.0), Err(Rejection::WeeklyBudgetExceeded));
    }

    #[test]
    fn test_weekly_rollover_on_next_monday() {
        let mut limit = WeeklyLimit::new(utc("2000-01-05T10:00:00Z"));
        limit.apply(20000.0);

        assert!(!limit.validate(1.0, utc("2000-01-08T23:59:59Z")));
        assert!(limit.validate(1.0, utc("2000-01-10T00:00:00Z")));
        assert_eq!(limit.window_start(), utc("2000-01-10T00:00:00Z"));
        assert_eq!(limit.remaining_budget(), WEEKLY_BUDGET);
    }

    #[test]
    fn test_weekly_sunday_starts_fresh_week() {
        let mut limit = WeeklyLimit::new(utc("2000-01-03T10:00:00Z"));
        for day in ["2000-01-03", "2000-01-04", "2000-01-05", "2000-01-06"] {
            let at = utc(&format!("{}T10:00:00Z", day));
            assert!(limit.validate(5000.0, at));
            limit.apply(5000.0);
        }

        let sunday = utc("2000-01-09T10:00:00Z");
        assert!(limit.validate(100.0, sunday));
        assert_eq!(limit.window_start(), utc("2000-01-10T00:00:00Z"));
        limit.apply(100.0);

        // The following Monday stays in the week the Sunday opened.
        assert_eq!(limit.roll_forward(utc("2000-01-10T08:00:00Z")), None);
        assert_eq!(limit.remaining_budget(), WEEKLY_BUDGET - 100.0);
    }
}
