//! Account-related types for the velocity limits engine
//!
//! This module defines the customer [`Account`] and the load funds decision
//! that composes its daily and weekly limits.

use super::error::Rejection;
use super::event::{LimitEvent, LimitObserver};
use super::limits::{DailyLimit, WeeklyLimit, WindowedLimit};
use super::request::{CustomerId, LoadRequest};

/// Customer account state
///
/// Limits are created lazily by the first load that reaches them. An account
/// is not synchronized internally; whoever holds it must serialize calls to
/// [`Account::load_funds`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    customer_id: CustomerId,

    /// Total of all accepted loads
    balance: f64,

    daily_limit: Option<DailyLimit>,
    weekly_limit: Option<WeeklyLimit>,
}

impl Account {
    /// Create a new account with zero balance and no limits yet
    pub fn new(customer_id: impl Into<CustomerId>) -> Self {
        Account {
            customer_id: customer_id.into(),
            balance: 0.0,
            daily_limit: None,
            weekly_limit: None,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn daily_limit(&self) -> Option<&DailyLimit> {
        self.daily_limit.as_ref()
    }

    pub fn weekly_limit(&self) -> Option<&WeeklyLimit> {
        self.weekly_limit.as_ref()
    }

    /// Evaluate a load against both limits and apply it if it passes
    ///
    /// The daily limit is checked first; the weekly limit is only created and
    /// checked once the daily check passes. On acceptance the balance and both
    /// limits are updated together. On rejection nothing is applied, but a
    /// window that rolled forward during the check stays rolled.
    ///
    /// # Returns
    ///
    /// `true` if the load was accepted, `false` if a limit declined it
    pub fn load_funds(&mut self, request: &LoadRequest, observer: &dyn LimitObserver) -> bool {
        match self.admit(request, observer) {
            Ok(()) => {
                observer.notify(LimitEvent::Accepted {
                    id: request.id.clone(),
                    customer_id: self.customer_id.clone(),
                    amount: request.amount,
                });
                true
            }
            Err(reason) => {
                observer.notify(LimitEvent::Rejected {
                    id: request.id.clone(),
                    customer_id: self.customer_id.clone(),
                    reason,
                });
                false
            }
        }
    }

    fn admit(
        &mut self,
        request: &LoadRequest,
        observer: &dyn LimitObserver,
    ) -> Result<(), Rejection> {
        let daily = self.daily_limit.get_or_insert_with(|| {
            let limit = DailyLimit::new(request.time);
            observer.notify(LimitEvent::DailyLimitCreated {
                customer_id: self.customer_id.clone(),
                window_start: limit.window_start(),
            });
            limit
        });
        if let Some(previous) = daily.roll_forward(request.time) {
            observer.notify(LimitEvent::DailyWindowRolled {
                customer_id: self.customer_id.clone(),
                previous,
                current: daily.window_start(),
            });
        }
        daily.check(request.amount)?;

        let weekly = self.weekly_limit.get_or_insert_with(|| {
            let limit = WeeklyLimit::new(request.time);
            observer.notify(LimitEvent::WeeklyLimitCreated {
                customer_id: self.customer_id.clone(),
                window_start: limit.window_start(),
            });
            limit
        });
        if let Some(previous) = weekly.roll_forward(request.time) {
            observer.notify(LimitEvent::WeeklyWindowRolled {
                customer_id: self.customer_id.clone(),
                previous,
                current: weekly.window_start(),
            });
        }
        weekly.check(request.amount)?;

        self.balance += request.amount;
        daily.apply(request.amount);
        weekly.apply(request.amount);
        Ok(())
    }
}
