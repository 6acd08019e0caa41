use tracing::warn;

use kommunalka_types::AccountStatus;

use crate::route::Route;
use crate::session::Session;

/// Coins spent on one discounted bill payment; also the balance below which
/// the service reports `needs_coins`.
pub const COINS_PER_DISCOUNT: i64 = 200;

/// Where an account stands, collapsed from the session and the service's
/// status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Unauthenticated,
    NeedsSubscription,
    NeedsCoins,
    ReadyForPayment,
}

impl AccountState {
    /// Collapse the status flags. A missing subscription outranks a low
    /// coin balance.
    pub fn from_status(status: &AccountStatus) -> Self {
        let state = if status.needs_subscription {
            AccountState::NeedsSubscription
        } else if status.needs_coins {
            AccountState::NeedsCoins
        } else {
            AccountState::ReadyForPayment
        };

        if status.ready_for_payment != (state == AccountState::ReadyForPayment) {
            warn!(
                "Status flags disagree (needs_subscription={}, needs_coins={}, ready_for_payment={}); using {:?}",
                status.needs_subscription, status.needs_coins, status.ready_for_payment, state
            );
        }

        state
    }

    /// `None` while signed in but before the status has been fetched:
    /// nothing is known yet, so nothing is assumed.
    pub fn resolve(session: Option<&Session>, status: Option<&AccountStatus>) -> Option<Self> {
        match (session, status) {
            (None, _) => Some(AccountState::Unauthenticated),
            (Some(_), Some(status)) => Some(Self::from_status(status)),
            (Some(_), None) => None,
        }
    }

    /// Screen the dashboard must send the user to instead of rendering.
    pub fn redirect(self) -> Option<Route> {
        match self {
            AccountState::Unauthenticated => Some(Route::Login),
            AccountState::NeedsSubscription => Some(Route::Subscription),
            AccountState::NeedsCoins => Some(Route::Coins),
            AccountState::ReadyForPayment => None,
        }
    }

    pub fn is_ready(self) -> bool {
        self == AccountState::ReadyForPayment
    }
}

/// Number of discounted payments a balance covers.
pub fn discounted_payments(coins_balance: i64) -> i64 {
    if coins_balance < COINS_PER_DISCOUNT {
        0
    } else {
        coins_balance / COINS_PER_DISCOUNT
    }
}
