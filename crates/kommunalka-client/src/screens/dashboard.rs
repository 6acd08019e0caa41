use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{error, info};

use kommunalka_types::{AccountStatus, SubscriptionType};

use super::{Lifetime, Outcome, require_session};
use crate::account::{AccountState, discounted_payments};
use crate::context::AppContext;
use crate::inflight::InFlight;
use crate::notice::Notice;
use crate::route::Route;

/// What the dashboard renders once the status gate lets it through.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub status: AccountStatus,
    pub state: AccountState,
}

impl DashboardView {
    pub fn new(status: AccountStatus) -> Self {
        let state = AccountState::from_status(&status);
        Self { status, state }
    }

    /// `None` when there is no active subscription.
    pub fn subscription_label(&self) -> Option<&'static str> {
        if !self.status.has_subscription {
            return None;
        }
        match self.status.subscription_type {
            Some(SubscriptionType::Trial) => Some("Trial"),
            _ => Some("Yearly"),
        }
    }

    pub fn subscription_until(&self) -> Option<String> {
        self.status.subscription_end_date().map(format_date)
    }

    pub fn coins_balance(&self) -> i64 {
        self.status.coins_balance
    }

    pub fn coins_hint(&self) -> String {
        match discounted_payments(self.status.coins_balance) {
            0 => "Not enough for a discount".to_string(),
            1 => "Enough for 1 payment".to_string(),
            n => format!("Enough for {n} payments"),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn readiness_hint(&self) -> &'static str {
        if self.is_ready() {
            "You can pay utility bills"
        } else {
            "A subscription or coins are needed"
        }
    }

    /// "Pay utilities" is only clickable once nothing is missing.
    pub fn primary_action_enabled(&self) -> bool {
        self.is_ready()
    }
}

/// `2 November 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Account overview. Fetches the status exactly once per screen and
/// redirects before rendering when a subscription or coins are missing.
pub struct DashboardScreen {
    ctx: AppContext,
    view: Mutex<Option<DashboardView>>,
    mounted: AtomicBool,
    flight: InFlight<()>,
    lifetime: Lifetime,
}

impl DashboardScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            view: Mutex::new(None),
            mounted: AtomicBool::new(false),
            flight: InFlight::new(),
            lifetime: Lifetime::default(),
        }
    }

    fn view_slot(&self) -> MutexGuard<'_, Option<DashboardView>> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// `None` while loading, after a redirect, or after a failed fetch.
    pub fn view(&self) -> Option<DashboardView> {
        self.view_slot().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.flight.is_busy()
    }

    pub fn close(&self) {
        self.lifetime.close();
    }

    /// Mount the screen. Later calls do not fetch again.
    pub async fn load(&self) -> Outcome {
        let Some(_guard) = self.flight.try_begin(()) else {
            return Outcome::Busy;
        };
        if self.mounted.swap(true, Ordering::SeqCst) {
            return Outcome::Updated(None);
        }

        let session = match require_session(self.ctx.session.as_ref()) {
            Ok(session) => session,
            Err(redirect) => return redirect,
        };

        let Some(result) = self
            .lifetime
            .until_closed(self.ctx.subscriptions.status(&session.user_id))
            .await
        else {
            return Outcome::Dropped;
        };

        let status = match result {
            Ok(status) => status,
            Err(e) if e.is_transport() => {
                return Outcome::Rejected(Notice::from_error(&e, "Could not load your data"));
            }
            Err(e) => {
                error!("Status fetch failed for user {}: {}", session.user_id, e);
                return Outcome::Rejected(Notice::error("Could not load your data"));
            }
        };

        let view = DashboardView::new(status);
        if let Some(to) = view.state.redirect() {
            return Outcome::redirect(to);
        }

        info!(
            "Dashboard ready for user {} ({} coins)",
            session.user_id, view.status.coins_balance
        );
        *self.view_slot() = Some(view);
        Outcome::Updated(None)
    }

    /// The bill payment flow lives outside this client.
    pub fn pay_utilities(&self) -> Outcome {
        match self.view() {
            Some(view) if view.primary_action_enabled() => Outcome::Updated(Some(Notice::info(
                "Utility payment",
                "Bill payment is not available yet",
            ))),
            _ => Outcome::Rejected(Notice::error("A subscription and at least 200 coins are needed")),
        }
    }

    pub fn open_coin_shop(&self) -> Outcome {
        Outcome::redirect(Route::Coins)
    }

    pub fn open_subscription(&self) -> Outcome {
        Outcome::redirect(Route::Subscription)
    }

    /// Forget the stored identity and go back to Login.
    pub fn logout(&self) -> Outcome {
        self.close();
        if let Err(e) = self.ctx.session.clear() {
            return Outcome::Rejected(Notice::from_error(&e, "Could not log out"));
        }
        *self.view_slot() = None;
        info!("Logged out");
        Outcome::redirect(Route::Login)
    }
}
