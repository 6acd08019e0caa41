//! One controller per route.
//!
//! Actions take `&self` so a front-end can share a screen (`Arc`) between the
//! task awaiting a submission and the one handling further input. Every
//! action either completes, reports [`Outcome::Busy`] because another action
//! is still pending, or reports [`Outcome::Dropped`] because the screen was
//! closed before the response arrived.

pub mod coins;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod onboarding;
pub mod subscription;

pub use coins::CoinsShopScreen;
pub use dashboard::{DashboardScreen, DashboardView};
pub use landing::LandingScreen;
pub use login::{LoginScreen, LoginStep};
pub use onboarding::OnboardingScreen;
pub use subscription::SubscriptionScreen;

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::account::AccountState;
use crate::notice::Notice;
use crate::route::Route;
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Leave this screen.
    Redirect { to: Route, notice: Option<Notice> },
    /// Stay; the screen's state changed.
    Updated(Option<Notice>),
    /// Stay; nothing changed. Validation failures and remote errors land here.
    Rejected(Notice),
    /// Another action on this screen has not finished yet.
    Busy,
    /// The screen was closed while the request was in flight.
    Dropped,
}

impl Outcome {
    pub fn redirect(to: Route) -> Self {
        info!("Navigating to {}", to);
        Outcome::Redirect { to, notice: None }
    }

    pub fn redirect_with(to: Route, notice: Notice) -> Self {
        info!("Navigating to {}", to);
        Outcome::Redirect {
            to,
            notice: Some(notice),
        }
    }

    pub fn destination(&self) -> Option<Route> {
        match self {
            Outcome::Redirect { to, .. } => Some(*to),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Redirect { notice, .. } | Outcome::Updated(notice) => notice.as_ref(),
            Outcome::Rejected(notice) => Some(notice),
            Outcome::Busy | Outcome::Dropped => None,
        }
    }
}

/// Ties requests to the screen that issued them. Closing (or dropping) the
/// screen cancels the token and any pending response is discarded.
#[derive(Debug, Default)]
pub(crate) struct Lifetime {
    token: CancellationToken,
}

impl Lifetime {
    pub(crate) fn close(&self) {
        self.token.cancel();
    }

    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `None` if the screen closed first.
    pub(crate) async fn until_closed<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Identity gate for every screen but Landing and Login.
pub(crate) fn require_session(store: &dyn SessionStore) -> Result<Session, Outcome> {
    let session = store.get().unwrap_or_else(|e| {
        // An unreadable session is as good as none.
        error!("Session unreadable: {}", e);
        None
    });
    let state = AccountState::resolve(session.as_ref(), None);
    match (session, state.and_then(AccountState::redirect)) {
        (Some(session), None) => Ok(session),
        (_, to) => Err(Outcome::redirect(to.unwrap_or(Route::Login))),
    }
}

/// Redirect to Login when nobody is signed in. Front-ends call this when a
/// protected screen is shown.
pub fn gate(store: &dyn SessionStore) -> Option<Outcome> {
    require_session(store).err()
}
