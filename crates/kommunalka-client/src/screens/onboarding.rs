use std::sync::{Mutex, MutexGuard};

use tracing::info;

use kommunalka_types::UserStatus;

use super::{Lifetime, Outcome, require_session};
use crate::context::AppContext;
use crate::inflight::InFlight;
use crate::notice::Notice;
use crate::route::Route;

#[derive(Debug, Default, Clone)]
pub struct OnboardingForm {
    pub full_name: String,
    pub email: String,
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
}

impl OnboardingForm {
    fn validate(&self) -> Result<(), Notice> {
        if self.full_name.trim().is_empty() {
            return Err(Notice::error("Enter your full name"));
        }
        if !self.accepted_terms || !self.accepted_privacy {
            return Err(Notice::error("All terms must be accepted"));
        }
        Ok(())
    }

    /// Empty means "not provided", sent as `null`.
    fn email(&self) -> Option<&str> {
        Some(self.email.trim()).filter(|e| !e.is_empty())
    }
}

/// Profile details and consents collected right after the first login.
pub struct OnboardingScreen {
    ctx: AppContext,
    form: Mutex<OnboardingForm>,
    flight: InFlight<()>,
    lifetime: Lifetime,
}

impl OnboardingScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: Mutex::new(OnboardingForm::default()),
            flight: InFlight::new(),
            lifetime: Lifetime::default(),
        }
    }

    fn form(&self) -> MutexGuard<'_, OnboardingForm> {
        self.form.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> OnboardingForm {
        self.form().clone()
    }

    pub fn set_full_name(&self, value: &str) {
        self.form().full_name = value.to_string();
    }

    pub fn set_email(&self, value: &str) {
        self.form().email = value.to_string();
    }

    pub fn set_accepted_terms(&self, accepted: bool) {
        self.form().accepted_terms = accepted;
    }

    pub fn set_accepted_privacy(&self, accepted: bool) {
        self.form().accepted_privacy = accepted;
    }

    pub fn is_loading(&self) -> bool {
        self.flight.is_busy()
    }

    pub fn close(&self) {
        self.lifetime.close();
    }

    pub async fn submit(&self) -> Outcome {
        let Some(_guard) = self.flight.try_begin(()) else {
            return Outcome::Busy;
        };

        let form = self.snapshot();
        if let Err(notice) = form.validate() {
            return Outcome::Rejected(notice);
        }

        let session = match require_session(self.ctx.session.as_ref()) {
            Ok(session) => session,
            Err(redirect) => return redirect,
        };

        let call = self.ctx.auth.complete_registration(
            &session.user_id,
            form.full_name.trim(),
            form.email(),
        );
        let Some(result) = self.lifetime.until_closed(call).await else {
            return Outcome::Dropped;
        };

        if let Err(e) = result {
            return Outcome::Rejected(Notice::from_error(&e, "Could not complete registration"));
        }
        if let Err(e) = self.ctx.session.set_status(UserStatus::OnboardingComplete) {
            return Outcome::Rejected(Notice::from_error(&e, "Could not save the session"));
        }

        info!("Registration completed for user {}", session.user_id);
        Outcome::redirect_with(
            Route::Subscription,
            Notice::info("Welcome!", "Now choose a plan"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OnboardingForm {
        OnboardingForm {
            full_name: "Ivanov Ivan Ivanovich".into(),
            email: String::new(),
            accepted_terms: true,
            accepted_privacy: true,
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = OnboardingForm {
            full_name: "   ".into(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(Notice::error("Enter your full name")));
    }

    #[test]
    fn both_consents_are_required() {
        let no_privacy = OnboardingForm {
            accepted_privacy: false,
            ..filled()
        };
        assert_eq!(no_privacy.validate(), Err(Notice::error("All terms must be accepted")));

        let no_terms = OnboardingForm {
            accepted_terms: false,
            ..filled()
        };
        assert!(no_terms.validate().is_err());
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn empty_email_means_absent() {
        assert_eq!(filled().email(), None);
        let with_email = OnboardingForm {
            email: " ivan@example.com ".into(),
            ..filled()
        };
        assert_eq!(with_email.email(), Some("ivan@example.com"));
    }
}
