use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use kommunalka_types::UserStatus;

use super::{Lifetime, Outcome};
use crate::context::AppContext;
use crate::inflight::InFlight;
use crate::notice::Notice;
use crate::phone::{
    clamp_phone_input, is_complete_code, is_plausible_phone_input, normalize_phone, sanitize_code,
};
use crate::route::Route;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    PhoneEntry,
    CodeEntry,
}

#[derive(Debug)]
struct LoginState {
    step: LoginStep,
    phone: String,
    code: String,
    debug_code: Option<String>,
}

/// Two-step phone → one-time code login.
pub struct LoginScreen {
    ctx: AppContext,
    state: Mutex<LoginState>,
    flight: InFlight<()>,
    lifetime: Lifetime,
}

impl LoginScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(LoginState {
                step: LoginStep::PhoneEntry,
                phone: String::new(),
                code: String::new(),
                debug_code: None,
            }),
            flight: InFlight::new(),
            lifetime: Lifetime::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, LoginState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn step(&self) -> LoginStep {
        self.state().step
    }

    /// Raw input as typed.
    pub fn phone(&self) -> String {
        self.state().phone.clone()
    }

    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.state().phone)
    }

    pub fn code(&self) -> String {
        self.state().code.clone()
    }

    /// Code echoed by non-production auth deployments, shown as-is.
    pub fn debug_code(&self) -> Option<String> {
        self.state().debug_code.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.flight.is_busy()
    }

    /// Stores at most 18 characters, like the input field.
    pub fn set_phone(&self, raw: &str) {
        self.state().phone = clamp_phone_input(raw);
    }

    pub fn set_code(&self, raw: &str) {
        self.state().code = sanitize_code(raw);
    }

    /// Return to phone entry, forgetting the code. Ignored while a request is pending.
    pub fn back(&self) -> bool {
        if self.flight.is_busy() {
            return false;
        }
        let mut state = self.state();
        state.step = LoginStep::PhoneEntry;
        state.code.clear();
        state.debug_code = None;
        true
    }

    pub fn close(&self) {
        self.lifetime.close();
    }

    pub async fn send_code(&self) -> Outcome {
        let Some(_guard) = self.flight.try_begin(()) else {
            return Outcome::Busy;
        };

        let raw = self.phone();
        if !is_plausible_phone_input(&raw) {
            return Outcome::Rejected(Notice::error("Enter a valid phone number"));
        }
        let phone = normalize_phone(&raw);

        let Some(result) = self
            .lifetime
            .until_closed(self.ctx.auth.send_code(&phone))
            .await
        else {
            return Outcome::Dropped;
        };

        match result {
            Ok(resp) => {
                info!("Code sent to {}", phone);
                let mut state = self.state();
                state.step = LoginStep::CodeEntry;
                if let Some(code) = resp.debug_code.filter(|c| !c.is_empty()) {
                    state.debug_code = Some(code);
                }
                Outcome::Updated(Some(Notice::info("Code sent", "Check your SMS")))
            }
            Err(e) => Outcome::Rejected(Notice::from_error(&e, "Could not send the code")),
        }
    }

    pub async fn verify_code(&self) -> Outcome {
        let Some(_guard) = self.flight.try_begin(()) else {
            return Outcome::Busy;
        };

        let (step, raw_phone, code) = {
            let state = self.state();
            (state.step, state.phone.clone(), state.code.clone())
        };
        if step != LoginStep::CodeEntry {
            return Outcome::Rejected(Notice::error("Request a code first"));
        }
        if !is_complete_code(&code) {
            return Outcome::Rejected(Notice::error("Enter the 4-digit code"));
        }
        let phone = normalize_phone(&raw_phone);

        let Some(result) = self
            .lifetime
            .until_closed(self.ctx.auth.verify_code(&phone, &code))
            .await
        else {
            return Outcome::Dropped;
        };

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => return Outcome::Rejected(Notice::from_error(&e, "Invalid code")),
        };

        let session = Session {
            user_id: resp.user_id,
            phone: resp.phone,
            status: resp.status,
        };
        if let Err(e) = self.ctx.session.set(&session) {
            return Outcome::Rejected(Notice::from_error(&e, "Could not save the session"));
        }
        info!("Signed in as user {}", session.user_id);

        let status_says_new = session.status == UserStatus::NewUser;
        if resp.is_new_user != status_says_new {
            warn!(
                "verify-code returned is_new_user={} with status {}; sending user to onboarding",
                resp.is_new_user, session.status
            );
        }

        if resp.is_new_user || status_says_new {
            Outcome::redirect(Route::Onboarding)
        } else {
            Outcome::redirect(Route::Dashboard)
        }
    }
}
