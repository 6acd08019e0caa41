use tracing::info;

use kommunalka_types::UserStatus;

use super::{Lifetime, Outcome, require_session};
use crate::catalog::{PLAN_OFFERS, Plan, PlanOffer, plan_offer};
use crate::context::AppContext;
use crate::inflight::InFlight;
use crate::notice::Notice;
use crate::payment::Purchase;
use crate::route::Route;

/// Trial activation or yearly purchase. Both buttons are disabled while
/// either request is pending; [`SubscriptionScreen::loading`] says which one
/// to label as busy.
pub struct SubscriptionScreen {
    ctx: AppContext,
    flight: InFlight<Plan>,
    lifetime: Lifetime,
}

impl SubscriptionScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            flight: InFlight::new(),
            lifetime: Lifetime::default(),
        }
    }

    pub fn offers(&self) -> &'static [PlanOffer] {
        &PLAN_OFFERS
    }

    pub fn loading(&self) -> Option<Plan> {
        self.flight.current()
    }

    pub fn close(&self) {
        self.lifetime.close();
    }

    pub async fn activate_trial(&self) -> Outcome {
        self.subscribe(Plan::Trial).await
    }

    pub async fn purchase_yearly(&self) -> Outcome {
        self.subscribe(Plan::Yearly).await
    }

    async fn subscribe(&self, plan: Plan) -> Outcome {
        let Some(_guard) = self.flight.try_begin(plan) else {
            return Outcome::Busy;
        };

        let session = match require_session(self.ctx.session.as_ref()) {
            Ok(session) => session,
            Err(redirect) => return redirect,
        };

        let offer = plan_offer(plan);
        let result = match plan {
            Plan::Trial => {
                self.lifetime
                    .until_closed(self.ctx.subscriptions.activate_trial(&session.user_id))
                    .await
            }
            Plan::Yearly => {
                let paid = self
                    .ctx
                    .payments
                    .confirm(&Purchase::YearlySubscription { price: offer.price });
                self.lifetime
                    .until_closed(
                        self.ctx
                            .subscriptions
                            .purchase_subscription(&session.user_id, paid.successful),
                    )
                    .await
            }
        };
        let Some(result) = result else {
            return Outcome::Dropped;
        };

        let (status, fallback, notice) = match plan {
            Plan::Trial => (
                UserStatus::TrialActive,
                "Could not activate the trial",
                Notice::info(
                    "Trial activated!",
                    format!("You have {} days of free use", offer.days),
                ),
            ),
            Plan::Yearly => (
                UserStatus::SubscriptionActive,
                "Could not purchase the subscription",
                Notice::info("Subscription activated!", "A year of full access"),
            ),
        };

        match result {
            Ok(resp) => {
                if let Err(e) = self.ctx.session.set_status(status) {
                    return Outcome::Rejected(Notice::from_error(&e, "Could not save the session"));
                }
                info!(
                    "{:?} subscription started for user {} (until {})",
                    plan,
                    session.user_id,
                    resp.end_date.as_deref().unwrap_or("unknown")
                );
                Outcome::redirect_with(Route::Coins, notice)
            }
            Err(e) => Outcome::Rejected(Notice::from_error(&e, fallback)),
        }
    }
}
