use tracing::info;

use kommunalka_types::PackageId;

use super::{Lifetime, Outcome, require_session};
use crate::catalog::{COIN_PACKAGES, CoinPackage, coin_package};
use crate::context::AppContext;
use crate::inflight::InFlight;
use crate::notice::Notice;
use crate::payment::Purchase;
use crate::route::Route;

/// The three-tier coin shop.
pub struct CoinsShopScreen {
    ctx: AppContext,
    flight: InFlight<PackageId>,
    lifetime: Lifetime,
}

impl CoinsShopScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            flight: InFlight::new(),
            lifetime: Lifetime::default(),
        }
    }

    pub fn packages(&self) -> &'static [CoinPackage] {
        &COIN_PACKAGES
    }

    /// Package whose purchase is pending, if any.
    pub fn loading(&self) -> Option<PackageId> {
        self.flight.current()
    }

    pub fn close(&self) {
        self.lifetime.close();
    }

    pub async fn purchase(&self, package: PackageId) -> Outcome {
        let Some(_guard) = self.flight.try_begin(package) else {
            return Outcome::Busy;
        };

        let session = match require_session(self.ctx.session.as_ref()) {
            Ok(session) => session,
            Err(redirect) => return redirect,
        };

        let pkg = coin_package(package);
        let paid = self.ctx.payments.confirm(&Purchase::Coins {
            package,
            coins: pkg.coins,
            price: pkg.price,
        });

        let call = self
            .ctx
            .subscriptions
            .purchase_coins(&session.user_id, package, paid.successful);
        let Some(result) = self.lifetime.until_closed(call).await else {
            return Outcome::Dropped;
        };

        match result {
            Ok(resp) => {
                info!(
                    "User {} bought {} coins, balance now {}",
                    session.user_id, resp.coins_purchased, resp.new_balance
                );
                Outcome::redirect_with(
                    Route::Dashboard,
                    Notice::info("Coins purchased!", format!("{} coins credited", pkg.coins)),
                )
            }
            Err(e) => Outcome::Rejected(Notice::from_error(&e, "Could not buy coins")),
        }
    }
}
