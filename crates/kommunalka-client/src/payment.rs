//! Payment confirmation seam.
//!
//! Paid actions ask a [`PaymentGateway`] whether the charge went through and
//! forward that answer to the subscriptions service as `payment_successful`.
//! No real provider is wired in; [`StubPayments`] asserts success.

use tracing::warn;

use kommunalka_types::PackageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    YearlySubscription { price: u32 },
    Coins { package: PackageId, coins: u32, price: u32 },
}

impl Purchase {
    pub fn price(&self) -> u32 {
        match self {
            Purchase::YearlySubscription { price } | Purchase::Coins { price, .. } => *price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub successful: bool,
}

// TODO: make `confirm` async once a provider with a redirect/callback flow is integrated.
pub trait PaymentGateway: Send + Sync {
    fn confirm(&self, purchase: &Purchase) -> PaymentConfirmation;
}

/// Placeholder gateway: reports every purchase as paid without charging anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubPayments;

impl PaymentGateway for StubPayments {
    fn confirm(&self, purchase: &Purchase) -> PaymentConfirmation {
        warn!(
            "Payment stub: reporting {:?} ({} ₽) as paid without a provider",
            purchase,
            purchase.price()
        );
        PaymentConfirmation { successful: true }
    }
}
