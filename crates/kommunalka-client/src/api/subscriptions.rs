use reqwest::Client;

use kommunalka_types::api::{
    ActivateTrialRequest, CoinsBalanceResponse, CoinsPurchaseResponse, PurchaseCoinsRequest,
    PurchaseSubscriptionRequest, SubscriptionResponse,
};
use kommunalka_types::{AccountStatus, PackageId, UserId};

use super::Endpoint;
use crate::error::Result;

/// Subscription state and the coin ledger.
#[derive(Debug, Clone)]
pub struct SubscriptionsClient {
    endpoint: Endpoint,
}

impl SubscriptionsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(http, base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }

    pub async fn status(&self, user_id: &UserId) -> Result<AccountStatus> {
        self.endpoint
            .get("status", &[("user_id", user_id.as_str())])
            .await
    }

    pub async fn coins_balance(&self, user_id: &UserId) -> Result<CoinsBalanceResponse> {
        self.endpoint
            .get("coins", &[("user_id", user_id.as_str())])
            .await
    }

    pub async fn activate_trial(&self, user_id: &UserId) -> Result<SubscriptionResponse> {
        let req = ActivateTrialRequest {
            user_id: user_id.clone(),
        };
        self.endpoint.post("activate-trial", &req).await
    }

    /// `payment_successful` comes from the payment seam, never from the user.
    pub async fn purchase_subscription(
        &self,
        user_id: &UserId,
        payment_successful: bool,
    ) -> Result<SubscriptionResponse> {
        let req = PurchaseSubscriptionRequest {
            user_id: user_id.clone(),
            payment_successful,
        };
        self.endpoint.post("purchase-subscription", &req).await
    }

    pub async fn purchase_coins(
        &self,
        user_id: &UserId,
        package: PackageId,
        payment_successful: bool,
    ) -> Result<CoinsPurchaseResponse> {
        let req = PurchaseCoinsRequest {
            user_id: user_id.clone(),
            package,
            payment_successful,
        };
        self.endpoint.post("purchase-coins", &req).await
    }
}
