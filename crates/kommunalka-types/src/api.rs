use serde::{Deserialize, Serialize};

use crate::models::{PackageId, UserId, UserStatus};

// -- Errors --

/// Body returned by both services on any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendCodeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Only present on non-production deployments.
    #[serde(default)]
    pub debug_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub user_id: UserId,
    pub phone: String,
    pub status: UserStatus,
    #[serde(default)]
    pub is_new_user: bool,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `email` is always serialized; an absent address goes out as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRegistrationRequest {
    pub user_id: UserId,
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRegistrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckUserResponse {
    pub exists: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

// -- Subscriptions --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateTrialRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseSubscriptionRequest {
    pub user_id: UserId,
    pub payment_successful: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCoinsRequest {
    pub user_id: UserId,
    pub package: PackageId,
    pub payment_successful: bool,
}

/// Returned by both `activate-trial` and `purchase-subscription`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinsPurchaseResponse {
    #[serde(default)]
    pub success: bool,
    pub coins_purchased: i64,
    pub price_paid: i64,
    pub new_balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinsBalanceResponse {
    pub balance: i64,
    #[serde(default)]
    pub last_purchase_date: Option<String>,
    #[serde(default)]
    pub total_purchased: i64,
}
