use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque user identifier issued by the auth service.
///
/// The service hands it out as a JSON number, but the client stores and
/// sends it as text, so both representations are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => UserId(n.to_string()),
            Raw::Text(s) => UserId(s),
        })
    }
}

/// Account lifecycle status as reported by the services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    NewUser,
    OnboardingComplete,
    TrialActive,
    SubscriptionActive,
    /// A status this client does not know about, kept verbatim.
    Other(String),
}

impl UserStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::NewUser => "NEW_USER",
            UserStatus::OnboardingComplete => "ONBOARDING_COMPLETE",
            UserStatus::TrialActive => "TRIAL_ACTIVE",
            UserStatus::SubscriptionActive => "SUBSCRIPTION_ACTIVE",
            UserStatus::Other(s) => s,
        }
    }
}

impl From<String> for UserStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NEW_USER" => UserStatus::NewUser,
            "ONBOARDING_COMPLETE" => UserStatus::OnboardingComplete,
            "TRIAL_ACTIVE" => UserStatus::TrialActive,
            "SUBSCRIPTION_ACTIVE" => UserStatus::SubscriptionActive,
            _ => UserStatus::Other(s),
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionType {
    Trial,
    Yearly,
    Other(String),
}

impl From<String> for SubscriptionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "trial" => SubscriptionType::Trial,
            "yearly" => SubscriptionType::Yearly,
            _ => SubscriptionType::Other(s),
        }
    }
}

impl From<SubscriptionType> for String {
    fn from(kind: SubscriptionType) -> Self {
        match kind {
            SubscriptionType::Trial => "trial".into(),
            SubscriptionType::Yearly => "yearly".into(),
            SubscriptionType::Other(s) => s,
        }
    }
}

/// Coin bundle identifiers understood by the `purchase-coins` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageId {
    Basic,
    Economy,
    Profitable,
}

impl PackageId {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageId::Basic => "basic",
            PackageId::Economy => "economy",
            PackageId::Profitable => "profitable",
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate account status returned by the subscriptions `status` action.
///
/// The three `needs_*`/`ready_*` flags are computed by the service. They are
/// kept here as received; callers should branch on the collapsed account
/// state rather than on the raw booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub user_status: UserStatus,
    pub has_subscription: bool,
    pub subscription_type: Option<SubscriptionType>,
    pub subscription_end: Option<String>,
    pub coins_balance: i64,
    pub needs_subscription: bool,
    pub needs_coins: bool,
    pub ready_for_payment: bool,
}

impl AccountStatus {
    /// Calendar date the current subscription ends on, if it can be parsed.
    pub fn subscription_end_date(&self) -> Option<NaiveDate> {
        self.subscription_end.as_deref().and_then(parse_service_date)
    }
}

/// Services emit ISO-8601 timestamps with or without an offset.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
