//! Wire types shared by the auth and subscriptions service clients.

pub mod api;
pub mod models;

pub use models::{AccountStatus, PackageId, SubscriptionType, UserId, UserStatus};
