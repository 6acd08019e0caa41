use std::sync::Arc;

use tracing::info;

use crate::api::{AuthClient, SubscriptionsClient};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::payment::{PaymentGateway, StubPayments};
use crate::session::{FileSessionStore, SessionStore};

/// Everything a screen depends on, injected rather than reached for.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<dyn SessionStore>,
    pub auth: AuthClient,
    pub subscriptions: SubscriptionsClient,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppContext {
    pub fn new(
        session: Arc<dyn SessionStore>,
        auth: AuthClient,
        subscriptions: SubscriptionsClient,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            session,
            auth,
            subscriptions,
            payments,
        }
    }

    /// File-backed session and the stub payment gateway.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = config.http_client()?;
        let session = FileSessionStore::new(&config.session_path);
        info!(
            "Auth service {}, subscriptions service {}, session file {}",
            config.auth_url,
            config.subscriptions_url,
            session.path().display()
        );

        Ok(Self::new(
            Arc::new(session),
            AuthClient::new(http.clone(), config.auth_url.clone()),
            SubscriptionsClient::new(http, config.subscriptions_url.clone()),
            Arc::new(StubPayments),
        ))
    }
}
