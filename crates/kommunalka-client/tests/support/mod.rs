//! In-process fake of the auth and subscriptions services.
//!
//! Behaves like the real services closely enough to drive the screens end
//! to end: fixed one-time code `1234` echoed as `debug_code`, a tiny user
//! table, a 200-coin readiness threshold, one trial per user.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tokio::sync::Notify;

use kommunalka_client::api::{AuthClient, SubscriptionsClient};
use kommunalka_client::payment::{PaymentGateway, StubPayments};
use kommunalka_client::{AppContext, MemorySessionStore, Session, SessionStore};
use kommunalka_types::{UserId, UserStatus};

pub const OTP: &str = "1234";

#[derive(Debug, Clone)]
pub struct Call {
    pub action: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct FakeUser {
    id: i64,
    phone: String,
    status: String,
    full_name: Option<String>,
    email: Option<String>,
    subscription: Option<(&'static str, String)>,
    trial_used: bool,
    coins: i64,
    total_purchased: i64,
}

#[derive(Default)]
struct Ledger {
    next_id: i64,
    users: Vec<FakeUser>,
    codes: HashMap<String, String>,
}

impl Ledger {
    fn user_mut(&mut self, id: &str) -> Option<&mut FakeUser> {
        let id: i64 = id.parse().ok()?;
        self.users.iter_mut().find(|u| u.id == id)
    }
}

#[derive(Default)]
pub struct Fake {
    ledger: Mutex<Ledger>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<(StatusCode, Option<String>)>>,
    hold: AtomicBool,
    arrived: Notify,
    release: Notify,
}

impl Fake {
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap()
    }

    async fn enter(&self, action: &str, body: Value) -> Option<Response> {
        self.calls.lock().unwrap().push(Call {
            action: action.to_string(),
            body,
        });
        if self.hold.swap(false, Ordering::SeqCst) {
            self.arrived.notify_one();
            self.release.notified().await;
        }
        self.failure
            .lock()
            .unwrap()
            .take()
            .map(|(code, message)| match message {
                Some(m) => fail(code, &m),
                None => (code, "oops").into_response(),
            })
    }
}

pub struct FakeServices {
    pub fake: Arc<Fake>,
    pub base: String,
}

impl FakeServices {
    pub async fn start() -> Self {
        let fake = Arc::new(Fake::default());
        let app = Router::new()
            .route("/auth", get(auth_get).post(auth_post))
            .route("/subscriptions", get(subs_get).post(subs_post))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            fake,
            base: format!("http://{addr}"),
        }
    }

    pub fn context_with(
        &self,
        store: Arc<dyn SessionStore>,
        payments: Arc<dyn PaymentGateway>,
    ) -> AppContext {
        let http = reqwest::Client::new();
        AppContext::new(
            store,
            AuthClient::new(http.clone(), format!("{}/auth", self.base)),
            SubscriptionsClient::new(http, format!("{}/subscriptions", self.base)),
            payments,
        )
    }

    /// Context over a fresh in-memory session, returned alongside for inspection.
    pub fn context(&self) -> (AppContext, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (self.context_with(store.clone(), Arc::new(StubPayments)), store)
    }

    /// Context already signed in as `user_id`.
    pub fn signed_in(&self, user_id: &UserId, status: UserStatus) -> (AppContext, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::with_session(Session {
            user_id: user_id.clone(),
            phone: "+79991234567".into(),
            status,
        }));
        (self.context_with(store.clone(), Arc::new(StubPayments)), store)
    }

    pub fn seed_user(&self, phone: &str, status: &str, subscription: Option<&'static str>, coins: i64) -> UserId {
        let mut ledger = self.fake.ledger();
        ledger.next_id += 1;
        let id = ledger.next_id;
        let end = (Utc::now() + Duration::days(30)).naive_utc();
        ledger.users.push(FakeUser {
            id,
            phone: phone.to_string(),
            status: status.to_string(),
            full_name: None,
            email: None,
            subscription: subscription.map(|kind| (kind, end.format("%Y-%m-%dT%H:%M:%S%.6f").to_string())),
            trial_used: subscription == Some("trial"),
            coins,
            total_purchased: coins,
        });
        UserId::new(id.to_string())
    }

    pub fn calls(&self, action: &str) -> Vec<Value> {
        self.fake
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.action == action)
            .map(|c| c.body.clone())
            .collect()
    }

    pub fn user_status(&self, id: &UserId) -> String {
        self.fake.ledger().user_mut(id.as_str()).unwrap().status.clone()
    }

    /// The next request stalls until [`FakeServices::release`].
    pub fn hold_next(&self) {
        self.fake.hold.store(true, Ordering::SeqCst);
    }

    pub async fn wait_arrived(&self) {
        self.fake.arrived.notified().await;
    }

    pub fn release(&self) {
        self.fake.release.notify_one();
    }

    pub fn fail_next(&self, code: StatusCode, message: Option<&str>) {
        *self.fake.failure.lock().unwrap() = Some((code, message.map(str::to_string)));
    }
}

fn fail(code: StatusCode, message: &str) -> Response {
    (code, Json(json!({ "error": message }))).into_response()
}

fn ok(body: Value) -> Response {
    Json(body).into_response()
}

fn action(query: &HashMap<String, String>) -> String {
    query.get("action").cloned().unwrap_or_default()
}

fn text(body: &Value, key: &str) -> String {
    body.get(key).and_then(Value::as_str).unwrap_or_default().trim().to_string()
}

async fn auth_post(
    State(fake): State<Arc<Fake>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let action = action(&query);
    if let Some(resp) = fake.enter(&action, body.clone()).await {
        return resp;
    }

    let mut ledger = fake.ledger();
    match action.as_str() {
        "send-code" => {
            let phone = text(&body, "phone");
            if phone.len() < 10 {
                return fail(StatusCode::BAD_REQUEST, "Invalid phone number");
            }
            ledger.codes.insert(phone, OTP.to_string());
            ok(json!({ "success": true, "message": "SMS code sent", "debug_code": OTP }))
        }
        "verify-code" => {
            let phone = text(&body, "phone");
            let code = text(&body, "code");
            match ledger.codes.get(&phone) {
                None => return fail(StatusCode::BAD_REQUEST, "Code not found or expired"),
                Some(expected) if *expected != code => {
                    return fail(StatusCode::BAD_REQUEST, "Invalid code");
                }
                Some(_) => {}
            }
            ledger.codes.remove(&phone);

            if let Some(user) = ledger.users.iter().find(|u| u.phone == phone) {
                return ok(json!({
                    "success": true,
                    "user_id": user.id,
                    "phone": user.phone,
                    "full_name": user.full_name,
                    "email": user.email,
                    "status": user.status,
                    "is_new_user": false,
                }));
            }

            ledger.next_id += 1;
            let id = ledger.next_id;
            ledger.users.push(FakeUser {
                id,
                phone: phone.clone(),
                status: "NEW_USER".into(),
                full_name: None,
                email: None,
                subscription: None,
                trial_used: false,
                coins: 0,
                total_purchased: 0,
            });
            ok(json!({
                "success": true,
                "user_id": id,
                "phone": phone,
                "status": "NEW_USER",
                "is_new_user": true,
            }))
        }
        "complete-registration" => {
            let id = text(&body, "user_id");
            let full_name = text(&body, "full_name");
            if id.is_empty() || full_name.is_empty() {
                return fail(StatusCode::BAD_REQUEST, "user_id and full_name required");
            }
            let email = body.get("email").and_then(Value::as_str).map(str::to_string);
            let Some(user) = ledger.user_mut(&id) else {
                return fail(StatusCode::NOT_FOUND, "User not found");
            };
            user.full_name = Some(full_name);
            user.email = email;
            user.status = "ONBOARDING_COMPLETE".into();
            ok(json!({ "success": true, "message": "Registration completed" }))
        }
        _ => fail(StatusCode::BAD_REQUEST, "Invalid request"),
    }
}

async fn auth_get(
    State(fake): State<Arc<Fake>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let action = action(&query);
    if let Some(resp) = fake.enter(&action, json!(query)).await {
        return resp;
    }

    let ledger = fake.ledger();
    match action.as_str() {
        "check-user" => {
            let phone = query.get("phone").cloned().unwrap_or_default();
            if phone.is_empty() {
                return fail(StatusCode::BAD_REQUEST, "Phone required");
            }
            match ledger.users.iter().find(|u| u.phone == phone) {
                Some(user) => ok(json!({ "exists": true, "user_id": user.id, "status": user.status })),
                None => ok(json!({ "exists": false })),
            }
        }
        _ => fail(StatusCode::BAD_REQUEST, "Invalid request"),
    }
}

async fn subs_get(
    State(fake): State<Arc<Fake>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let action = action(&query);
    if let Some(resp) = fake.enter(&action, json!(query)).await {
        return resp;
    }

    let id = query.get("user_id").cloned().unwrap_or_default();
    if id.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "user_id required");
    }
    let mut ledger = fake.ledger();
    let Some(user) = ledger.user_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "User not found");
    };

    match action.as_str() {
        "status" => {
            let has_subscription = user.subscription.is_some();
            ok(json!({
                "user_status": user.status,
                "has_subscription": has_subscription,
                "subscription_type": user.subscription.as_ref().map(|s| s.0),
                "subscription_end": user.subscription.as_ref().map(|s| s.1.clone()),
                "coins_balance": user.coins,
                "needs_subscription": !has_subscription,
                "needs_coins": user.coins < 200,
                "ready_for_payment": has_subscription && user.coins >= 200,
            }))
        }
        "coins" => ok(json!({
            "balance": user.coins,
            "last_purchase_date": null,
            "total_purchased": user.total_purchased,
        })),
        _ => fail(StatusCode::BAD_REQUEST, "Invalid request"),
    }
}

async fn subs_post(
    State(fake): State<Arc<Fake>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let action = action(&query);
    if let Some(resp) = fake.enter(&action, body.clone()).await {
        return resp;
    }

    let id = text(&body, "user_id");
    let paid = body.get("payment_successful").and_then(Value::as_bool).unwrap_or(true);
    let mut ledger = fake.ledger();
    let Some(user) = ledger.user_mut(&id) else {
        return fail(StatusCode::BAD_REQUEST, "user_id required");
    };

    let now = Utc::now().naive_utc();
    match action.as_str() {
        "activate-trial" => {
            if user.trial_used {
                return fail(StatusCode::BAD_REQUEST, "Trial already used");
            }
            let end = (now + Duration::days(14)).format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
            user.trial_used = true;
            user.subscription = Some(("trial", end.clone()));
            user.status = "TRIAL_ACTIVE".into();
            ok(json!({ "success": true, "subscription_id": 1, "start_date": now.to_string(), "end_date": end }))
        }
        "purchase-subscription" => {
            if !paid {
                return fail(StatusCode::BAD_REQUEST, "Payment failed");
            }
            let end = (now + Duration::days(365)).format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
            user.subscription = Some(("yearly", end.clone()));
            user.status = "SUBSCRIPTION_ACTIVE".into();
            ok(json!({ "success": true, "subscription_id": 2, "start_date": now.to_string(), "end_date": end }))
        }
        "purchase-coins" => {
            let (coins, price) = match body.get("package").and_then(Value::as_str) {
                Some("basic") => (200, 400),
                Some("economy") => (600, 1150),
                Some("profitable") => (1200, 2200),
                _ => return fail(StatusCode::BAD_REQUEST, "Invalid package"),
            };
            if !paid {
                return fail(StatusCode::BAD_REQUEST, "Payment failed");
            }
            user.coins += coins;
            user.total_purchased += coins;
            ok(json!({
                "success": true,
                "coins_purchased": coins,
                "price_paid": price,
                "new_balance": user.coins,
            }))
        }
        _ => fail(StatusCode::BAD_REQUEST, "Invalid request"),
    }
}
