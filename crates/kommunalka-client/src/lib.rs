//! Client side of the КоммуналкаAI bill-payment app.
//!
//! Each screen is a controller that owns its interactive state, talks to the
//! auth or subscriptions service, and hands back an [`Outcome`] telling the
//! front-end where to go next and what to show.

pub mod account;
pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod inflight;
pub mod notice;
pub mod payment;
pub mod phone;
pub mod route;
pub mod screens;
pub mod session;

pub use account::AccountState;
pub use config::ClientConfig;
pub use context::AppContext;
pub use error::{ClientError, Result};
pub use notice::{Notice, Severity};
pub use route::Route;
pub use screens::Outcome;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
