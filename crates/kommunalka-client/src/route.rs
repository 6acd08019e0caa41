use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Onboarding,
    Subscription,
    Coins,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Landing,
        Route::Login,
        Route::Onboarding,
        Route::Subscription,
        Route::Coins,
        Route::Dashboard,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Onboarding => "/onboarding",
            Route::Subscription => "/subscription",
            Route::Coins => "/coins",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Screens that send anonymous visitors to Login.
    pub fn requires_session(self) -> bool {
        !matches!(self, Route::Landing | Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
