//! One driver per route. Each returns the next route, or `None` to quit.

use tracing::{debug, warn};

use kommunalka_client::catalog::{COIN_PACKAGES, PLAN_OFFERS, Plan};
use kommunalka_client::screens::{
    CoinsShopScreen, DashboardScreen, LandingScreen, LoginScreen, LoginStep, OnboardingScreen,
    SubscriptionScreen, gate,
};
use kommunalka_client::{AppContext, Notice, Outcome, Route, Session};

use crate::prompt::Prompt;
use crate::render;

type Next = anyhow::Result<Option<Route>>;

pub async fn show(route: Route, ctx: &AppContext, prompt: &mut Prompt) -> Next {
    render::header(route);

    if route.requires_session() {
        if let Some(redirect) = gate(ctx.session.as_ref()) {
            return Ok(settle(redirect));
        }
    }

    match route {
        Route::Landing => landing(prompt).await,
        Route::Login => login(ctx, prompt).await,
        Route::Onboarding => onboarding(ctx, prompt).await,
        Route::Subscription => subscription(ctx, prompt).await,
        Route::Coins => coins(ctx, prompt).await,
        Route::Dashboard => dashboard(ctx, prompt).await,
    }
}

/// Print the notice, if any, and pick out a redirect.
fn settle(outcome: Outcome) -> Option<Route> {
    if let Some(notice) = outcome.notice() {
        render::notice(notice);
    }
    match outcome {
        Outcome::Busy => println!("Please wait, the previous request is still running"),
        Outcome::Dropped => debug!("Discarded a response for a closed screen"),
        _ => {}
    }
    outcome.destination()
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("q")
}

async fn landing(prompt: &mut Prompt) -> Next {
    let screen = LandingScreen::new();
    render::landing();

    loop {
        let Some(input) = prompt.ask("[l] log in, [t] try it, [q] quit").await? else {
            return Ok(None);
        };
        let outcome = match input.as_str() {
            "l" => screen.log_in(),
            "t" => screen.try_it(),
            s if is_quit(s) => return Ok(None),
            _ => continue,
        };
        if let Some(next) = settle(outcome) {
            return Ok(Some(next));
        }
    }
}

async fn login(ctx: &AppContext, prompt: &mut Prompt) -> Next {
    let screen = LoginScreen::new(ctx.clone());

    loop {
        match screen.step() {
            LoginStep::PhoneEntry => {
                let Some(phone) = prompt.ask("Phone number (q to quit)").await? else {
                    return Ok(None);
                };
                if is_quit(&phone) {
                    return Ok(None);
                }
                screen.set_phone(&phone);
                if let Some(next) = settle(screen.send_code().await) {
                    return Ok(Some(next));
                }
            }
            LoginStep::CodeEntry => {
                println!("Code sent to {}", screen.normalized_phone());
                if let Some(code) = screen.debug_code() {
                    println!("Test code: {code}");
                }
                let Some(code) = prompt.ask("4-digit code (b to go back)").await? else {
                    return Ok(None);
                };
                if code.eq_ignore_ascii_case("b") {
                    screen.back();
                    continue;
                }
                screen.set_code(&code);
                if let Some(next) = settle(screen.verify_code().await) {
                    return Ok(Some(next));
                }
            }
        }
    }
}

async fn onboarding(ctx: &AppContext, prompt: &mut Prompt) -> Next {
    let screen = OnboardingScreen::new(ctx.clone());
    println!("Tell us about yourself");

    loop {
        let Some(name) = prompt.ask("Full name").await? else {
            return Ok(None);
        };
        screen.set_full_name(&name);

        let Some(email) = prompt.ask("Email (optional)").await? else {
            return Ok(None);
        };
        screen.set_email(&email);

        let Some(terms) = prompt.confirm("I accept the terms of service").await? else {
            return Ok(None);
        };
        screen.set_accepted_terms(terms);

        let Some(privacy) = prompt.confirm("I accept the privacy policy").await? else {
            return Ok(None);
        };
        screen.set_accepted_privacy(privacy);

        if let Some(next) = settle(screen.submit().await) {
            return Ok(Some(next));
        }
    }
}

async fn subscription(ctx: &AppContext, prompt: &mut Prompt) -> Next {
    let screen = SubscriptionScreen::new(ctx.clone());
    println!("Choose a plan");
    render::plans(&PLAN_OFFERS);

    loop {
        let Some(input) = prompt.ask("Plan number (q to quit)").await? else {
            return Ok(None);
        };
        let plan = match input.as_str() {
            "1" => Plan::Trial,
            "2" => Plan::Yearly,
            s if is_quit(s) => return Ok(None),
            _ => continue,
        };
        let outcome = match plan {
            Plan::Trial => screen.activate_trial().await,
            Plan::Yearly => screen.purchase_yearly().await,
        };
        if let Some(next) = settle(outcome) {
            return Ok(Some(next));
        }
    }
}

async fn coins(ctx: &AppContext, prompt: &mut Prompt) -> Next {
    let screen = CoinsShopScreen::new(ctx.clone());
    println!("200 coins give a 10% discount on one bill");
    render::packages(&COIN_PACKAGES);

    loop {
        let Some(input) = prompt.ask("Package number, [d] dashboard, [q] quit").await? else {
            return Ok(None);
        };
        if is_quit(&input) {
            return Ok(None);
        }
        if input == "d" {
            return Ok(Some(Route::Dashboard));
        }
        let Some(package) = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| COIN_PACKAGES.get(i))
        else {
            continue;
        };
        if let Some(next) = settle(screen.purchase(package.id).await) {
            return Ok(Some(next));
        }
    }
}

async fn dashboard(ctx: &AppContext, prompt: &mut Prompt) -> Next {
    let screen = DashboardScreen::new(ctx.clone());
    if let Some(next) = settle(screen.load().await) {
        return Ok(Some(next));
    }

    let Some(view) = screen.view() else {
        // Fetch failed; a fresh screen is the only way to fetch again.
        let Some(retry) = prompt.confirm("Try again").await? else {
            return Ok(None);
        };
        return Ok(retry.then_some(Route::Dashboard));
    };
    render::dashboard(&view);

    loop {
        let Some(input) = prompt
            .ask("[p] pay bills, [c] buy coins, [s] subscription, [b] balance, [l] log out, [q] quit")
            .await?
        else {
            return Ok(None);
        };
        let outcome = match input.as_str() {
            "p" => screen.pay_utilities(),
            "c" => screen.open_coin_shop(),
            "s" => screen.open_subscription(),
            "l" => screen.logout(),
            "b" => {
                balance(ctx, view.coins_balance()).await;
                continue;
            }
            s if is_quit(s) => return Ok(None),
            _ => continue,
        };
        if let Some(next) = settle(outcome) {
            return Ok(Some(next));
        }
    }
}

/// The signed-in session, or the notice explaining why there is none.
fn signed_in(read: kommunalka_client::Result<Option<Session>>) -> Result<Session, Notice> {
    match read {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(Notice::error("You are not signed in")),
        Err(e) => Err(Notice::from_error(&e, "Could not read the session")),
    }
}

async fn balance(ctx: &AppContext, shown: i64) {
    let session = match signed_in(ctx.session.get()) {
        Ok(session) => session,
        Err(notice) => {
            render::notice(&notice);
            return;
        }
    };
    match ctx.subscriptions.coins_balance(&session.user_id).await {
        Ok(b) => {
            println!("Balance: {} coins, {} bought in total", b.balance, b.total_purchased);
            if let Some(last) = b.last_purchase_date {
                println!("Last purchase: {last}");
            }
            if b.balance != shown {
                debug!("Balance changed from {} to {} since the dashboard loaded", shown, b.balance);
            }
        }
        Err(e) => {
            warn!("Balance lookup failed: {}", e);
            render::notice(&Notice::from_error(&e, "Could not load the balance"));
        }
    }
}
