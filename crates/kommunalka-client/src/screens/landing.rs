use super::Outcome;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub number: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    pub name: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
    pub highlight: bool,
}

impl Tariff {
    pub fn call_to_action(&self) -> &'static str {
        if self.highlight { "Try it" } else { "Start for free" }
    }
}

pub const BRAND: &str = "КоммуналкаAI";

pub const HERO_TAGLINE: &str = "Utility payments, next generation";
pub const HERO_TEXT: &str =
    "AI pays your utility bills for you, automatically. No receipts, no queues, no late fees.";

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Automatic payments",
        description: "The AI pays your bills on time, you don't have to do anything",
    },
    Feature {
        title: "Smart recognition",
        description: "Reads the data from every bill and receipt automatically",
    },
    Feature {
        title: "Spending control",
        description: "Track how your spending changes and get a forecast for next month",
    },
    Feature {
        title: "Bank-grade security",
        description: "Bank-level data protection: encryption and two-factor authentication",
    },
    Feature {
        title: "Flexible setup",
        description: "Choose how to pay, set limits and get notifications",
    },
    Feature {
        title: "All bills in one place",
        description: "Electricity, water, gas, internet, intercom: pay for all of it with one button",
    },
];

pub const STEPS: [Step; 4] = [
    Step {
        number: "01",
        title: "Connect your accounts",
        description: "Add your utility accounts once and never type them in again",
    },
    Step {
        number: "02",
        title: "Link a card",
        description: "Pick a card for automatic charges, safely and conveniently",
    },
    Step {
        number: "03",
        title: "Forget about receipts",
        description: "The AI fetches, checks and pays your bills on time",
    },
    Step {
        number: "04",
        title: "Keep track of spending",
        description: "Follow your payments in the app and get spending reports",
    },
];

pub const TARIFFS: [Tariff; 2] = [
    Tariff {
        name: "Basic",
        price: "199 ₽/month",
        features: &[
            "Up to 5 utility accounts",
            "Automatic payments on all accounts",
            "Billing notifications",
            "Payment history",
        ],
        highlight: false,
    },
    Tariff {
        name: "Family",
        price: "399 ₽/month",
        features: &[
            "Unlimited utility accounts",
            "Spending control and forecasts",
            "24/7 support",
            "1% cashback on every payment",
        ],
        highlight: true,
    },
];

pub const CTA_TITLE: &str = "Ready to forget about receipts?";
pub const CTA_TEXT: &str = "Connect the AI right now and get the first month free";

/// Static marketing page. Makes no requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LandingScreen;

impl LandingScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn features(&self) -> &'static [Feature] {
        &FEATURES
    }

    pub fn steps(&self) -> &'static [Step] {
        &STEPS
    }

    pub fn tariffs(&self) -> &'static [Tariff] {
        &TARIFFS
    }

    pub fn log_in(&self) -> Outcome {
        Outcome::redirect(Route::Login)
    }

    pub fn try_it(&self) -> Outcome {
        Outcome::redirect(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_actions_lead_to_login() {
        let landing = LandingScreen::new();
        assert_eq!(landing.log_in().destination(), Some(Route::Login));
        assert_eq!(landing.try_it().destination(), Some(Route::Login));
    }

    #[test]
    fn family_tariff_is_highlighted() {
        let highlighted: Vec<&str> = TARIFFS.iter().filter(|t| t.highlight).map(|t| t.name).collect();
        assert_eq!(highlighted, vec!["Family"]);
        assert_eq!(TARIFFS[1].call_to_action(), "Try it");
        assert_eq!(TARIFFS[0].call_to_action(), "Start for free");
    }
}
