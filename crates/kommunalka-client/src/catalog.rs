//! Fixed offers shown by the subscription and coin screens.

use kommunalka_types::PackageId;

use crate::account::discounted_payments;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinPackage {
    pub id: PackageId,
    pub name: &'static str,
    pub coins: u32,
    /// Rubles.
    pub price: u32,
    pub discount_percent: u32,
    pub popular: bool,
}

impl CoinPackage {
    pub fn price_per_coin(&self) -> f64 {
        f64::from(self.price) / f64::from(self.coins)
    }

    /// Discounted bill payments the package pays for.
    pub fn payments_covered(&self) -> i64 {
        discounted_payments(i64::from(self.coins))
    }

    /// Two decimals, the way the shop prints it.
    pub fn price_per_coin_label(&self) -> String {
        format!("{:.2}", self.price_per_coin())
    }
}

pub const COIN_PACKAGES: [CoinPackage; 3] = [
    CoinPackage {
        id: PackageId::Basic,
        name: "Basic",
        coins: 200,
        price: 400,
        discount_percent: 0,
        popular: false,
    },
    CoinPackage {
        id: PackageId::Economy,
        name: "Economy",
        coins: 600,
        price: 1150,
        discount_percent: 4,
        popular: true,
    },
    CoinPackage {
        id: PackageId::Profitable,
        name: "Profitable",
        coins: 1200,
        price: 2200,
        discount_percent: 8,
        popular: false,
    },
];

pub fn coin_package(id: PackageId) -> &'static CoinPackage {
    match id {
        PackageId::Basic => &COIN_PACKAGES[0],
        PackageId::Economy => &COIN_PACKAGES[1],
        PackageId::Profitable => &COIN_PACKAGES[2],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plan {
    Trial,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOffer {
    pub plan: Plan,
    pub name: &'static str,
    /// Rubles; zero for the trial.
    pub price: u32,
    pub days: u32,
    pub perks: &'static [&'static str],
}

pub const PLAN_OFFERS: [PlanOffer; 2] = [
    PlanOffer {
        plan: Plan::Trial,
        name: "Free trial",
        price: 0,
        days: 14,
        perks: &["Full access for 14 days", "No card required"],
    },
    PlanOffer {
        plan: Plan::Yearly,
        name: "Yearly",
        price: 3000,
        days: 365,
        perks: &["Full access for a year", "Automatic bill payments", "Priority support"],
    },
];

pub fn plan_offer(plan: Plan) -> &'static PlanOffer {
    match plan {
        Plan::Trial => &PLAN_OFFERS[0],
        Plan::Yearly => &PLAN_OFFERS[1],
    }
}
