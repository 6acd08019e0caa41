use kommunalka_client::catalog::{CoinPackage, PlanOffer};
use kommunalka_client::screens::DashboardView;
use kommunalka_client::screens::landing::{
    BRAND, CTA_TEXT, CTA_TITLE, FEATURES, HERO_TAGLINE, HERO_TEXT, STEPS, TARIFFS,
};
use kommunalka_client::{Notice, Route, Severity};

pub fn header(route: Route) {
    println!();
    println!("== {} {} ==", BRAND, route.path());
}

pub fn notice(notice: &Notice) {
    match notice.severity {
        Severity::Info => println!("* {}: {}", notice.title, notice.description),
        Severity::Error => println!("! {}: {}", notice.title, notice.description),
    }
}

pub fn landing() {
    println!("{BRAND}");
    println!("{HERO_TAGLINE}");
    println!("{HERO_TEXT}");

    println!();
    println!("Features");
    for f in FEATURES.iter() {
        println!("  - {}: {}", f.title, f.description);
    }

    println!();
    println!("How it works");
    for s in STEPS.iter() {
        println!("  {} {}: {}", s.number, s.title, s.description);
    }

    println!();
    println!("Tariffs");
    for t in TARIFFS.iter() {
        let mark = if t.highlight { " (popular)" } else { "" };
        println!("  {} {}{}  [{}]", t.name, t.price, mark, t.call_to_action());
        for line in t.features {
            println!("      {line}");
        }
    }

    println!();
    println!("{CTA_TITLE}");
    println!("{CTA_TEXT}");
}

pub fn plans(offers: &[PlanOffer]) {
    for (i, offer) in offers.iter().enumerate() {
        let price = if offer.price == 0 {
            "free".to_string()
        } else {
            format!("{} ₽", offer.price)
        };
        println!("  {}) {}: {}, {} days", i + 1, offer.name, price, offer.days);
        for perk in offer.perks {
            println!("       {perk}");
        }
    }
}

pub fn packages(packages: &[CoinPackage]) {
    for (i, p) in packages.iter().enumerate() {
        let mut line = format!(
            "  {}) {}: {} coins for {} ₽ ({} ₽/coin), {} payments",
            i + 1,
            p.name,
            p.coins,
            p.price,
            p.price_per_coin_label(),
            p.payments_covered()
        );
        if p.discount_percent > 0 {
            line.push_str(&format!(", save {}%", p.discount_percent));
        }
        if p.popular {
            line.push_str(" [popular]");
        }
        println!("{line}");
    }
}

pub fn dashboard(view: &DashboardView) {
    match (view.subscription_label(), view.subscription_until()) {
        (Some(label), Some(until)) => println!("Subscription: {label}, until {until}"),
        (Some(label), None) => println!("Subscription: {label}"),
        (None, _) => println!("Subscription: none"),
    }
    println!("Coins: {} ({})", view.coins_balance(), view.coins_hint());
    println!("{}", view.readiness_hint());
}
