use std::time::Duration;

use canopy_core::prelude::*;
use canopy_pager::{Coordinator, CoordinatorConfig, Direction};

fn report(c: &Coordinator, what: &str) {
    let active = c
        .pager()
        .active()
        .and_then(|id| c.pager().index_of(id))
        .map_or_else(|| "-".to_string(), |i| i.to_string());
    let offset = c.active_page().map_or(0.0, |p| p.offset().y);
    println!(
        "{what:<24} page {active}  offset {offset:>8.1}  header {:>6.1}  max_y {:>6.1}  label {}",
        c.header().extent(),
        c.header().max_y(),
        c.header().debug_label(),
    );
}

fn settle(c: &Coordinator) {
    while c.tick() {
        std::thread::sleep(Duration::from_millis(16));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional JSON config path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => CoordinatorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => CoordinatorConfig::default(),
    };
    log::info!("Starting paged header demo with {} pages", config.pages.len());

    let c = Coordinator::new(config)?;
    c.layout(Size::new(390.0, 844.0));
    c.set_safe_area(EdgeInsets::top(47.0));
    report(&c, "initial");

    for _ in 0..4 {
        c.pan(Vec2::new(0.0, 30.0));
        report(&c, "scroll up 30");
    }
    c.pan(Vec2::new(0.0, 200.0));
    report(&c, "scroll up 200");

    if c.navigate(Direction::After) {
        settle(&c);
    }
    report(&c, "after navigate");

    c.pan(Vec2::new(0.0, -400.0));
    report(&c, "pull down");

    c.pan(Vec2::new(250.0, 0.0));
    c.end_pan();
    settle(&c);
    report(&c, "after drag");

    if let Some(page) = c.active_page()
        && page.refresh()
    {
        report(&c, "refreshing");
        settle(&c);
        report(&c, "refresh done");
    }

    log::info!("gesture owner: {:?}", c.gestures().owner());
    Ok(())
}
