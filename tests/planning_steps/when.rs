//! When steps for planning BDD scenarios.

use super::world::{PlanningWorld, run_async};
use eyre::WrapErr;
use focusboard::insight::{MetricsReport, ViewFilter, generate_alerts, smart_suggestions};
use rstest_bdd_macros::when;

#[when("alerts are generated")]
fn alerts_generated(world: &mut PlanningWorld) {
    world.alerts = generate_alerts(&world.tasks(), &ViewFilter::all(), &world.moment());
}

#[when("metrics are computed")]
fn metrics_computed(world: &mut PlanningWorld) {
    world.metrics = Some(MetricsReport::compute(
        &world.tasks(),
        &ViewFilter::all(),
        &world.moment(),
    ));
}

#[when("suggestions are generated")]
fn suggestions_generated(world: &mut PlanningWorld) {
    world.suggestions = smart_suggestions(&world.tasks(), &ViewFilter::all(), &world.moment());
}

#[when("the entry at position {from:usize} is dragged to position {to:usize}")]
fn drag_priority(world: &mut PlanningWorld, from: usize, to: usize) -> Result<(), eyre::Report> {
    world.moved = world.priority_ids.get(from).cloned();
    let order =
        run_async(world.store.reorder_priority(from, to)).wrap_err("reorder priority list")?;
    world.priority_ids = order;
    Ok(())
}
