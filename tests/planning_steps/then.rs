//! Then steps for planning BDD scenarios.

use super::world::PlanningWorld;
use focusboard::assistant::domain::TaskBrief;
use focusboard::insight::SuggestionKind;
use rstest_bdd_macros::then;

#[then(r#"exactly {count:usize} "{kind}" alert is raised"#)]
fn alert_count(world: &PlanningWorld, count: usize, kind: String) -> Result<(), eyre::Report> {
    let matching = world
        .alerts
        .iter()
        .filter(|alert| alert.kind.as_str() == kind)
        .count();
    if matching != count || world.alerts.len() != count {
        return Err(eyre::eyre!(
            "expected {count} {kind} alert(s), got {:?}",
            world.alerts
        ));
    }
    Ok(())
}

#[then("the alert references the preparation task")]
fn alert_references_preparation(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let prep = world
        .preparation
        .clone()
        .ok_or_else(|| eyre::eyre!("missing preparation task"))?;
    let alert = world
        .alerts
        .first()
        .ok_or_else(|| eyre::eyre!("no alert raised"))?;
    if alert.related != vec![prep] || Some(&alert.task_id) != world.meeting.as_ref() {
        return Err(eyre::eyre!("unexpected alert {alert:?}"));
    }
    Ok(())
}

#[then("the preparation task is briefed as meeting preparation")]
fn preparation_is_briefed(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let prep = world
        .preparation
        .clone()
        .ok_or_else(|| eyre::eyre!("missing preparation task"))?;
    let briefs = TaskBrief::collect(&world.tasks(), &world.moment());
    let brief = briefs
        .iter()
        .find(|brief| brief.id == prep)
        .ok_or_else(|| eyre::eyre!("preparation task not briefed"))?;
    if !brief.is_meeting_prep {
        return Err(eyre::eyre!("preparation task not flagged as meeting prep"));
    }
    Ok(())
}

#[then(
    "daily completion reports {completed:usize} completed and {remaining:usize} remaining at {percent:u8} percent"
)]
fn daily_completion(
    world: &PlanningWorld,
    completed: usize,
    remaining: usize,
    percent: u8,
) -> Result<(), eyre::Report> {
    let report = world
        .metrics
        .as_ref()
        .ok_or_else(|| eyre::eyre!("metrics not computed"))?;
    let daily = &report.daily_completion;
    if daily.completed != completed
        || daily.remaining != remaining
        || daily.percentage() != percent
    {
        return Err(eyre::eyre!("unexpected daily completion {daily:?}"));
    }
    Ok(())
}

#[then("a quick-wins suggestion cites {count:usize} tasks")]
fn quick_wins_cited(world: &PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    let suggestion = world
        .suggestions
        .iter()
        .find(|suggestion| suggestion.kind == SuggestionKind::QuickWins)
        .ok_or_else(|| eyre::eyre!("no quick-wins suggestion in {:?}", world.suggestions))?;
    if !suggestion.message.starts_with(&format!("{count} quick wins")) {
        return Err(eyre::eyre!("unexpected message {}", suggestion.message));
    }
    Ok(())
}

#[then("no quick-wins suggestion is made")]
fn no_quick_wins(world: &PlanningWorld) -> Result<(), eyre::Report> {
    if world
        .suggestions
        .iter()
        .any(|suggestion| suggestion.kind == SuggestionKind::QuickWins)
    {
        return Err(eyre::eyre!("unexpected quick-wins suggestion"));
    }
    Ok(())
}

#[then("the priority positions are contiguous from 0 to {last:u32}")]
fn positions_contiguous(world: &PlanningWorld, last: u32) -> Result<(), eyre::Report> {
    let mut positions: Vec<u32> = world
        .tasks()
        .iter()
        .filter_map(|task| task.priority_order())
        .collect();
    positions.sort_unstable();
    if positions != (0..=last).collect::<Vec<_>>() {
        return Err(eyre::eyre!("positions are {positions:?}"));
    }
    Ok(())
}

#[then("the moved task leads and the others keep their order")]
fn moved_task_leads(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let moved = world.moved.clone().ok_or_else(|| eyre::eyre!("nothing was moved"))?;
    let listed: Vec<_> = world
        .tasks()
        .into_iter()
        .filter(|task| task.is_priority())
        .collect();
    let mut ordered = listed.clone();
    ordered.sort_by_key(|task| task.priority_order());
    let order: Vec<_> = ordered.iter().map(|task| task.id().clone()).collect();
    if order.first() != Some(&moved) || order != world.priority_ids {
        return Err(eyre::eyre!("unexpected priority order {order:?}"));
    }
    let rest: Vec<_> = order.iter().skip(1).collect();
    let creation: Vec<_> = listed
        .iter()
        .map(|task| task.id().clone())
        .filter(|id| *id != moved)
        .collect();
    if rest != creation.iter().collect::<Vec<_>>() {
        return Err(eyre::eyre!("untouched entries changed order"));
    }
    Ok(())
}
