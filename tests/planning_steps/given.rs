//! Given steps for planning BDD scenarios.

use super::world::{PlanningWorld, personal, run_async};
use eyre::WrapErr;
use focusboard::task::domain::TaskType;
use rstest_bdd_macros::given;

#[given(r#"a meeting "{title}" {hours:i64} hours from now at "{time}""#)]
fn meeting_soon(
    world: &mut PlanningWorld,
    title: String,
    hours: i64,
    time: String,
) -> Result<(), eyre::Report> {
    let meeting = world.create(
        personal(title)
            .with_type(TaskType::Meeting)
            .with_due_date(world.hours_from_now(hours))
            .with_meeting_time(time),
    )?;
    world.meeting = Some(meeting.id().clone());
    Ok(())
}

#[given(r#"the meeting has an open preparation task "{title}""#)]
fn preparation_task(world: &mut PlanningWorld, title: String) -> Result<(), eyre::Report> {
    let meeting = world
        .meeting
        .clone()
        .ok_or_else(|| eyre::eyre!("missing meeting in scenario world"))?;
    let prep = run_async(world.store.create_child(&meeting, personal(title)))
        .wrap_err("create preparation task")?
        .applied()
        .ok_or_else(|| eyre::eyre!("preparation task needs a project"))?;
    world.preparation = Some(prep.id().clone());
    Ok(())
}

#[given("{count:usize} open tasks without a due date")]
fn undated_tasks(world: &mut PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    world.create_many(count, |n| personal(format!("Someday {n}")))?;
    Ok(())
}

#[given("{count:usize} open tasks due today")]
fn open_tasks_due_today(world: &mut PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    let due = world.hours_from_now(3);
    world.create_many(count, |n| personal(format!("Today {n}")).with_due_date(due))?;
    Ok(())
}

#[given("{count:usize} completed tasks due today")]
fn completed_tasks_due_today(world: &mut PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    let due = world.hours_from_now(-2);
    let created = world.create_many(count, |n| personal(format!("Done {n}")).with_due_date(due))?;
    for task in created {
        run_async(world.store.toggle_completion(task.id())).wrap_err("complete task")?;
    }
    Ok(())
}

#[given("{count:usize} open quick wins")]
fn open_quick_wins(world: &mut PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    world.create_many(count, |n| {
        personal(format!("Quick win {n}")).with_type(TaskType::QuickWin)
    })?;
    Ok(())
}

#[given("{count:usize} tasks on the priority list")]
fn priority_list(world: &mut PlanningWorld, count: usize) -> Result<(), eyre::Report> {
    let created = world.create_many(count, |n| personal(format!("Priority {n}")))?;
    for task in &created {
        run_async(world.store.toggle_priority(task.id())).wrap_err("list task")?;
    }
    world.priority_ids = created.iter().map(|task| task.id().clone()).collect();
    Ok(())
}
