//! Given steps for task retention BDD scenarios.

use super::world::{RetentionWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use scoutboard::task::domain::{TaskDraft, TaskStatus, UserId};

#[given(r#"a task marked "{status}" {days:i64} days ago"#)]
fn task_marked_days_ago(
    world: &mut RetentionWorld,
    status: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let draft = TaskDraft::new("Return borrowed tents", UserId::new(), world.due_date)
        .with_status(parsed);
    let created = run_async(world.tasks.create_task(&world.leader, draft))
        .wrap_err("create task for retention scenario")?;
    world.task_id = Some(created.id());

    let elapsed = TimeDelta::try_days(days)
        .ok_or_else(|| eyre::eyre!("day offset out of range: {days}"))?;
    world.clock.advance(elapsed);
    Ok(())
}

#[given("the retention sweep has run")]
fn sweep_has_run(world: &mut RetentionWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.sweep.run_sweep());
    if !report.success {
        return Err(eyre::eyre!("setup sweep failed: {:?}", report.error));
    }
    world.last_report = Some(report);
    Ok(())
}
