//! Then steps for task retention BDD scenarios.

use super::world::{RetentionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use scoutboard::task::domain::Task;

fn current_task(world: &RetentionWorld) -> Result<Option<Task>, eyre::Report> {
    let id = world.task_id()?;
    run_async(world.tasks.find_by_id(id)).wrap_err("look up scenario task")
}

#[then("the task is archived")]
fn task_is_archived(world: &RetentionWorld) -> Result<(), eyre::Report> {
    let task = current_task(world)?.ok_or_else(|| eyre::eyre!("task was deleted"))?;
    if !task.is_archived() || task.archived_at().is_none() {
        return Err(eyre::eyre!("expected archived task, found {task:?}"));
    }
    Ok(())
}

#[then("the task is not archived")]
fn task_is_not_archived(world: &RetentionWorld) -> Result<(), eyre::Report> {
    let task = current_task(world)?.ok_or_else(|| eyre::eyre!("task was deleted"))?;
    if task.is_archived() {
        return Err(eyre::eyre!("expected live task, found {task:?}"));
    }
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &RetentionWorld) -> Result<(), eyre::Report> {
    if let Some(task) = current_task(world)? {
        return Err(eyre::eyre!("expected task to be purged, found {task:?}"));
    }
    Ok(())
}

#[then("the sweep reports {archived:usize} archived and {deleted:usize} deleted")]
fn sweep_reports_counts(
    world: &RetentionWorld,
    archived: usize,
    deleted: usize,
) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sweep report"))?;
    if !report.success || report.archived != archived || report.deleted != deleted {
        return Err(eyre::eyre!(
            "expected {archived} archived and {deleted} deleted, got {report:?}"
        ));
    }
    Ok(())
}
