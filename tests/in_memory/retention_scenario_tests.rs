//! End-to-end archive and purge scenarios over simulated days.

use super::helpers::{Troop, draft, t0, troop};
use chrono::TimeDelta;
use rstest::rstest;
use scoutboard::task::{
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
};

async fn is_stored(troop: &Troop, id: TaskId) -> bool {
    troop
        .repository
        .find_by_id(id)
        .await
        .expect("lookup should succeed")
        .is_some()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finished_task_is_archived_then_purged(troop: Troop) {
    let task = troop
        .tasks
        .create_task(&troop.leader, draft("Clean the scout hut"))
        .await
        .expect("task creation should succeed");
    let done = troop
        .tasks
        .change_status(task.id(), TaskStatus::Done)
        .await
        .expect("status change should succeed");
    assert_eq!(done.completed_at(), Some(t0()));

    let day_31 = t0() + TimeDelta::days(31);
    let first = troop.sweep.run_sweep_at(day_31).await;
    assert_eq!(first.archived, 1);
    let archived = troop
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("archived task should remain");
    assert!(archived.is_archived());
    assert_eq!(archived.archived_at(), Some(day_31));

    let day_89 = t0() + TimeDelta::days(89);
    let early = troop.sweep.run_sweep_at(day_89).await;
    assert_eq!(early.deleted, 0);
    assert!(is_stored(&troop, task.id()).await);

    let day_122 = day_31 + TimeDelta::days(91);
    let late = troop.sweep.run_sweep_at(day_122).await;
    assert_eq!(late.deleted, 1);
    assert!(!is_stored(&troop, task.id()).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_tasks_accumulate_outside_the_archive(troop: Troop) {
    let task = troop
        .tasks
        .create_task(
            &troop.leader,
            draft("Rained-out canoe trip").with_status(TaskStatus::Cancelled),
        )
        .await
        .expect("task creation should succeed");

    for day in [31, 91, 365] {
        let report = troop.sweep.run_sweep_at(t0() + TimeDelta::days(day)).await;
        assert!(report.success);
        assert_eq!(report.archived, 0);
    }

    let active = troop
        .tasks
        .list_active()
        .await
        .expect("listing should succeed");
    assert_eq!(active.len(), 1);
    assert!(is_stored(&troop, task.id()).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_listing_counts_down_to_deletion(troop: Troop) {
    troop
        .tasks
        .create_task(
            &troop.leader,
            draft("Submit tour permit").with_status(TaskStatus::Done),
        )
        .await
        .expect("task creation should succeed");
    troop.clock.advance(TimeDelta::days(31));
    troop.sweep.run_sweep().await;

    troop.clock.advance(TimeDelta::days(80));
    let at_eighty = troop
        .tasks
        .list_archived()
        .await
        .expect("listing should succeed");
    troop.clock.advance(TimeDelta::days(9));
    let at_eighty_nine = troop
        .tasks
        .list_archived()
        .await
        .expect("listing should succeed");

    let days: Vec<u32> = at_eighty
        .iter()
        .chain(at_eighty_nine.iter())
        .map(scoutboard::task::services::ArchivedTaskView::days_until_deletion)
        .collect();
    assert_eq!(days, vec![10, 1]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_task_restarts_its_archive_window(troop: Troop) {
    let task = troop
        .tasks
        .create_task(&troop.leader, draft("Repaint totem").with_status(TaskStatus::Done))
        .await
        .expect("task creation should succeed");
    troop.clock.advance(TimeDelta::days(20));
    troop
        .tasks
        .change_status(task.id(), TaskStatus::Ongoing)
        .await
        .expect("reopen should succeed");
    troop.clock.advance(TimeDelta::days(5));
    troop
        .tasks
        .change_status(task.id(), TaskStatus::Done)
        .await
        .expect("finish should succeed");

    let report = troop.sweep.run_sweep_at(t0() + TimeDelta::days(40)).await;
    assert_eq!(report.archived, 0);

    let later = troop.sweep.run_sweep_at(t0() + TimeDelta::days(56)).await;
    assert_eq!(later.archived, 1);
}
