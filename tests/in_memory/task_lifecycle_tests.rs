//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Troop, draft, t0, troop};
use chrono::TimeDelta;
use rstest::rstest;
use scoutboard::{
    access::{AccessPolicy, Principal, Role, TaskOperation},
    task::{
        domain::{TaskPriority, TaskStatus, TaskUpdate, UserId},
        services::TaskLifecycleError,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_and_drop_round_trip_keeps_timestamps_consistent(troop: Troop) {
    let task = troop
        .tasks
        .create_task(&troop.leader, draft("Scout the hiking route"))
        .await
        .expect("task creation should succeed");

    troop.clock.advance(TimeDelta::days(1));
    let done = troop
        .tasks
        .change_status(task.id(), TaskStatus::Done)
        .await
        .expect("moving to done should succeed");
    troop.clock.advance(TimeDelta::days(1));
    let reopened = troop
        .tasks
        .change_status(task.id(), TaskStatus::Ongoing)
        .await
        .expect("moving back to ongoing should succeed");
    troop.clock.advance(TimeDelta::days(1));
    let cancelled = troop
        .tasks
        .change_status(task.id(), TaskStatus::Cancelled)
        .await
        .expect("moving to cancelled should succeed");

    assert_eq!(done.completed_at(), Some(t0() + TimeDelta::days(1)));
    assert_eq!(reopened.completed_at(), None);
    assert_eq!(reopened.cancelled_at(), None);
    assert_eq!(cancelled.cancelled_at(), Some(t0() + TimeDelta::days(3)));
    assert_eq!(cancelled.completed_at(), None);
    assert_eq!(cancelled.created_at(), task.created_at());
    assert_eq!(cancelled.created_by(), troop.leader.user_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn content_edits_do_not_touch_completion(troop: Troop) {
    let task = troop
        .tasks
        .create_task(
            &troop.leader,
            draft("Print song sheets").with_status(TaskStatus::Done),
        )
        .await
        .expect("task creation should succeed");
    troop.clock.advance(TimeDelta::hours(6));
    let assignee = UserId::new();

    let edited = troop
        .tasks
        .update_task(
            task.id(),
            TaskUpdate::new()
                .with_assignee(assignee)
                .with_priority(TaskPriority::High),
        )
        .await
        .expect("edit should succeed");

    assert_eq!(edited.assigned_to(), assignee);
    assert_eq!(edited.priority(), TaskPriority::High);
    assert_eq!(edited.completed_at(), Some(t0()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone(troop: Troop) {
    let task = troop
        .tasks
        .create_task(&troop.leader, draft("Cancelled fundraiser"))
        .await
        .expect("task creation should succeed");

    troop
        .tasks
        .delete_task(task.id())
        .await
        .expect("delete should succeed");

    let result = troop.tasks.change_status(task.id(), TaskStatus::Done).await;
    assert!(matches!(result, Err(TaskLifecycleError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_layer_gate_checks_before_calling_the_service(troop: Troop) {
    let policy = AccessPolicy::default();
    let scout = Principal::new(UserId::new(), Role::Scout);
    let task = troop
        .tasks
        .create_task(&troop.leader, draft("Check the first-aid kit"))
        .await
        .expect("task creation should succeed");

    let denied = policy.authorize(&scout, TaskOperation::ChangeStatus);
    let allowed = policy.authorize(&troop.leader, TaskOperation::ChangeStatus);

    assert!(denied.is_err());
    assert!(allowed.is_ok());
    let listed = troop
        .tasks
        .list_active()
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed.first().map(scoutboard::task::domain::Task::id),
        Some(task.id())
    );
}
