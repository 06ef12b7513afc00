//! Logical-time tests for the scheduling core.
use super::*;

const PERIOD: u64 = 1000;

#[test]
/// One-shot jobs come out in submission order, all due immediately.
fn test_once_fifo() {
    let mut queue: TaskQueue<u8, 4> = TaskQueue::new();
    queue.schedule(Schedule::Once, 1).unwrap();
    queue.schedule(Schedule::Once, 2).unwrap();
    queue.schedule(Schedule::Once, 3).unwrap();

    assert_eq!(queue.pop_ready(0), Some(1));
    assert_eq!(queue.pop_ready(0), Some(2));
    assert_eq!(queue.pop_ready(0), Some(3));
    assert_eq!(queue.pop_ready(0), None);
    assert!(queue.is_empty());
}

#[test]
/// A periodic job first runs one full period after arming.
fn test_every_not_immediate() {
    let mut queue: TaskQueue<u8, 4> = TaskQueue::new();
    queue.schedule(Schedule::Every { period_ms: PERIOD }, 7).unwrap();

    assert_eq!(queue.pop_ready(0), None);
    assert_eq!(queue.next_deadline(), Some(PERIOD));
    assert_eq!(queue.pop_ready(PERIOD - 1), None);
    assert_eq!(queue.pop_ready(PERIOD), Some(7));
    assert_eq!(queue.next_deadline(), Some(2 * PERIOD));
}

#[test]
/// Exactly k runs after k periods, none after cancellation.
fn test_k_ticks_then_cancel() {
    let mut queue: TaskQueue<u8, 4> = TaskQueue::new();
    let handle = queue.schedule(Schedule::Every { period_ms: PERIOD }, 2).unwrap();
    queue.arm(0);

    let k = 5;
    let mut runs = 0;
    for tick in 1..=k {
        while queue.pop_ready(tick * PERIOD).is_some() {
            runs += 1;
        }
    }
    assert_eq!(runs, k);

    assert!(queue.cancel(handle));
    for tick in k + 1..=2 * k {
        assert_eq!(queue.pop_ready(tick * PERIOD), None);
    }
}

#[test]
/// Cancelling before any time passes leaves nothing to run.
fn test_cancel_before_first_tick() {
    let mut queue: TaskQueue<u8, 4> = TaskQueue::new();
    let handle = queue.schedule(Schedule::Every { period_ms: PERIOD }, 2).unwrap();
    assert!(queue.cancel(handle));
    assert_eq!(queue.pop_ready(0), None);
    assert_eq!(queue.pop_ready(10 * PERIOD), None);
}

#[test]
/// Stale handles are ignored, even when their slot has been reused.
fn test_stale_cancel_is_noop() {
    let mut queue: TaskQueue<u8, 1> = TaskQueue::new();
    let first = queue.schedule(Schedule::Every { period_ms: PERIOD }, 1).unwrap();
    assert!(queue.cancel(first));
    assert!(!queue.cancel(first));

    let second = queue.schedule(Schedule::Every { period_ms: PERIOD }, 2).unwrap();
    assert!(!queue.cancel(first));
    assert_eq!(queue.len(), 1);
    assert!(queue.cancel(second));
}

#[test]
/// Completed one-shot jobs invalidate their handle.
fn test_completed_once_handle_is_stale() {
    let mut queue: TaskQueue<u8, 2> = TaskQueue::new();
    let handle = queue.schedule(Schedule::Once, 9).unwrap();
    assert_eq!(queue.pop_ready(0), Some(9));
    assert!(!queue.cancel(handle));
}

#[test]
/// A periodic tick and one-shot jobs due at the same instant keep submission order.
fn test_submission_order_wins_ties() {
    let mut queue: TaskQueue<&'static str, 4> = TaskQueue::new();
    queue.schedule(Schedule::Every { period_ms: PERIOD }, "ping").unwrap();
    queue.arm(0);

    queue.schedule(Schedule::Once, "detection").unwrap();
    queue.schedule(Schedule::Once, "disarmed").unwrap();
    queue.arm(PERIOD);

    assert_eq!(queue.pop_ready(PERIOD), Some("ping"));
    assert_eq!(queue.pop_ready(PERIOD), Some("detection"));
    assert_eq!(queue.pop_ready(PERIOD), Some("disarmed"));
    assert_eq!(queue.pop_ready(PERIOD), None);
}

#[test]
/// A one-shot job submitted earlier than a due tick runs first.
fn test_older_once_before_tick() {
    let mut queue: TaskQueue<&'static str, 4> = TaskQueue::new();
    queue.schedule(Schedule::Once, "detection").unwrap();
    queue.schedule(Schedule::Every { period_ms: PERIOD }, "ping").unwrap();
    queue.arm(0);

    assert_eq!(queue.pop_ready(PERIOD), Some("detection"));
    assert_eq!(queue.pop_ready(PERIOD), Some("ping"));
}

#[test]
/// Ticks missed while the worker was busy collapse into one run.
fn test_missed_ticks_coalesce() {
    let mut queue: TaskQueue<u8, 2> = TaskQueue::new();
    queue.schedule(Schedule::Every { period_ms: PERIOD }, 1).unwrap();
    queue.arm(0);

    assert_eq!(queue.pop_ready(3500), Some(1));
    assert_eq!(queue.pop_ready(3500), None);
    assert_eq!(queue.next_deadline(), Some(4000));
}

#[test]
/// Capacity and period validation.
fn test_schedule_errors() {
    let mut queue: TaskQueue<u8, 1> = TaskQueue::new();
    assert_eq!(
        queue.schedule(Schedule::Every { period_ms: 0 }, 1),
        Err(DispatchError::ZeroPeriod)
    );
    queue.schedule(Schedule::Once, 1).unwrap();
    assert_eq!(
        queue.schedule(Schedule::Once, 2),
        Err(DispatchError::QueueFull)
    );
}

#[test]
/// Clearing drops everything and invalidates handles.
fn test_clear() {
    let mut queue: TaskQueue<u8, 4> = TaskQueue::new();
    let periodic = queue.schedule(Schedule::Every { period_ms: PERIOD }, 1).unwrap();
    queue.schedule(Schedule::Once, 2).unwrap();

    queue.clear();
    assert!(queue.is_empty());
    assert!(!queue.cancel(periodic));
    assert_eq!(queue.pop_ready(10 * PERIOD), None);
    assert_eq!(queue.next_deadline(), None);
}
