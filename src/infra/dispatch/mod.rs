//! Single-worker dispatch engine.
//!
//! Producers enqueue jobs ("run once now", "run every N ms") through a
//! [`DispatchHandle`](engine::DispatchHandle); one [`DispatchRunner`](engine::DispatchRunner)
//! executes them sequentially, so two jobs never overlap but always run
//! outside the submitting context.
//!
//! The engine state lives in a caller-provided [`DispatchEngine`](engine::DispatchEngine)
//! (typically a `static` initialised through `StaticCell`). Storage is a
//! fixed number of task slots chosen with a const generic; no allocation is
//! performed.
use futures_util::Future;

pub mod engine;
pub mod queue;

//==================================================================================TASK_HANDLE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Opaque reference to a scheduled task, used for cancellation.
///
/// A handle stays valid until its task completes or is cancelled; afterwards
/// it never matches another task, even one reusing the same slot.
pub struct TaskHandle {
    slot: u16,
    generation: u16,
}

//==================================================================================SCHEDULE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// When a job runs.
pub enum Schedule {
    /// As soon as the worker is free.
    Once,
    /// Repeatedly, one full period after arming and every period afterwards.
    Every { period_ms: u64 },
}

//==================================================================================WORKER
/// Executes the jobs popped by the runner.
pub trait DispatchWorker<J> {
    /// Run one job to completion.
    fn execute<'a>(&'a mut self, job: J) -> impl Future<Output = ()> + 'a;
}
