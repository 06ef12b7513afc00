//! Shared dispatch engine: submission handle on the producer side, runner on
//! the worker side.
//!
//! Submissions, cancellations and shutdown are synchronous and lock-protected
//! by a [`CriticalSectionRawMutex`], so any thread or interrupt context may
//! use a [`DispatchHandle`] as long as the job type is `Send`. Only one
//! [`DispatchRunner`] may be driven per engine.
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex},
    signal::Signal,
    waitqueue::MultiWakerRegistration,
};
use futures_util::{future::select, pin_mut};

use super::{queue::TaskQueue, DispatchWorker, Schedule, TaskHandle};
use crate::error::DispatchError;
use crate::protocol::transport::traits::dispatch_clock::DispatchClock;

/// Tasks that can wait in [`DispatchHandle::join`] at the same time before
/// registration starts waking earlier waiters to make room.
const JOIN_WAKERS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Engine lifecycle.
pub enum EngineState {
    /// Accepting and running work.
    Running,
    /// Shut down; the runner has not returned yet.
    Closing,
    /// The runner has returned.
    Stopped,
}

struct Shared<J, const CAP: usize> {
    queue: TaskQueue<J, CAP>,
    state: EngineState,
    /// Tasks waiting for the runner to return.
    joiners: MultiWakerRegistration<JOIN_WAKERS>,
}

/// Storage shared by the handle and the runner.
pub struct DispatchEngine<J, const CAP: usize> {
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared<J, CAP>>>,
    /// Raised on every submission and on shutdown.
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl<J, const CAP: usize> Default for DispatchEngine<J, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, const CAP: usize> DispatchEngine<J, CAP> {
    pub fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                queue: TaskQueue::new(),
                state: EngineState::Running,
                joiners: MultiWakerRegistration::new(),
            })),
            wake: Signal::new(),
        }
    }

    /// Producer-side handle. Cheap to copy.
    pub fn handle(&self) -> DispatchHandle<'_, J, CAP> {
        DispatchHandle { engine: self }
    }

    /// Worker-side runner executing jobs with `worker`, timed by `clock`.
    pub fn runner<W, K>(&self, worker: W, clock: K) -> DispatchRunner<'_, J, W, K, CAP>
    where
        W: DispatchWorker<J>,
        K: DispatchClock,
    {
        DispatchRunner {
            engine: self,
            worker,
            clock,
        }
    }

    fn with_shared<R>(&self, f: impl FnOnce(&mut Shared<J, CAP>) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn submit(&self, schedule: Schedule, job: J) -> Result<TaskHandle, DispatchError> {
        let handle = self.with_shared(|shared| {
            if shared.state != EngineState::Running {
                return Err(DispatchError::Closed);
            }
            shared.queue.schedule(schedule, job)
        })?;
        self.wake.signal(());
        Ok(handle)
    }
}

//==================================================================================HANDLE
/// Producer side of a [`DispatchEngine`].
pub struct DispatchHandle<'a, J, const CAP: usize> {
    engine: &'a DispatchEngine<J, CAP>,
}

impl<J, const CAP: usize> Clone for DispatchHandle<'_, J, CAP> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<J, const CAP: usize> Copy for DispatchHandle<'_, J, CAP> {}

impl<'a, J, const CAP: usize> DispatchHandle<'a, J, CAP> {
    /// Queue `job` to run as soon as the worker is free. Never blocks.
    pub fn run_once(&self, job: J) -> Result<(), DispatchError> {
        self.engine.submit(Schedule::Once, job).map(|_| ())
    }

    /// Queue `job` to run every `period_ms`, first run one period from now.
    pub fn run_every(&self, period_ms: u64, job: J) -> Result<TaskHandle, DispatchError> {
        self.engine.submit(Schedule::Every { period_ms }, job)
    }

    /// Remove a scheduled task. Stale handles are ignored and return `false`.
    /// A job already handed to the worker still completes.
    pub fn cancel(&self, handle: TaskHandle) -> bool {
        self.engine.with_shared(|shared| shared.queue.cancel(handle))
    }

    /// Refuse new work, discard pending tasks and wake the runner so it returns.
    pub fn shutdown(&self) {
        let closed = self.engine.with_shared(|shared| {
            shared.queue.clear();
            if shared.state == EngineState::Running {
                shared.state = EngineState::Closing;
                true
            } else {
                false
            }
        });
        if closed {
            #[cfg(feature = "defmt")]
            defmt::debug!("Dispatch engine closing");
            self.engine.wake.signal(());
        }
    }

    /// Wait until the runner has returned.
    ///
    /// Only resolves after [`shutdown`](Self::shutdown) and only if the runner is being driven.
    pub async fn join(&self) {
        poll_fn(|cx| {
            self.engine.with_shared(|shared| {
                if shared.state == EngineState::Stopped {
                    Poll::Ready(())
                } else {
                    shared.joiners.register(cx.waker());
                    Poll::Pending
                }
            })
        })
        .await
    }

    pub fn state(&self) -> EngineState {
        self.engine.with_shared(|shared| shared.state)
    }

    /// Number of scheduled tasks (pending one-shots plus live periodic tasks).
    pub fn scheduled(&self) -> usize {
        self.engine.with_shared(|shared| shared.queue.len())
    }
}

//==================================================================================RUNNER
enum Step<J> {
    Run(J),
    Wait(Option<u64>),
    Exit,
}

/// Worker side of a [`DispatchEngine`]; drive [`run`](Self::run) on the executor.
pub struct DispatchRunner<'a, J, W, K, const CAP: usize> {
    engine: &'a DispatchEngine<J, CAP>,
    worker: W,
    clock: K,
}

impl<'a, J, W, K, const CAP: usize> DispatchRunner<'a, J, W, K, CAP>
where
    J: Clone,
    W: DispatchWorker<J>,
    K: DispatchClock,
{
    /// Execute jobs until the engine is shut down.
    ///
    /// Returns once shutdown is observed; a job in progress at that moment
    /// finishes first, no other job starts afterwards.
    pub async fn run(mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Dispatch runner started");

        loop {
            let now = self.clock.now_ms();
            let step = self.engine.with_shared(|shared| {
                if shared.state != EngineState::Running {
                    return Step::Exit;
                }
                match shared.queue.pop_ready(now) {
                    Some(job) => Step::Run(job),
                    None => Step::Wait(shared.queue.next_deadline()),
                }
            });

            match step {
                Step::Run(job) => self.worker.execute(job).await,
                Step::Wait(None) => self.engine.wake.wait().await,
                Step::Wait(Some(deadline)) => {
                    let wake = self.engine.wake.wait();
                    let delay = self.clock.delay_ms(deadline.saturating_sub(now));
                    pin_mut!(wake);
                    pin_mut!(delay);
                    select(wake, delay).await;
                }
                Step::Exit => break,
            }
        }

        self.engine.with_shared(|shared| {
            shared.state = EngineState::Stopped;
            shared.joiners.wake();
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("Dispatch runner stopped");
    }
}
