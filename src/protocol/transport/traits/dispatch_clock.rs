//! Monotonic clock abstraction driving the dispatch runner: the runner reads
//! the current time to arm periodic tasks and sleeps until the next deadline.

/// Millisecond clock owned by the dispatch runner.
pub trait DispatchClock {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u64)
        -> impl core::future::Future<Output = ()> + 'a;
}

/// [`DispatchClock`] backed by `embassy-time`; requires a time driver in the firmware.
#[cfg(feature = "embassy-time")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl DispatchClock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    fn delay_ms<'a>(
        &'a mut self,
        millis: u64,
    ) -> impl core::future::Future<Output = ()> + 'a {
        embassy_time::Timer::after_millis(millis)
    }
}
