//! Step timing for response traces

use std::future::Future;
use std::time::{Duration, Instant};

/// The output of an operation together with its wall-clock duration
#[derive(Debug)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in whole milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        to_ms(self.elapsed)
    }
}

/// Await `future` and measure how long it took
pub async fn timed<F: Future>(future: F) -> Timed<F::Output> {
    let start = Instant::now();
    let value = future.await;
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Whole milliseconds, truncated
pub fn to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
