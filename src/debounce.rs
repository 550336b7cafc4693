//! Input debouncing.
//!
//! Values pushed into a [`Debouncer`] are held on a background task and only
//! released once no different value has arrived for the quiet period. Dropping
//! the debouncer aborts the task, releasing any pending timer.

use log::debug;
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

pub struct Debouncer<T> {
    input: DebounceInput<T>,
    settled: mpsc::UnboundedReceiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Debug + Send + 'static,
{
    /// Spawn the timer task on the current tokio runtime
    pub fn new(quiet: Duration) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(quiet, input_rx, settled_tx));

        Self {
            input: DebounceInput { tx: input },
            settled,
            task,
        }
    }

    /// Record a new input value, restarting the quiet period if it differs
    /// from the one pending
    pub fn push(&self, value: T) {
        self.input.push(value);
    }

    /// Handle for pushing from elsewhere while this debouncer is being awaited
    pub fn input(&self) -> DebounceInput<T> {
        self.input.clone()
    }

    /// Wait for the next settled value. Returns `None` once the task has stopped.
    pub async fn next_settled(&mut self) -> Option<T> {
        self.settled.recv().await
    }

    /// Settled value already waiting, if any
    pub fn try_settled(&mut self) -> Option<T> {
        self.settled.try_recv().ok()
    }
}

/// Cloneable sending side of a [`Debouncer`]
#[derive(Debug)]
pub struct DebounceInput<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for DebounceInput<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> DebounceInput<T> {
    pub fn push(&self, value: T) {
        // Only fails once the timer task is gone, and then nobody is waiting for a value
        let _ = self.tx.send(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(
    quiet: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    settled: mpsc::UnboundedSender<T>,
) where
    T: Clone + PartialEq + Debug + Send + 'static,
{
    let mut last_settled: Option<T> = None;
    let mut pending: Option<(T, Instant)> = None;

    loop {
        match pending.take() {
            None => match input.recv().await {
                Some(value) => pending = Some((value, Instant::now() + quiet)),
                None => break,
            },
            Some((value, deadline)) => {
                tokio::select! {
                    next = input.recv() => match next {
                        // Same value again: keep the running timer
                        Some(next) if next == value => pending = Some((value, deadline)),
                        Some(next) => pending = Some((next, Instant::now() + quiet)),
                        None => break,
                    },
                    _ = sleep_until(deadline) => {
                        if last_settled.as_ref() == Some(&value) {
                            continue;
                        }
                        debug!("Input settled: {:?}", value);
                        last_settled = Some(value.clone());
                        if settled.send(value).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}
