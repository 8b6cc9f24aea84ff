//! Background post polling.
//!
//! Runs on a dedicated thread, fetching the post source once at start, once
//! per refresh interval and once per manual trigger, and sending each result
//! to the UI thread over an [`mpsc`] channel.
//!
//! All refreshes run on this one thread, so at most one request is in flight.
//! Manual triggers that arrive during a fetch are queued and collapse into a
//! single follow-up refresh.  The interval schedule is fixed at start: ticks
//! fire at `start + n * interval` no matter how many manual refreshes happen
//! in between.
//!
//! ## For contributors
//!
//! The thread is controlled through the [`Poller`] handle.  It exits when the
//! handle is stopped or dropped, or when the result receiver is dropped.  An
//! in-flight request is never cancelled; stopping waits for it to finish.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::source::{fetch_posts, PostRecord, PostSource};

/// Messages sent from the poller thread to the UI thread.
#[derive(Debug)]
pub enum PollMsg {
    /// A refresh cycle completed.  Failed fetches arrive as an empty list.
    Posts {
        posts: Vec<PostRecord>,
        fetched_at: DateTime<Local>,
    },
}

/// Why the poller should run another refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Startup,
    Interval,
    Manual,
}

enum Control {
    Refresh,
    Stop,
}

/// Handle to the background polling thread.
pub struct Poller {
    control: mpsc::Sender<Control>,
    thread: Option<JoinHandle<()>>,
}

impl Poller {
    /// Request an immediate refresh.
    pub fn refresh(&self) {
        debug!("manual refresh requested");
        // A send error means the thread already exited; nothing to refresh.
        let _ = self.control.send(Control::Refresh);
    }

    /// Stop the timer and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    fn shutdown(&self) {
        let _ = self.control.send(Control::Stop);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.shutdown();
        }
    }
}

/// Spawn the background polling thread.
///
/// Returns the control handle and a receiver that the main loop should
/// drain on every tick.
pub fn spawn(source: Box<dyn PostSource>, interval: Duration) -> (Poller, mpsc::Receiver<PollMsg>) {
    let interval = interval.max(Duration::from_millis(1));
    let (tx, rx) = mpsc::channel();
    let (control_tx, control_rx) = mpsc::channel();

    let thread = thread::spawn(move || {
        // `None` when the first tick lies beyond what `Instant` can represent.
        let mut next_tick = Instant::now().checked_add(interval);
        let mut trigger = Trigger::Startup;

        loop {
            let posts = fetch_posts(source.as_ref());
            info!(count = posts.len(), ?trigger, "posts refreshed");

            let msg = PollMsg::Posts {
                posts,
                fetched_at: Local::now(),
            };
            // If the receiver is gone the UI has exited; stop polling.
            if tx.send(msg).is_err() {
                return;
            }

            trigger = match wait_for_trigger(&control_rx, &mut next_tick, interval) {
                Some(trigger) => trigger,
                None => {
                    debug!("poller stopped");
                    return;
                }
            };
        }
    });

    let poller = Poller {
        control: control_tx,
        thread: Some(thread),
    };
    (poller, rx)
}

/// Block until the next refresh is due.  `None` means stop.
fn wait_for_trigger(
    control: &mpsc::Receiver<Control>,
    next_tick: &mut Option<Instant>,
    interval: Duration,
) -> Option<Trigger> {
    // Drain triggers queued while the last fetch was running.
    let mut manual = false;
    loop {
        match control.try_recv() {
            Ok(Control::Refresh) => manual = true,
            Ok(Control::Stop) | Err(mpsc::TryRecvError::Disconnected) => return None,
            Err(mpsc::TryRecvError::Empty) => break,
        }
    }
    if manual {
        return Some(Trigger::Manual);
    }

    let received = match *next_tick {
        Some(tick) => control.recv_timeout(tick.saturating_duration_since(Instant::now())),
        // No representable tick: only manual triggers or a stop remain.
        None => control.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };

    match received {
        Ok(Control::Refresh) => Some(Trigger::Manual),
        Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => None,
        Err(RecvTimeoutError::Timeout) => {
            // Skip ticks missed during a slow fetch instead of bursting.
            let now = Instant::now();
            while let Some(tick) = *next_tick {
                if tick > now {
                    break;
                }
                *next_tick = tick.checked_add(interval);
            }
            Some(Trigger::Interval)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
