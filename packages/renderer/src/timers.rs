//! # Block Timers
//!
//! One tokio interval task per block that needs live behavior (countdowns,
//! autoplaying carousels). Tasks report through a channel; the host applies
//! the events to whatever it is displaying.
//!
//! ```text
//! Site ──sync()──► TimerRegistry ──spawn/abort──► interval tasks
//!                                                     │
//!                        Receiver<TimerEvent> ◄───────┘
//! ```
//!
//! `sync` must be called after every document change: timers whose block was
//! deleted (or no longer needs one) are aborted, changed ones restarted.
//! Dropping the registry aborts everything. Must be used inside a tokio runtime.

use crate::countdown::{self, Remaining};
use crate::widgets::Widget;
use chrono::{DateTime, Utc};
use minisite_document::{BlockId, Site};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimerEvent {
    /// Fresh remaining time for a countdown
    CountdownTick { block_id: BlockId, remaining: Remaining },
    /// Scroll a carousel one step (see [`crate::carousel::ScrollState::advance`])
    CarouselAdvance { block_id: BlockId },
}

impl TimerEvent {
    pub fn block_id(&self) -> &BlockId {
        match self {
            TimerEvent::CountdownTick { block_id, .. } | TimerEvent::CarouselAdvance { block_id } => {
                block_id
            }
        }
    }
}

struct RunningTimer {
    widget: Widget,
    task: JoinHandle<()>,
}

pub struct TimerRegistry {
    timers: HashMap<BlockId, RunningTimer>,
    events: mpsc::Sender<TimerEvent>,
}

impl TimerRegistry {
    pub fn new() -> (Self, mpsc::Receiver<TimerEvent>) {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Ticks are dropped, not queued, while the channel is full
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (events, receiver) = mpsc::channel(capacity);
        (
            Self {
                timers: HashMap::new(),
                events,
            },
            receiver,
        )
    }

    /// Reconcile running timers with the site's blocks. Returns how many run.
    pub fn sync(&mut self, site: &Site, now: DateTime<Utc>) -> usize {
        let wanted: HashMap<BlockId, Widget> = Widget::for_site(site, now)
            .into_iter()
            .map(|widget| (widget.block_id().clone(), widget))
            .collect();

        let stale: Vec<BlockId> = self
            .timers
            .iter()
            .filter(|(id, running)| wanted.get(*id) != Some(&running.widget))
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            self.cancel(&id);
        }

        for (id, widget) in wanted {
            if self.timers.contains_key(&id) {
                continue;
            }
            debug!(block_id = %id, interval_ms = widget.interval().as_millis() as u64, "starting block timer");
            let task = spawn_timer(widget.clone(), self.events.clone());
            self.timers.insert(id, RunningTimer { widget, task });
        }

        self.timers.len()
    }

    pub fn cancel(&mut self, block_id: &BlockId) -> bool {
        match self.timers.remove(block_id) {
            Some(running) => {
                running.task.abort();
                debug!(block_id = %block_id, "cancelled block timer");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, running) in self.timers.drain() {
            running.task.abort();
        }
    }

    pub fn is_running(&self, block_id: &BlockId) -> bool {
        self.timers.contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn spawn_timer(widget: Widget, events: mpsc::Sender<TimerEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(widget.interval());
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let event = match &widget {
                Widget::Countdown {
                    block_id, target, ..
                } => TimerEvent::CountdownTick {
                    block_id: block_id.clone(),
                    remaining: countdown::remaining(Some(*target), Utc::now()),
                },
                Widget::Carousel { block_id, .. } => TimerEvent::CarouselAdvance {
                    block_id: block_id.clone(),
                },
            };

            match events.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    trace!(block_id = %event.block_id(), "event channel full, tick dropped");
                }
                Err(TrySendError::Closed(_)) => break,
            }
        }
    })
}
