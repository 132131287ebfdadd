use crate::{carousel, countdown};
use chrono::{DateTime, Utc};
use minisite_document::{Block, BlockContent, BlockId, Site};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Periodic behavior attached to a rendered block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Widget {
    /// Re-render the remaining time every second
    Countdown {
        block_id: BlockId,
        target: DateTime<Utc>,
        tick_ms: u64,
    },
    /// Scroll one step every `interval_ms`
    Carousel {
        block_id: BlockId,
        interval_ms: u64,
        step_px: f64,
        slide_count: usize,
    },
}

impl Widget {
    /// The widget a block needs, if any
    pub fn for_block(block: &Block, now: DateTime<Utc>) -> Option<Widget> {
        match &block.content {
            BlockContent::Countdown(content) => Some(Widget::Countdown {
                block_id: block.id.clone(),
                target: content.target.unwrap_or(now),
                tick_ms: countdown::TICK_MS,
            }),
            BlockContent::Carousel(content) => {
                carousel::autoplay_interval(content).map(|interval| Widget::Carousel {
                    block_id: block.id.clone(),
                    interval_ms: interval.as_millis() as u64,
                    step_px: carousel::STEP_PX,
                    slide_count: content.slides.len(),
                })
            }
            _ => None,
        }
    }

    pub fn for_site(site: &Site, now: DateTime<Utc>) -> Vec<Widget> {
        site.blocks
            .iter()
            .filter_map(|block| Widget::for_block(block, now))
            .collect()
    }

    pub fn block_id(&self) -> &BlockId {
        match self {
            Widget::Countdown { block_id, .. } | Widget::Carousel { block_id, .. } => block_id,
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Widget::Countdown { tick_ms, .. } => Duration::from_millis(*tick_ms),
            Widget::Carousel { interval_ms, .. } => Duration::from_millis(*interval_ms),
        }
    }
}
