//! Carousel auto-advance.
//!
//! Each tick scrolls one step to the right; once the viewport is within
//! [`END_THRESHOLD_PX`] of the end the next tick wraps back to the start.

use minisite_document::CarouselContent;
use std::time::Duration;

/// Roughly one slide plus gap
pub const STEP_PX: f64 = 180.0;
pub const END_THRESHOLD_PX: f64 = 10.0;
pub const DEFAULT_SPEED_MS: u64 = 3000;

/// Scroll geometry of a carousel viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

impl ScrollState {
    pub fn new(scroll_left: f64, scroll_width: f64, client_width: f64) -> Self {
        Self {
            scroll_left,
            scroll_width,
            client_width,
        }
    }

    pub fn at_end(&self) -> bool {
        self.scroll_left + self.client_width >= self.scroll_width - END_THRESHOLD_PX
    }

    /// Scroll offset after one auto-advance tick
    pub fn advance(&self) -> f64 {
        if self.at_end() {
            0.0
        } else {
            self.scroll_left + STEP_PX
        }
    }
}

/// Tick interval, or `None` when the carousel should stay still
pub fn autoplay_interval(content: &CarouselContent) -> Option<Duration> {
    if !content.autoplay || content.slides.len() < 2 {
        return None;
    }
    let ms = content.autoplay_speed_ms.filter(|ms| *ms > 0).unwrap_or(DEFAULT_SPEED_MS);
    Some(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::CarouselSlide;

    fn content(slides: usize, autoplay: bool, speed: Option<u64>) -> CarouselContent {
        CarouselContent {
            slides: vec![CarouselSlide::default(); slides],
            autoplay,
            autoplay_speed_ms: speed,
        }
    }

    #[test]
    fn test_advances_by_one_step() {
        let state = ScrollState::new(0.0, 1000.0, 320.0);
        assert_eq!(state.advance(), 180.0);
    }

    #[test]
    fn test_wraps_near_the_end() {
        // 675 + 320 = 995 >= 990
        assert_eq!(ScrollState::new(675.0, 1000.0, 320.0).advance(), 0.0);
        // 660 + 320 = 980 < 990
        assert_eq!(ScrollState::new(660.0, 1000.0, 320.0).advance(), 840.0);
    }

    #[test]
    fn test_autoplay_needs_two_slides() {
        assert_eq!(autoplay_interval(&content(1, true, None)), None);
        assert_eq!(autoplay_interval(&content(3, false, None)), None);
        assert_eq!(
            autoplay_interval(&content(2, true, None)),
            Some(Duration::from_millis(3000))
        );
        assert_eq!(
            autoplay_interval(&content(2, true, Some(1500))),
            Some(Duration::from_millis(1500))
        );
    }
}
