use opencv::{highgui, prelude::*};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{picker, FeedSurface, InputEvent, StatusOverlay};
use crate::shared::category::{Category, CategorySet};
use crate::shared::constants;
use crate::shared::error::CollectorResult;

/// Live feed window backed by OpenCV highgui.
pub struct HighGuiFeed {
    poll_ms: i32,
    interrupted: Arc<AtomicBool>,
}

impl HighGuiFeed {
    /// `interrupted` is raised by the Ctrl+C handler and read as a quit key.
    pub fn new(poll_ms: i32, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            poll_ms: poll_ms.max(1),
            interrupted,
        }
    }
}

impl FeedSurface<Mat> for HighGuiFeed {
    fn show(&mut self, frame: &Mat, status: &StatusOverlay) -> CollectorResult<()> {
        let mut canvas = frame.try_clone()?;
        status.draw(&mut canvas)?;
        highgui::imshow(constants::FEED_WINDOW, &canvas)?;
        Ok(())
    }

    fn poll_input(&mut self) -> CollectorResult<InputEvent> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Ok(InputEvent::Quit);
        }

        let key = highgui::wait_key(self.poll_ms)?;
        Ok(InputEvent::from_key(key))
    }

    fn pick_category(&mut self, categories: &CategorySet) -> CollectorResult<Option<Category>> {
        picker::present(categories, &self.interrupted)
    }

    fn close(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            crate::utils::logger::error(&format!("destroy_all_windows failed: {}", err));
        }
    }
}
