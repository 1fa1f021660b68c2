pub mod feed;
pub mod input;
pub mod overlay;
pub mod picker;

pub use feed::HighGuiFeed;
pub use input::InputEvent;
pub use overlay::StatusOverlay;

use crate::shared::category::{Category, CategorySet};
use crate::shared::error::CollectorResult;

/// Everything the session needs from the screen and keyboard.
pub trait FeedSurface<F> {
    /// Shows `frame` with the status band drawn over a copy of it.
    fn show(&mut self, frame: &F, status: &StatusOverlay) -> CollectorResult<()>;

    /// One input event per call, waiting at most the poll interval.
    fn poll_input(&mut self) -> CollectorResult<InputEvent>;

    /// Runs the modal category picker to completion.
    fn pick_category(&mut self, categories: &CategorySet) -> CollectorResult<Option<Category>>;

    fn close(&mut self);
}
