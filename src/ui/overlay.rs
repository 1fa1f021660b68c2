use opencv::{core, imgproc, prelude::*};

use crate::shared::constants;
use crate::shared::error::CollectorResult;

/// Text shown in the status band of the live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOverlay {
    pub recording: bool,
    pub category: Option<String>,
    pub image_counter: u64,
}

impl StatusOverlay {
    pub fn status_text(&self) -> String {
        let status = if self.recording { "Recording" } else { "Stopped" };
        format!("Status: {}", status)
    }

    pub fn category_text(&self) -> String {
        format!("Category: {}", self.category.as_deref().unwrap_or("None"))
    }

    pub fn counter_text(&self) -> String {
        format!("Images: {}", self.image_counter)
    }

    /// Paints the black band and the three labels onto `canvas`.
    pub fn draw(&self, canvas: &mut Mat) -> CollectorResult<()> {
        let height = canvas.rows();
        let width = canvas.cols();
        let white = core::Scalar::new(255.0, 255.0, 255.0, 0.0);

        imgproc::rectangle(
            canvas,
            core::Rect::new(
                0,
                height - constants::STATUS_BAND_HEIGHT,
                width,
                constants::STATUS_BAND_HEIGHT,
            ),
            core::Scalar::all(0.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        let labels = [
            (
                self.status_text(),
                core::Point::new(constants::TEXT_MARGIN, height - constants::STATUS_LINE_OFFSET),
            ),
            (
                self.category_text(),
                core::Point::new(constants::TEXT_MARGIN, height - constants::CATEGORY_LINE_OFFSET),
            ),
            (
                self.counter_text(),
                core::Point::new(
                    width - constants::COUNTER_RIGHT_INSET,
                    height - constants::CATEGORY_LINE_OFFSET,
                ),
            ),
        ];

        for (text, origin) in labels {
            imgproc::put_text(
                canvas,
                &text,
                origin,
                imgproc::FONT_HERSHEY_SIMPLEX,
                constants::FONT_SCALE,
                white,
                constants::FONT_THICKNESS,
                imgproc::LINE_8,
                false,
            )?;
        }

        Ok(())
    }
}
