use crossbeam_channel::{Receiver, TryRecvError};
use opencv::{core, highgui, imgproc, prelude::*};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::shared::category::{Category, CategorySet};
use crate::shared::constants;
use crate::shared::error::CollectorResult;

/// Inclusive pixel bounds of one picker button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ButtonRect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

/// What the picker loop saw during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerInput {
    Click { x: i32, y: i32 },
    /// The window was closed from outside.
    Closed,
    /// Quit key.
    Cancel,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    Pending,
    Chosen(Category),
    Cancelled,
}

/// Vertical stack of one button per category.
pub struct PickerLayout {
    buttons: Vec<(Category, ButtonRect)>,
}

impl PickerLayout {
    pub fn new(categories: &CategorySet) -> Self {
        let buttons = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let top = constants::PICKER_TOP
                    + idx as i32 * (constants::PICKER_BUTTON_HEIGHT + constants::PICKER_BUTTON_MARGIN);
                let rect = ButtonRect {
                    left: constants::PICKER_SIDE_MARGIN,
                    top,
                    right: constants::PICKER_WIDTH - constants::PICKER_SIDE_MARGIN,
                    bottom: top + constants::PICKER_BUTTON_HEIGHT,
                };
                (category.clone(), rect)
            })
            .collect();

        Self { buttons }
    }

    pub fn buttons(&self) -> &[(Category, ButtonRect)] {
        &self.buttons
    }

    /// First button (top to bottom) containing the point.
    pub fn hit(&self, x: i32, y: i32) -> Option<&Category> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(category, _)| category)
    }

    pub fn step(&self, input: PickerInput) -> PickerStep {
        match input {
            PickerInput::Click { x, y } => match self.hit(x, y) {
                Some(category) => PickerStep::Chosen(category.clone()),
                None => PickerStep::Pending,
            },
            PickerInput::Closed | PickerInput::Cancel => PickerStep::Cancelled,
            PickerInput::Idle => PickerStep::Pending,
        }
    }

    /// The canvas tall enough for every button, never smaller than the default.
    fn canvas_height(&self) -> i32 {
        let needed = self
            .buttons
            .last()
            .map(|(_, rect)| rect.bottom + constants::PICKER_BUTTON_MARGIN)
            .unwrap_or(0);
        needed.max(constants::PICKER_HEIGHT)
    }

    pub fn render(&self) -> CollectorResult<Mat> {
        let mut canvas = Mat::new_rows_cols_with_default(
            self.canvas_height(),
            constants::PICKER_WIDTH,
            core::CV_8UC3,
            core::Scalar::all(0.0),
        )?;

        let fill = core::Scalar::new(50.0, 50.0, 50.0, 0.0);
        let white = core::Scalar::new(255.0, 255.0, 255.0, 0.0);

        for (category, rect) in self.buttons() {
            imgproc::rectangle(
                &mut canvas,
                core::Rect::new(rect.left, rect.top, rect.right - rect.left, rect.bottom - rect.top),
                fill,
                imgproc::FILLED,
                imgproc::LINE_8,
                0,
            )?;

            let mut baseline = 0;
            let text_size = imgproc::get_text_size(
                category.as_str(),
                imgproc::FONT_HERSHEY_SIMPLEX,
                constants::FONT_SCALE,
                constants::FONT_THICKNESS,
                &mut baseline,
            )?;
            let origin = core::Point::new(
                (constants::PICKER_WIDTH - text_size.width) / 2,
                rect.top + (constants::PICKER_BUTTON_HEIGHT + text_size.height) / 2,
            );

            imgproc::put_text(
                &mut canvas,
                category.as_str(),
                origin,
                imgproc::FONT_HERSHEY_SIMPLEX,
                constants::FONT_SCALE,
                white,
                constants::FONT_THICKNESS,
                imgproc::LINE_8,
                false,
            )?;
        }

        Ok(canvas)
    }
}

/// Shows the picker window and blocks until a category is clicked or the
/// picker is dismissed. A raised `interrupted` flag dismisses it too.
pub fn present(categories: &CategorySet, interrupted: &AtomicBool) -> CollectorResult<Option<Category>> {
    let layout = PickerLayout::new(categories);
    let canvas = layout.render()?;

    highgui::named_window(constants::PICKER_WINDOW, highgui::WINDOW_AUTOSIZE)?;
    highgui::imshow(constants::PICKER_WINDOW, &canvas)?;

    let (click_tx, click_rx) = crossbeam_channel::unbounded::<(i32, i32)>();
    highgui::set_mouse_callback(
        constants::PICKER_WINDOW,
        Some(Box::new(move |event: i32, x: i32, y: i32, _flags: i32| {
            if event == highgui::EVENT_LBUTTONDOWN {
                let _ = click_tx.send((x, y));
            }
        })),
    )?;

    // let the window appear before polling its visibility
    highgui::wait_key(constants::PICKER_SETTLE_MS)?;

    let outcome = loop {
        let input = next_input(interrupted, &click_rx)?;
        match layout.step(input) {
            PickerStep::Pending => continue,
            PickerStep::Chosen(category) => break Some(category),
            PickerStep::Cancelled => break None,
        }
    };

    close_picker();

    match &outcome {
        Some(category) => crate::utils::logger::info(&format!("picker: selected {}", category)),
        None => crate::utils::logger::debug("picker: dismissed"),
    }

    Ok(outcome)
}

/// Input already waiting without touching the window: Ctrl+C first, then
/// queued clicks.
fn pending_input(interrupted: &AtomicBool, clicks: &Receiver<(i32, i32)>) -> Option<PickerInput> {
    if interrupted.load(Ordering::SeqCst) {
        return Some(PickerInput::Cancel);
    }

    match clicks.try_recv() {
        Ok((x, y)) => Some(PickerInput::Click { x, y }),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(PickerInput::Closed),
    }
}

fn next_input(interrupted: &AtomicBool, clicks: &Receiver<(i32, i32)>) -> CollectorResult<PickerInput> {
    if let Some(input) = pending_input(interrupted, clicks) {
        return Ok(input);
    }

    // a failed query means the window is already gone
    match highgui::get_window_property(constants::PICKER_WINDOW, highgui::WND_PROP_VISIBLE) {
        Ok(visible) if visible > 0.0 => {}
        _ => return Ok(PickerInput::Closed),
    }

    let key = highgui::wait_key(constants::PICKER_POLL_MS)?;
    if key >= 0 && (key & 0xFF) as u8 == b'q' {
        return Ok(PickerInput::Cancel);
    }

    Ok(PickerInput::Idle)
}

fn close_picker() {
    let _ = highgui::set_mouse_callback(constants::PICKER_WINDOW, None);
    let _ = highgui::destroy_window(constants::PICKER_WINDOW);
    // flush the destroy on GTK backends
    let _ = highgui::wait_key(1);
}
