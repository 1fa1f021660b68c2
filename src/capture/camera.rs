use opencv::{prelude::*, videoio};

use super::probe::CameraReport;
use super::FrameSource;
use crate::shared::error::{CollectorError, CollectorResult};

pub struct OpenCvCamera {
    index: i32,
    capture: videoio::VideoCapture,
}

impl OpenCvCamera {
    pub fn open(index: i32) -> CollectorResult<Self> {
        crate::utils::logger::debug(&format!("opening camera {}", index));

        // CAP_ANY lets OpenCV pick the backend
        // macOS: AVFoundation, Windows: Media Foundation / DirectShow, Linux: V4L2
        let capture = match videoio::VideoCapture::new(index, videoio::CAP_ANY) {
            Ok(capture) => capture,
            Err(err) => {
                crate::utils::logger::error(&format!("VideoCapture::new({}) failed: {}", index, err));
                return Err(CollectorError::DeviceUnavailable { index });
            }
        };

        if !capture.is_opened()? {
            crate::utils::logger::error(&format!("camera {} did not open", index));
            return Err(CollectorError::DeviceUnavailable { index });
        }

        crate::utils::logger::info(&format!(
            "camera {} opened ({}x{})",
            index,
            capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or_default(),
            capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or_default()
        ));

        Ok(Self { index, capture })
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    /// Reads one frame and reports what the device actually delivers.
    pub fn report(&mut self) -> CollectorResult<CameraReport> {
        let frame = self.read_frame()?;
        let backend = self
            .capture
            .get_backend_name()
            .unwrap_or_else(|_| "unknown".to_string());
        let fps = self.capture.get(videoio::CAP_PROP_FPS).unwrap_or(0.0);

        Ok(CameraReport {
            index: self.index,
            backend,
            width: frame.cols(),
            height: frame.rows(),
            fps,
        })
    }
}

impl FrameSource for OpenCvCamera {
    type Frame = Mat;

    fn read_frame(&mut self) -> CollectorResult<Mat> {
        let mut frame = Mat::default();
        let grabbed = self
            .capture
            .read(&mut frame)
            .map_err(|err| CollectorError::FrameRead(err.to_string()))?;

        if !grabbed || frame.empty() {
            return Err(CollectorError::FrameRead(format!(
                "camera {} returned no frame",
                self.index
            )));
        }

        Ok(frame)
    }

    fn release(&mut self) -> CollectorResult<()> {
        self.capture.release()?;
        crate::utils::logger::debug(&format!("camera {} released", self.index));
        Ok(())
    }
}
