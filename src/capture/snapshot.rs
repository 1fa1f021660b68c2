use opencv::{core, imgcodecs, prelude::*};
use std::path::Path;

use crate::shared::category::Category;
use crate::shared::constants;
use crate::shared::error::{CollectorError, CollectorResult};
use crate::utils::time_utils::{snapshot_stamp, MonotonicStamp};

/// Persists one frame at the given path.
pub trait SnapshotSink<F> {
    fn write(&mut self, path: &Path, frame: &F) -> CollectorResult<()>;
}

pub struct JpegWriter {
    params: core::Vector<i32>,
}

impl JpegWriter {
    pub fn new(quality: i32) -> Self {
        let mut params = core::Vector::new();
        params.push(imgcodecs::IMWRITE_JPEG_QUALITY);
        params.push(quality);
        Self { params }
    }
}

impl SnapshotSink<Mat> for JpegWriter {
    fn write(&mut self, path: &Path, frame: &Mat) -> CollectorResult<()> {
        let Some(path_str) = path.to_str() else {
            return Err(CollectorError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path is not valid UTF-8",
                ),
            });
        };

        if !imgcodecs::imwrite(path_str, frame, &self.params)? {
            return Err(CollectorError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "encoder refused the frame"),
            });
        }
        Ok(())
    }
}

/// `<category>_<YYYYMMDD_HHMMSS_ffffff>.jpg`, unique within a session.
#[derive(Debug, Default)]
pub struct SnapshotNamer {
    stamps: MonotonicStamp,
}

impl SnapshotNamer {
    pub fn new() -> Self {
        Self {
            stamps: MonotonicStamp::new(),
        }
    }

    pub fn file_name(&mut self, category: &Category) -> String {
        let at = self.stamps.next();
        format!(
            "{}_{}.{}",
            category,
            snapshot_stamp(&at),
            constants::SNAPSHOT_EXTENSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_scoped_and_distinct() {
        let category = Category::new("spoon").unwrap();
        let mut namer = SnapshotNamer::new();

        let names: Vec<String> = (0..50).map(|_| namer.file_name(&category)).collect();
        for name in &names {
            assert!(name.starts_with("spoon_"));
            assert!(name.ends_with(".jpg"));
            // spoon_ + 8 + _ + 6 + _ + 6 + .jpg
            assert_eq!(name.len(), "spoon_".len() + 22 + 4);
        }

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }
}
