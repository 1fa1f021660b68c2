use std::fs;
use std::path::{Path, PathBuf};

use super::category::CategorySet;
use super::constants;
use super::error::{CollectorError, CollectorResult};

/// Resolved settings for a collector run.
///
/// Built from the constants, then `snapcollect.config` if present, then
/// command line flags.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub base_dir: PathBuf,
    pub camera_index: i32,
    pub categories: CategorySet,
    pub poll_interval_ms: i32,
    pub jpeg_quality: i32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(constants::DEFAULT_BASE_DIR),
            camera_index: constants::DEFAULT_CAMERA_INDEX,
            categories: CategorySet::default(),
            poll_interval_ms: constants::DEFAULT_POLL_MS,
            jpeg_quality: constants::DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Values passed on the command line. `None` keeps the file/default value.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    pub camera_index: Option<i32>,
    pub categories: Option<String>,
}

impl CollectorConfig {
    pub fn load(config_path: &Path, overrides: &ConfigOverrides) -> CollectorResult<Self> {
        let mut config = Self::default();

        match fs::read_to_string(config_path) {
            Ok(content) => {
                config.apply_file(&content)?;
                crate::utils::logger::info(&format!(
                    "loaded config from {}",
                    config_path.display()
                ));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(CollectorError::Io {
                    path: config_path.to_path_buf(),
                    source,
                })
            }
        }

        config.apply_overrides(overrides)?;
        Ok(config)
    }

    fn apply_file(&mut self, content: &str) -> CollectorResult<()> {
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(CollectorError::InvalidConfig {
                    key: trimmed.to_string(),
                    value: String::new(),
                });
            };
            self.set(key.trim(), value.trim())?;
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> CollectorResult<()> {
        match key {
            "base-dir" => self.base_dir = PathBuf::from(value),
            "camera" => self.camera_index = parse_number(key, value)?,
            "categories" => self.categories = CategorySet::parse_list(value)?,
            "poll-ms" => {
                let ms: i32 = parse_number(key, value)?;
                if ms < 1 {
                    return Err(invalid(key, value));
                }
                self.poll_interval_ms = ms;
            }
            "jpeg-quality" => {
                let quality: i32 = parse_number(key, value)?;
                if !(0..=100).contains(&quality) {
                    return Err(invalid(key, value));
                }
                self.jpeg_quality = quality;
            }
            _ => return Err(invalid(key, value)),
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> CollectorResult<()> {
        if let Some(base_dir) = &overrides.base_dir {
            self.base_dir = base_dir.clone();
        }
        if let Some(index) = overrides.camera_index {
            self.camera_index = index;
        }
        if let Some(list) = &overrides.categories {
            self.categories = CategorySet::parse_list(list)?;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> CollectorResult<T> {
    value.parse::<T>().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> CollectorError {
    CollectorError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
