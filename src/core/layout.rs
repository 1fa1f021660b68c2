use std::path::{Path, PathBuf};

use crate::shared::category::{Category, CategorySet};
use crate::shared::error::CollectorResult;
use crate::utils::file_utils;

/// `<base_dir>/<category>/` for every category.
#[derive(Debug, Clone)]
pub struct DirectoryLayout {
    base_dir: PathBuf,
    categories: CategorySet,
}

impl DirectoryLayout {
    pub fn new(base_dir: impl Into<PathBuf>, categories: CategorySet) -> Self {
        Self {
            base_dir: base_dir.into(),
            categories,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn category_dir(&self, category: &Category) -> PathBuf {
        self.base_dir.join(category.as_str())
    }

    /// Creates whatever is missing and returns the directories it created.
    /// Existing directories and their contents are left alone.
    pub fn initialize(&self) -> CollectorResult<Vec<PathBuf>> {
        let mut created = Vec::new();

        if file_utils::ensure_dir(&self.base_dir)? {
            created.push(self.base_dir.clone());
        }

        for category in self.categories.iter() {
            let dir = self.category_dir(category);
            if file_utils::ensure_dir(&dir)? {
                created.push(dir);
            }
        }

        crate::utils::logger::debug(&format!(
            "layout {}: {} director(ies) created",
            self.base_dir.display(),
            created.len()
        ));

        Ok(created)
    }
}
