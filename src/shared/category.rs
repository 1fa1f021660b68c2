use serde::Serialize;
use std::fmt;

use super::error::{CollectorError, CollectorResult};

/// A label that doubles as a directory name under the base dir.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: &str) -> CollectorResult<Self> {
        let name = name.trim();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(CollectorError::InvalidCategory(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed, ordered set of categories for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    items: Vec<Category>,
}

impl CategorySet {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> CollectorResult<Self> {
        let mut items: Vec<Category> = Vec::with_capacity(names.len());
        for name in names {
            let category = Category::new(name.as_ref())?;
            if items.contains(&category) {
                return Err(CollectorError::InvalidCategory(format!(
                    "duplicate category '{}'",
                    category
                )));
            }
            items.push(category);
        }

        if items.is_empty() {
            return Err(CollectorError::InvalidCategory(
                "at least one category is required".to_string(),
            ));
        }

        Ok(Self { items })
    }

    /// Parses a comma separated list such as `mug, watch,spoon`.
    pub fn parse_list(list: &str) -> CollectorResult<Self> {
        let names: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        Self::from_names(&names)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        let items = crate::shared::constants::DEFAULT_CATEGORIES
            .iter()
            .map(|name| Category(name.to_string()))
            .collect();
        Self { items }
    }
}
