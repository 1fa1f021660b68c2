use std::path::Path;

use crate::shared::error::CollectorResult;
use crate::utils::file_utils;

/// Everything before the first `marker`; the whole name when it is absent.
pub fn truncate_at_first<'a>(name: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return name;
    }
    match name.find(marker) {
        Some(pos) => &name[..pos],
        None => name,
    }
}

pub fn normalize_names<S: AsRef<str>>(names: &[S], marker: &str) -> Vec<String> {
    names
        .iter()
        .map(|name| truncate_at_first(name.as_ref(), marker).to_string())
        .collect()
}

/// Lists the plain files in `dir` and strips each name at `marker`.
/// Read-only; keeps the directory listing order.
pub fn normalize_dir(dir: &Path, marker: &str) -> CollectorResult<Vec<String>> {
    let names = file_utils::list_file_names(dir)?;
    crate::utils::logger::debug(&format!(
        "normalize {}: {} file(s), marker {:?}",
        dir.display(),
        names.len(),
        marker
    ));
    Ok(normalize_names(&names, marker))
}
