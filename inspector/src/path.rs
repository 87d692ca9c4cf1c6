//! Path utilities
//!
//! Paths are ordered ancestor-relation names. They qualify column
//! references and locate errors inside a filter section.

/// Build a new path from `path` followed by the non-blank `elements`
///
/// Elements are trimmed; blank ones are skipped.
pub fn build_path(path: &[String], elements: &[&str]) -> Vec<String> {
    let mut new_path = Vec::with_capacity(path.len() + elements.len());
    new_path.extend_from_slice(path);

    for element in elements {
        let trimmed = element.trim();
        if !trimmed.is_empty() {
            new_path.push(trimmed.to_string());
        }
    }

    new_path
}

/// Path with its last segment removed (unchanged when empty)
pub fn parent_path(path: &[String]) -> Vec<String> {
    match path.split_last() {
        Some((_, parent)) => parent.to_vec(),
        None => Vec::new(),
    }
}

/// Dotted location string, e.g. `where.user.profile`
pub fn dotted_path(section: &str, path: &[String]) -> String {
    let mut elements = Vec::with_capacity(path.len() + 1);
    elements.push(section);
    elements.extend(path.iter().map(String::as_str));
    elements.join(".")
}
