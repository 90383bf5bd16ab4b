//! Root-relative path helpers.
//!
//! Tree paths are root-relative: segments joined by `/`, no leading slash,
//! the vault root itself is `""`. The remote listing reports absolute paths
//! under a configured [`RootPrefix`].

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::result::AppResult;

/// Path separator used by both the tree and the remote store.
pub const SEPARATOR: char = '/';

/// Extension carried by note files.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// The absolute prefix under which the remote store keeps the vault.
///
/// Always starts with `/` and always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootPrefix(String);

impl RootPrefix {
    /// Parse and normalize a root prefix.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if !raw.starts_with(SEPARATOR) {
            return Err(AppError::configuration(format!(
                "root prefix '{raw}' must be an absolute path"
            )));
        }
        let mut prefix = raw.to_string();
        if !prefix.ends_with(SEPARATOR) {
            prefix.push(SEPARATOR);
        }
        Ok(Self(prefix))
    }

    /// The normalized prefix, including the trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn without_trailing_separator(&self) -> &str {
        &self.0[..self.0.len() - 1]
    }
}

impl Default for RootPrefix {
    fn default() -> Self {
        Self("/default/note/".to_string())
    }
}

impl fmt::Display for RootPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RootPrefix {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strip the root prefix from `full_path`; paths without it come back unchanged.
///
/// Idempotent: the result never starts with `/`, so it can never carry the
/// (absolute) prefix a second time.
pub fn to_relative(full_path: &str, root: &RootPrefix) -> String {
    if let Some(rest) = full_path.strip_prefix(root.as_str()) {
        return rest.trim_start_matches(SEPARATOR).to_string();
    }
    if full_path == root.without_trailing_separator() {
        return String::new();
    }
    full_path.to_string()
}

/// Inverse of [`to_relative`] for a root-relative path.
pub fn to_absolute(relative: &str, root: &RootPrefix) -> String {
    let relative = relative.trim_start_matches(SEPARATOR);
    if relative.is_empty() {
        return root.without_trailing_separator().to_string();
    }
    format!("{}{}", root.as_str(), relative)
}

/// Join a parent path and a child name; the root parent (`""`) yields the bare name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

/// Directory portion of a path (`""` for top-level entries).
pub fn parent_of(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Final segment of a path.
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Whether `path` equals `ancestor` or lies somewhere beneath it.
pub fn is_same_or_within(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() || path == ancestor {
        return true;
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Re-root `path` from `old_prefix` to `new_prefix`.
///
/// Returns `None` when `path` is not `old_prefix` or one of its descendants.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        return Some(new_prefix.to_string());
    }
    let rest = path
        .strip_prefix(old_prefix)?
        .strip_prefix(SEPARATOR)?;
    Some(join(new_prefix, rest))
}

/// Remove one trailing `.md` from a note name.
pub fn strip_markdown_extension(name: &str) -> &str {
    name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(name)
}

/// Whether `name` can be used as a single path segment.
pub fn is_valid_segment(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(SEPARATOR) && name != "." && name != ".."
}
