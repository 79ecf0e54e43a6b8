use serde::{Deserialize, Serialize};

/// The absolute URL of a resource.
///
/// Two identifiers are the same resource exactly when their paths are equal;
/// all identifier-keyed collections hash by the path string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceIdentifier {
    path: String,
}

impl ResourceIdentifier {
    /// Creates an identifier from an absolute URL string.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The absolute URL of the resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this identifier denotes a container (its path ends in a slash).
    pub fn is_container(&self) -> bool {
        self.path.ends_with('/')
    }
}

impl From<&str> for ResourceIdentifier {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ResourceIdentifier {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Appends a trailing slash to `path` unless one is already present.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Removes the trailing slash from `path` if one is present.
pub fn trim_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_compares_identifiers_by_path() {
        let left = ResourceIdentifier::new("http://example.com/foo");
        let right = ResourceIdentifier::from("http://example.com/foo");

        assert_eq!(left, right);
        assert_ne!(left, ResourceIdentifier::new("http://example.com/foo/"));
    }

    #[test]
    fn it_recognizes_containers_by_trailing_slash() {
        assert!(ResourceIdentifier::new("http://example.com/bar/").is_container());
        assert!(!ResourceIdentifier::new("http://example.com/bar").is_container());
    }

    #[test]
    fn it_normalizes_trailing_slashes() {
        assert_eq!(ensure_trailing_slash("http://example.com"), "http://example.com/");
        assert_eq!(ensure_trailing_slash("http://example.com/"), "http://example.com/");
        assert_eq!(trim_trailing_slash("http://example.com/a/"), "http://example.com/a");
    }
}
