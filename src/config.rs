use std::collections::HashSet;

use crate::normalizer::TrackingParameterDenylist;

pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next", "/static"];

pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
    "/manifest.json",
];

/// Paths which are served as-is and never redirected to a canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExclusions {
    prefixes: Vec<String>,
    files: HashSet<String>,
}

impl PathExclusions {
    pub fn empty() -> Self {
        Self {
            prefixes: Vec::new(),
            files: HashSet::new(),
        }
    }

    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.prefixes
            .extend(prefixes.into_iter().filter_map(|p| rooted(p.as_ref())));
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.files
            .extend(files.into_iter().filter_map(|f| rooted(f.as_ref())));
        self
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.files.contains(path)
            || self.prefixes.iter().any(|prefix| {
                path.strip_prefix(prefix.as_str()).is_some_and(|rest| {
                    rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/')
                })
            })
    }
}

impl Default for PathExclusions {
    fn default() -> Self {
        Self::empty()
            .with_prefixes(DEFAULT_EXCLUDED_PREFIXES)
            .with_files(DEFAULT_EXCLUDED_FILES)
    }
}

fn rooted(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

/// Load-time configuration for the request normalizer, shared read-only between workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub denylist: TrackingParameterDenylist,
    pub exclusions: PathExclusions,
}

impl NormalizerConfig {
    pub fn new(denylist: TrackingParameterDenylist, exclusions: PathExclusions) -> Self {
        Self {
            denylist,
            exclusions,
        }
    }

    pub fn should_normalize(&self, path: &str) -> bool {
        !self.exclusions.is_excluded(path)
    }
}
