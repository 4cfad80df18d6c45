use std::collections::HashSet;

/// Campaign and attribution parameters which never change what a page renders.
pub const DEFAULT_TRACKING_PARAMETERS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "fbclid",
    "gclid",
    "msclkid",
    "ref",
];

/// The set of query parameter names which are stripped from navigation URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingParameterDenylist {
    names: HashSet<String>,
}

impl TrackingParameterDenylist {
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    pub fn with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.extend(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty()),
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl Default for TrackingParameterDenylist {
    fn default() -> Self {
        Self::empty().with(DEFAULT_TRACKING_PARAMETERS)
    }
}
