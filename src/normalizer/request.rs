use std::fmt;

use http::Method;

/// A snapshot of the parts of an inbound request which take part in normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParameters,
}

impl IncomingRequest {
    pub fn new<P: Into<String>>(method: Method, path: P, raw_query: &str) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParameters::parse(raw_query),
        }
    }

    /// Navigational requests are the only ones we will ever redirect.
    pub fn is_navigational(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    pub name: String,
    pub value: Option<String>,
}

impl QueryParameter {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The query parameters of a request, in the order the client sent them.
///
/// Names and values are kept exactly as they appeared on the wire. Nothing here
/// percent-decodes, so a malformed escape sequence is just another opaque string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters(Vec<QueryParameter>);

impl QueryParameters {
    pub fn parse(raw: &str) -> Self {
        raw.split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((name, value)) => QueryParameter::new(name, value),
                None => QueryParameter::flag(part),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryParameter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<QueryParameter> for QueryParameters {
    fn from_iter<T: IntoIterator<Item = QueryParameter>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
