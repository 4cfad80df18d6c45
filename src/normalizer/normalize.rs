use http::StatusCode;

use super::{IncomingRequest, QueryParameters, TrackingParameterDenylist};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationResult {
    Unchanged,
    Redirect(RedirectTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub target_path: String,
    pub target_query: QueryParameters,
    pub status_code: StatusCode,
}

impl RedirectTarget {
    /// The value to send back in the `Location` header.
    pub fn location(&self) -> String {
        if self.target_query.is_empty() {
            self.target_path.clone()
        } else {
            format!("{}?{}", self.target_path, self.target_query.to_query_string())
        }
    }
}

/// Works out whether a request should be redirected to its canonical URL.
///
/// Tracking parameters are stripped first and the path is canonicalized second (trailing
/// slashes trimmed, leading slashes collapsed), with both changes folded into a single
/// redirect. A request which is already canonical is
/// always `Unchanged`, so following a redirect never produces another one.
pub fn normalize(
    request: &IncomingRequest,
    denylist: &TrackingParameterDenylist,
) -> NormalizationResult {
    if !request.is_navigational() {
        return NormalizationResult::Unchanged;
    }

    let query: QueryParameters = request
        .query
        .iter()
        .filter(|p| !denylist.contains(&p.name))
        .cloned()
        .collect();
    let stripped = query.len() != request.query.len();

    let path = canonical_path(&request.path);
    let trimmed = path != request.path;

    if !stripped && !trimmed {
        return NormalizationResult::Unchanged;
    }

    NormalizationResult::Redirect(RedirectTarget {
        target_path: path,
        target_query: query,
        status_code: StatusCode::MOVED_PERMANENTLY,
    })
}

/// Trims trailing slashes and collapses any leading run of `/` or `\` to a single `/`.
///
/// Browsers read `//host` and `/\host` as protocol-relative URLs, so neither may ever
/// lead a `Location` we send back.
fn canonical_path(path: &str) -> String {
    let body = path.trim_start_matches(['/', '\\']).trim_end_matches('/');
    if body.len() == path.len() {
        return body.to_string();
    }

    format!("/{body}")
}
