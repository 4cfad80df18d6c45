/// Splits a path or absolute URL into its raw path and query string.
///
/// The scheme and authority of an absolute URL are dropped along with any fragment, and
/// an absolute URL without a path refers to the root (`/`).
pub fn split_uri(mut uri: &str) -> (&str, &str) {
    uri = uri.trim();
    if let Some((_scheme, rest)) = uri.split_once("://") {
        uri = match rest.find(['/', '?', '#']) {
            Some(idx) if rest[idx..].starts_with('/') => &rest[idx..],
            Some(idx) => return split_relative(&rest[idx..], "/"),
            None => "/",
        };
    }

    split_relative(uri, "")
}

fn split_relative<'a>(uri: &'a str, empty_path: &'a str) -> (&'a str, &'a str) {
    let uri = uri.split_once('#').map(|(u, _)| u).unwrap_or(uri);
    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));

    if path.is_empty() {
        (empty_path, query)
    } else {
        (path, query)
    }
}
