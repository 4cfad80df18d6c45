use crate::api::APIError;
use crate::models::*;
use crate::normalizer::{normalize, IncomingRequest};
use crate::utils::split_uri;
use actix_web::{get, web};
use http::Method;
use tracing_batteries::prelude::*;

#[derive(Debug, Deserialize)]
pub struct NormalizationQuery {
    url: String,
}

/// Reports what the normalizer would do with a URL without redirecting the caller.
#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/normalize")]
pub async fn get_normalization_v1(
    query: web::Query<NormalizationQuery>,
    state: web::Data<GlobalState>,
) -> Result<NormalizationV1, APIError> {
    let (path, query_string) = split_uri(&query.url);
    if !path.starts_with('/') {
        return Err(APIError::new(
            400,
            "Bad Request",
            "The URL you provided must be an absolute URL or a path beginning with '/'.",
        ));
    }

    if !state.config.should_normalize(path) {
        return Ok(NormalizationV1::excluded(query.url.as_str()));
    }

    let request = IncomingRequest::new(Method::GET, path, query_string);
    Ok(NormalizationV1::new(
        query.url.as_str(),
        normalize(&request, &state.config.denylist),
    ))
}
