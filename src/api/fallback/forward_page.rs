use crate::api::APIError;
use crate::models::*;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing_batteries::prelude::*;

/// Hands canonical requests on to the site's origin, if one has been configured.
#[tracing::instrument(err, skip(req, body, state), fields(otel.kind = "internal"))]
pub async fn forward_page(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<GlobalState>,
) -> Result<HttpResponse, APIError> {
    match &state.upstream {
        Some(upstream) => upstream.forward(&req, body).await,
        None => Err(APIError::new(
            404,
            "Not Found",
            "The page you requested could not be found.",
        )),
    }
}
