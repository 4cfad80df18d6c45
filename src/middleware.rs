use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_service::{forward_ready, Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{header, Uri};
use actix_web::{Error, HttpResponse};
use futures::future::LocalBoxFuture;
use tracing_batteries::prelude::*;

use crate::config::NormalizerConfig;
use crate::normalizer::{normalize, IncomingRequest, NormalizationResult};

/// Redirects navigation requests to their canonical URL before they reach routing.
pub struct NormalizeRequests {
    config: Arc<NormalizerConfig>,
}

impl NormalizeRequests {
    pub fn new(config: Arc<NormalizerConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for NormalizeRequests
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = NormalizeRequestsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(NormalizeRequestsMiddleware {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct NormalizeRequestsMiddleware<S> {
    service: Rc<S>,
    config: Arc<NormalizerConfig>,
}

impl<S, B> Service<ServiceRequest> for NormalizeRequestsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.config.should_normalize(req.path()) {
            let incoming =
                IncomingRequest::new(req.method().clone(), req.path(), req.query_string());

            if let NormalizationResult::Redirect(target) =
                normalize(&incoming, &self.config.denylist)
            {
                let location = target.location();
                debug!(
                    "Redirecting {} to canonical URL {}",
                    requested_target(req.uri()),
                    location
                );

                let response = HttpResponse::build(target.status_code)
                    .insert_header((header::LOCATION, location))
                    .finish();

                return Box::pin(ready(Ok(req.into_response(response).map_into_right_body())));
            }
        }

        let service = self.service.clone();
        Box::pin(async move {
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// The path and query exactly as requested, with no `?` when there was no query.
fn requested_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_else(|| uri.path())
}

#[cfg(test)]
mod tests {
    use crate::api::test::*;
    use crate::config::*;
    use crate::normalizer::*;

    #[actix_rt::test]
    async fn redirects_trailing_slash() {
        test_log_init();

        test_request!(GET "/about/" => MOVED_PERMANENTLY with location == "/about");
    }

    #[actix_rt::test]
    async fn redirects_tracking_parameters() {
        test_log_init();

        test_request!(GET "/about?utm_source=fb" => MOVED_PERMANENTLY with location == "/about");
        test_request!(GET "/?utm_source=fb" => MOVED_PERMANENTLY with location == "/");
    }

    #[actix_rt::test]
    async fn merges_into_a_single_redirect() {
        test_log_init();

        test_state!(state = NormalizerConfig::default());

        test_request!(GET "/about/?utm_source=fb&ref=x" => MOVED_PERMANENTLY with location == "/about" | state = state);
        test_request!(GET "/about" => NOT_FOUND | state = state);
    }

    #[test]
    fn requested_target_only_includes_a_query_when_present() {
        use super::requested_target;
        use actix_web::http::Uri;

        assert_eq!(requested_target(&Uri::from_static("/about/")), "/about/");
        assert_eq!(
            requested_target(&Uri::from_static("/about/?utm_source=fb")),
            "/about/?utm_source=fb"
        );
    }

    #[actix_rt::test]
    async fn never_redirects_off_site() {
        test_log_init();

        test_request!(GET "//evil.example/" => MOVED_PERMANENTLY with location == "/evil.example");
        test_request!(GET "//evil.example?utm_source=fb" => MOVED_PERMANENTLY with location == "/evil.example");
        test_request!(GET "///evil.example/path/?page=2" => MOVED_PERMANENTLY with location == "/evil.example/path?page=2");
        test_request!(GET "/evil.example" => NOT_FOUND);
    }

    #[actix_rt::test]
    async fn keeps_remaining_parameters() {
        test_log_init();

        test_request!(GET "/homes/?sort=price&utm_campaign=spring&page=2" => MOVED_PERMANENTLY with location == "/homes?sort=price&page=2");
    }

    #[actix_rt::test]
    async fn passes_canonical_requests_through() {
        test_log_init();

        test_request!(GET "/about" => NOT_FOUND);
        test_request!(GET "/" => NOT_FOUND);
        test_request!(GET "/homes?page=2" => NOT_FOUND);
    }

    #[actix_rt::test]
    async fn ignores_non_navigational_requests() {
        test_log_init();

        test_request!(POST "/about/?utm_source=fb" => NOT_FOUND);
        test_request!(HEAD "/about/" => MOVED_PERMANENTLY with location == "/about");
    }

    #[actix_rt::test]
    async fn ignores_excluded_paths() {
        test_log_init();

        test_request!(GET "/robots.txt?utm_source=fb" => NOT_FOUND);
        test_request!(GET "/_next/static/chunk.js/" => NOT_FOUND);
        test_request!(GET "/api/v1/health?utm_source=fb" => OK);
    }

    #[actix_rt::test]
    async fn uses_configured_denylist() {
        test_log_init();

        test_state!(
            state = NormalizerConfig::new(
                TrackingParameterDenylist::empty().with(["session"]),
                PathExclusions::empty(),
            )
        );

        test_request!(GET "/about?session=1&utm_source=fb" => MOVED_PERMANENTLY with location == "/about?utm_source=fb" | state = state);
        test_request!(GET "/robots.txt/" => MOVED_PERMANENTLY with location == "/robots.txt" | state = state);
    }
}
