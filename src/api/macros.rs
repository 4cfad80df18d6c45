#[macro_export]
macro_rules! test_state {
    ($state:ident = $config:expr) => {
        let $state = $crate::models::GlobalState::new($config, None);
    };
}

#[macro_export]
macro_rules! test_request {

    ($method:ident $path:expr => $status:ident | state = $state:ident) => {
        {
            let app = $crate::api::test::get_test_app($state.clone()).await;
            let req = actix_web::test::TestRequest::with_uri($path)
                .method(http::Method::$method)
                .insert_header(("User-Agent", "Test"))
                .to_request();

            let response = actix_web::test::call_service(&app, req).await;
            $crate::api::test::assert_status(response, http::StatusCode::$status).await
        }
    };

    ($method:ident $path:expr => $status:ident with content | state = $state:ident) => {
        {
            let response = test_request!($method $path => $status | state = $state);
            $crate::api::test::get_content(response).await
        }
    };

    ($method:ident $path:expr => $status:ident with location == $location:literal | state = $state:ident) => {
        {
            let response = test_request!($method $path => $status | state = $state);
            $crate::api::test::assert_location_header(response.headers(), $location);
            response
        }
    };

    /* --------------- DEFAULT GLOBAL STATE ------------------ */

    ($method:ident $path:expr => $status:ident) => {
        {
            test_state!(state = $crate::config::NormalizerConfig::default());

            test_request!($method $path => $status | state = state)
        }
    };

    ($method:ident $path:expr => $status:ident with content) => {
        {
            let response = test_request!($method $path => $status);
            $crate::api::test::get_content(response).await
        }
    };

    ($method:ident $path:expr => $status:ident with location == $location:literal) => {
        {
            let response = test_request!($method $path => $status);
            $crate::api::test::assert_location_header(response.headers(), $location);
            response
        }
    };
}
