//! # REST API HTTP Server
//!
//! Every request enters through one axum fallback handler which performs its
//! own hierarchical dispatch. An outer response layer opens CORS on
//! everything the router returns, including extractor rejections.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, Method, Uri},
    middleware::map_response,
    response::{IntoResponse, Response},
    Router,
};

use super::errors::ApiError;
use super::handler::{ApiRequest, RequestDispatcher, TableNames};
use super::parser::QueryParams;
use crate::store::RecordStore;

/// REST API server state
pub struct RestServer<S: RecordStore> {
    dispatcher: Arc<RequestDispatcher<S>>,
}

impl<S: RecordStore + 'static> RestServer<S> {
    pub fn new(store: Arc<S>, tables: TableNames) -> Self {
        Self {
            dispatcher: Arc::new(RequestDispatcher::new(store, tables)),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        Router::new()
            .fallback(entry_point::<S>)
            .with_state(self.dispatcher)
            .layer(map_response(allow_any_origin))
    }
}

/// Shared state type
type ServerState<S> = Arc<RequestDispatcher<S>>;

/// Top-level entry: parse the query string, then route
async fn entry_point<S: RecordStore + 'static>(
    State(dispatcher): State<ServerState<S>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match Query::<Vec<(String, String)>>::try_from_uri(&uri) {
        Ok(Query(pairs)) => {
            let request = ApiRequest::new(method, uri.path())
                .with_params(QueryParams::new(pairs))
                .with_body(body);
            dispatcher.dispatch(&request).await.into_response()
        }
        Err(rejection) => ApiError::InvalidQueryParam(rejection.body_text()).into_response(),
    }
}

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let store = Arc::new(MemoryStore::with_tables(["Plants", "Occurrences"]));
        RestServer::new(store, TableNames::default()).router()
    }

    #[tokio::test]
    async fn test_cors_on_success() {
        let response = create_test_router()
            .oneshot(Request::get("/species").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_on_not_found() {
        let response = create_test_router()
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_on_oversized_body() {
        let body = vec![b' '; 3 * 1024 * 1024];
        let response = create_test_router()
            .oneshot(Request::post("/occurrences").body(Body::from(body)).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
