//! Route handlers for the `posts` resource.
//!
//! Every route is described by a [`RouteSpec`] and served by the single
//! [`forward_route`] function; the axum handlers below only extract the
//! path id. Submodules hold the forwarding client ([`client`]), header
//! merging ([`headers`]), status classification ([`classify`]), and the
//! response writer ([`response`]).

pub mod classify;
pub mod client;
pub mod headers;
pub mod response;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::Method;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::posts::Post;
use crate::server::AppState;

/// Which inbound headers take part in the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    Forward,
    Drop,
}

#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub name: &'static str,
    pub method: Method,
    pub headers: HeaderPolicy,
    pub with_query: bool,
}

pub static LIST_POSTS: RouteSpec = RouteSpec {
    name: "list_posts",
    method: Method::GET,
    headers: HeaderPolicy::Forward,
    with_query: true,
};

pub static GET_POST: RouteSpec = RouteSpec {
    name: "get_post",
    method: Method::GET,
    headers: HeaderPolicy::Drop,
    with_query: false,
};

pub static CREATE_POST: RouteSpec = RouteSpec {
    name: "create_post",
    method: Method::POST,
    headers: HeaderPolicy::Forward,
    with_query: false,
};

pub static UPDATE_POST: RouteSpec = RouteSpec {
    name: "update_post",
    method: Method::PUT,
    headers: HeaderPolicy::Forward,
    with_query: false,
};

pub static PATCH_POST: RouteSpec = RouteSpec {
    name: "patch_post",
    method: Method::PATCH,
    headers: HeaderPolicy::Forward,
    with_query: false,
};

pub static DELETE_POST: RouteSpec = RouteSpec {
    name: "delete_post",
    method: Method::DELETE,
    headers: HeaderPolicy::Forward,
    with_query: false,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(update_post)
                .patch(patch_post)
                .delete(delete_post),
        )
}

/// Forward one inbound request per `spec` and write the response in shape `T`.
pub async fn forward_route<T>(
    state: &AppState,
    spec: &RouteSpec,
    id: Option<&str>,
    request: Request,
) -> Response
where
    T: DeserializeOwned + Serialize,
{
    let (parts, body) = request.into_parts();

    let correlation_id = parts
        .headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let query = if spec.with_query {
        parts.uri.query()
    } else {
        None
    };
    let overrides = match spec.headers {
        HeaderPolicy::Forward => Some(&parts.headers),
        HeaderPolicy::Drop => None,
    };

    let outcome = match state.upstream.target(id, query) {
        Ok(url) => {
            tracing::info!(
                correlation_id = %correlation_id,
                route = spec.name,
                method = %spec.method,
                url = %url,
                "request received"
            );
            match state
                .client
                .forward(spec.method.clone(), &url, body, overrides)
                .await
            {
                Ok(result) => response::write_json_response::<T>(&result),
                Err(e) => {
                    tracing::error!(
                        correlation_id = %correlation_id,
                        route = spec.name,
                        kind = e.kind(),
                        error = %e,
                        "forward failed"
                    );
                    Err(response::write_server_error())
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                correlation_id = %correlation_id,
                route = spec.name,
                error = %e,
                "rejected target"
            );
            Err(response::write_server_error())
        }
    };

    match outcome {
        Ok(response) => {
            state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
            response
        }
        Err(envelope) => {
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            envelope
        }
    }
}

pub async fn list_posts(State(state): State<Arc<AppState>>, request: Request) -> Response {
    forward_route::<Vec<Post>>(&state, &LIST_POSTS, None, request).await
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    forward_route::<Post>(&state, &GET_POST, Some(&id), request).await
}

pub async fn create_post(State(state): State<Arc<AppState>>, request: Request) -> Response {
    forward_route::<Post>(&state, &CREATE_POST, None, request).await
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    forward_route::<Post>(&state, &UPDATE_POST, Some(&id), request).await
}

pub async fn patch_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    forward_route::<Post>(&state, &PATCH_POST, Some(&id), request).await
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    forward_route::<Post>(&state, &DELETE_POST, Some(&id), request).await
}
