//! Request gate for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shelf_core::AuthValidator;

use crate::{adapters::AxumRequest, error::ApiError, state::ShelfState};

/// Admits a request only if it carries a valid bearer token for a live
/// account. The resolved `AuthContext` is inserted into the request
/// extensions, where handlers pick it up with `Extension<AuthContext>`.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/profile", get(routes::profile::<S>))
///     .route_layer(middleware::from_fn_with_state(state.clone(), gate::require_auth::<S>));
/// ```
#[tracing::instrument(
    name = "Request gate",
    skip_all,
    fields(path = %request.uri().path(), user_id = tracing::field::Empty)
)]
pub async fn require_auth<S>(State(state): State<S>, request: Request, next: Next) -> Response
where
    S: ShelfState,
{
    let (mut parts, body) = request.into_parts();

    let context = match state.validator().validate(&AxumRequest(&parts)).await {
        Ok(context) => context,
        Err(e) => return ApiError::from(e).into_response(),
    };

    tracing::Span::current().record("user_id", tracing::field::display(context.user_id));
    parts.extensions.insert(context);

    next.run(Request::from_parts(parts, body)).await
}
