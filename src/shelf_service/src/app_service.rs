use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    middleware,
    routing::{get, post},
};
use shelf_adapters::config::{API_PREFIX, AllowedOrigins};
use shelf_axum::{
    ShelfState, require_auth,
    routes::{
        create_book, delete_book, delete_user, get_book, get_user, health, list_books,
        list_users, login, profile, register, update_book, update_user,
    },
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The whole HTTP surface: `/health` plus the API nested under `/api/v1`.
pub struct ShelfService {
    router: Router,
}

impl ShelfService {
    /// Builds every route against `state`.
    ///
    /// Registration and login are public. Everything else sits behind
    /// [`require_auth`], which resolves the caller before the handler runs.
    pub fn new<S>(state: S) -> Self
    where
        S: ShelfState,
    {
        let public = Router::new()
            .route("/auth/register", post(register::<S>))
            .route("/auth/login", post(login::<S>));

        let protected = Router::new()
            .route("/profile", get(profile::<S>))
            .route("/users", get(list_users::<S>))
            .route(
                "/users/{id}",
                get(get_user::<S>)
                    .put(update_user::<S>)
                    .delete(delete_user::<S>),
            )
            .route("/books", get(list_books::<S>).post(create_book::<S>))
            .route(
                "/books/{id}",
                get(get_book::<S>)
                    .put(update_book::<S>)
                    .delete(delete_book::<S>),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth::<S>,
            ));

        let api = public.merge(protected).with_state(state);

        let router = Router::new()
            .route("/health", get(health))
            .nest(API_PREFIX, api);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finishes the router. CORS is only enabled when origins are configured.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let allowed_origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serves until the listener fails.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Shelf API listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
