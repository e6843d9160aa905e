use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{elevated, protected, public, tenant};
use crate::middleware::{resolve_agent_middleware, resolve_tenant_middleware};
use crate::state::AppState;

/// Full router: public routes, host-resolved tenant routes and agent routes.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(tenant_routes(&state))
        .merge(agent_routes(&state))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    use public::{i18n, qr, system, templates};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/templates/bookings.csv", get(templates::bookings_template))
        .route("/api/qr", get(qr::voucher_qr))
        .route("/api/i18n/:locale", get(i18n::catalog))
}

fn tenant_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/tenant", get(tenant::tenant_get))
        .route_layer(from_fn_with_state(state.clone(), resolve_tenant_middleware))
}

fn agent_routes(state: &AppState) -> Router<AppState> {
    use elevated::agents;
    use protected::{agent, bookings, leads, locator, training, transport, vouchers};

    Router::new()
        .route("/api/agent", get(agent::agent_get))
        .route("/api/agents", get(agents::agents_list))
        .route("/api/bookings", get(bookings::bookings_list).post(bookings::bookings_create))
        .route("/api/bookings/:id/invoice", get(bookings::booking_invoice))
        .route("/api/vouchers", get(vouchers::vouchers_list).post(vouchers::vouchers_create))
        .route("/api/transport", get(transport::transport_list).post(transport::transport_create))
        .route("/api/transport/:id", axum::routing::patch(transport::transport_update))
        .route("/api/locator", get(locator::locator_list).post(locator::locator_create))
        .route("/api/training", get(training::training_list))
        .route("/api/leads", get(leads::leads_list).post(leads::leads_create))
        .route("/api/leads/:id", axum::routing::patch(leads::leads_update))
        .route_layer(from_fn_with_state(state.clone(), resolve_agent_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.security.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
