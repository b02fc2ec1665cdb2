pub mod auth;
pub mod client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod validation;
pub mod views;
pub mod week;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use handlers::{class_detail, healthz_live, healthz_ready, landing, login_page, logout, submit_login};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

use crate::client::ApiClient;
use crate::schedule::TimeFormatter;
use crate::session::CookieSessionStore;
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) api: ApiClient,
    pub(crate) formatter: TimeFormatter,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let formatter = TimeFormatter::new(settings.tz()?, &settings.time_format)?;
        let api = ApiClient::new(settings.api_url.as_deref());
        Ok(Self {
            settings,
            api,
            formatter,
        })
    }

    pub(crate) fn session(&self, jar: CookieJar) -> CookieSessionStore {
        CookieSessionStore::new(jar, self.settings.secure_cookie)
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings)?;
    if !state.api.is_configured() {
        warn!("APP_API_URL is missing or invalid; pages will show a configuration error");
    }

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Iron Fit on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/", get(login_page).post(submit_login))
        .route("/logout", post(logout))
        .route("/landing", get(landing))
        .route("/class/{id}", get(class_detail))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .with_state(state)
        .layer(trace_layer)
}
