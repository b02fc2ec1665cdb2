use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    AppState,
    auth::{self, Gate, guard},
    error::View,
    models::ClassView,
    schedule::normalize,
    session::SessionStore,
    validation::safe_redirect_target,
    views,
    week::{Week, day_range, today_in},
};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub day: Option<String>,
}

fn requested(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    let store = state.session(jar);
    if store.is_active() {
        return Redirect::to(safe_redirect_target(query.from.as_deref())).into_response();
    }
    Html(views::login_page(None, "", query.from.as_deref())).into_response()
}

pub async fn submit_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut store = state.session(jar);
    match auth::login(&state.api, &mut store, &form.username, &form.password).await {
        Ok(()) => {
            let target = safe_redirect_target(form.from.as_deref());
            (store.into_jar(), Redirect::to(target)).into_response()
        }
        Err(err) => {
            warn!(kind = ?err.kind(), "login failed: {err}");
            let message = err.display_message(View::Login);
            (
                err.status(View::Login),
                Html(views::login_page(
                    Some(message.as_str()),
                    &form.username,
                    form.from.as_deref(),
                )),
            )
                .into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut store = state.session(jar);
    store.clear();
    info!("session cleared");
    (store.into_jar(), Redirect::to(auth::LOGIN_PATH)).into_response()
}

pub async fn landing(
    State(state): State<AppState>,
    jar: CookieJar,
    uri: Uri,
    Query(query): Query<ScheduleQuery>,
) -> Response {
    let store = state.session(jar);
    if let Gate::Redirect { from } = guard(&store, requested(&uri)) {
        return Redirect::to(&Gate::login_location(&from)).into_response();
    }

    let tz = state.formatter.tz();
    let week = Week::containing(today_in(tz));
    let selected = week.select(query.day.as_deref()).clone();
    let (from, to) = day_range(tz, selected.date);
    let client_id = store.get();

    match state.api.list_classes(&from, &to, client_id.as_deref()).await {
        Ok(records) => {
            let classes: Vec<ClassView> = records
                .iter()
                .map(|record| normalize(record, &state.formatter))
                .collect();
            info!(day = selected.key, count = classes.len(), "schedule loaded");
            Html(views::schedule_page(&week, &selected, Ok(classes.as_slice()))).into_response()
        }
        Err(err) => {
            warn!(kind = ?err.kind(), day = selected.key, "schedule failed: {err}");
            let message = err.display_message(View::Schedule);
            (
                err.status(View::Schedule),
                Html(views::schedule_page(&week, &selected, Err(message.as_str()))),
            )
                .into_response()
        }
    }
}

pub async fn class_detail(
    State(state): State<AppState>,
    jar: CookieJar,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    let store = state.session(jar);
    if let Gate::Redirect { from } = guard(&store, requested(&uri)) {
        return Redirect::to(&Gate::login_location(&from)).into_response();
    }

    let client_id = store.get();
    match state.api.class_detail(&id, client_id.as_deref()).await {
        Ok(detail) => {
            let view = detail
                .class
                .as_ref()
                .map(|record| normalize(record, &state.formatter));
            info!(class_id = %id, participants = detail.participants.len(), "class loaded");
            let page = views::class_page(Ok(view
                .as_ref()
                .map(|view| (view, detail.participants.as_slice()))));
            Html(page).into_response()
        }
        Err(err) => {
            warn!(kind = ?err.kind(), class_id = %id, "class detail failed: {err}");
            let message = err.display_message(View::ClassDetail);
            (
                err.status(View::ClassDetail),
                Html(views::class_page(Err(message.as_str()))),
            )
                .into_response()
        }
    }
}
