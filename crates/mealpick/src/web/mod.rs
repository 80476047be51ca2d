//! HTTP surface: one page, two triggers.
//!
//! | Route             | Does                                              |
//! |-------------------|---------------------------------------------------|
//! | `GET /`           | render the page for the caller's session          |
//! | `POST /recommend` | store the submitted situation and ask for menus   |
//! | `POST /regenerate`| ask again with the stored situation               |
//! | `GET /health`     | liveness probe                                    |

pub mod page;
pub mod render;

use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Form, MatchedPath, Request, State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use mealpick_core::{MealpickClient, generic::GenericMessage, provider::ChatCompletionProvider};
use mealpick_types::form::FormRecord;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::Span;
use uuid::Uuid;

use crate::{
    error::AppError,
    flow::{Effect, Event, InterfaceState, TransitionError},
    session::{Session, SessionStore},
};
use page::{Outcome, Page};

pub const SESSION_COOKIE: &str = "mealpick_session";

pub struct AppState<B> {
    client: MealpickClient<B>,
    sessions: Arc<SessionStore>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<B> AppState<B> {
    pub fn new(client: MealpickClient<B>, sessions: SessionStore) -> Self {
        Self {
            client,
            sessions: Arc::new(sessions),
        }
    }
}

pub fn router<B>(state: AppState<B>) -> Router
where
    B: ChatCompletionProvider + 'static,
    GenericMessage: Into<B::Message>,
{
    Router::new()
        .route("/", get(index::<B>))
        .route("/recommend", post(recommend::<B>))
        .route("/regenerate", post(regenerate::<B>))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    if path == "/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        tracing::info!(
                            status = %response.status().as_u16(),
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    },
                ),
        )
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "mealpick" }))
}

async fn index<B>(State(state): State<AppState<B>>, headers: HeaderMap) -> Response
where
    B: ChatCompletionProvider + 'static,
{
    let (id, created) = state.sessions.resolve(session_cookie(&headers));

    let body = state.sessions.with_session(id, |session| {
        let outcome = match (&session.interface, &session.answer) {
            (InterfaceState::ResultShown, Some(answer)) => Outcome::Answer(answer.clone()),
            _ => Outcome::Empty,
        };
        render_page(session, &outcome)
    });

    with_cookie(Html(body).into_response(), id, created)
}

async fn recommend<B>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    form: Result<Form<FormRecord>, FormRejection>,
) -> Response
where
    B: ChatCompletionProvider + 'static,
    GenericMessage: Into<B::Message>,
{
    let (id, created) = state.sessions.resolve(session_cookie(&headers));

    let response = match form {
        Ok(Form(record)) => {
            let context = record.to_context();
            let dispatched = state.sessions.with_session(id, |session| {
                let effect = session.dispatch(Event::Submit(context))?;
                session.form = record;
                session.answer = None;
                Ok::<_, TransitionError>(effect)
            });
            run(&state, id, dispatched).await
        }
        Err(rejection) => AppError::from(rejection).into_response(),
    };

    with_cookie(response, id, created)
}

async fn regenerate<B>(State(state): State<AppState<B>>, headers: HeaderMap) -> Response
where
    B: ChatCompletionProvider + 'static,
    GenericMessage: Into<B::Message>,
{
    let (id, created) = state.sessions.resolve(session_cookie(&headers));

    let dispatched = state
        .sessions
        .with_session(id, |session| session.dispatch(Event::Regenerate));
    let response = run(&state, id, dispatched).await;

    with_cookie(response, id, created)
}

/// Carry out the effect of an accepted trigger and render the outcome.
async fn run<B>(
    state: &AppState<B>,
    id: Uuid,
    dispatched: Result<Effect, TransitionError>,
) -> Response
where
    B: ChatCompletionProvider + 'static,
    GenericMessage: Into<B::Message>,
{
    let prompt = match dispatched {
        Ok(Effect::CallCompletion(prompt)) => prompt,
        Ok(Effect::Render) => {
            let body = state
                .sessions
                .with_session(id, |session| render_page(session, &Outcome::Empty));
            return Html(body).into_response();
        }
        Err(err) => return AppError::from(err).into_response(),
    };

    tracing::info!(
        session = %id,
        regeneration = prompt.is_regeneration(),
        "requesting recommendation"
    );

    let in_flight = InFlight::new(Arc::clone(&state.sessions), id);

    match state.client.complete(prompt).await {
        Ok(answer) => {
            tracing::debug!(session = %id, chars = answer.chars().count(), "recommendation received");
            let body = in_flight.finish(Event::Completed, |session| {
                let body = render_page(session, &Outcome::Answer(answer.clone()));
                session.answer = Some(answer);
                body
            });
            Html(body).into_response()
        }
        Err(err) => {
            tracing::error!(session = %id, error = %err, "recommendation failed");
            let outcome = Outcome::Failed(err.to_string());
            let body = in_flight.finish(Event::Failed, |session| {
                session.answer = None;
                render_page(session, &outcome)
            });
            (StatusCode::BAD_GATEWAY, Html(body)).into_response()
        }
    }
}

fn render_page(session: &Session, outcome: &Outcome) -> String {
    Page {
        form: &session.form,
        can_regenerate: session.can_regenerate(),
        outcome,
    }
    .to_string()
}

/// Marks a session as `Requesting` for as long as it lives.
///
/// If the handler future is dropped mid-call (client went away), the
/// session is moved back to `Idle` so it does not stay busy forever.
struct InFlight {
    sessions: Arc<SessionStore>,
    id: Uuid,
    armed: bool,
}

impl InFlight {
    fn new(sessions: Arc<SessionStore>, id: Uuid) -> Self {
        Self {
            sessions,
            id,
            armed: true,
        }
    }

    fn finish<R>(mut self, event: Event, f: impl FnOnce(&mut Session) -> R) -> R {
        self.armed = false;
        self.sessions.with_session(self.id, |session| {
            if let Err(err) = session.dispatch(event) {
                tracing::warn!(session = %self.id, %err, "could not settle request");
            }
            f(session)
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(session = %self.id, "request abandoned before completion");
        let settled = self
            .sessions
            .with_session(self.id, |session| session.dispatch(Event::Failed));
        if let Err(err) = settled {
            tracing::warn!(session = %self.id, %err, "could not settle abandoned request");
        }
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|id| Uuid::parse_str(id.trim()).ok())
}

fn with_cookie(mut response: Response, id: Uuid, issue: bool) -> Response {
    if !issue {
        return response;
    }

    let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => tracing::warn!(%err, "could not build session cookie"),
    }
    response
}
