//! Request handlers and the route table.
//!
//! Each handler is a thin shell around [`SessionManager`]: it pulls the
//! `Cookie` headers out of the request, asks the session layer what to
//! do, and turns the answer into a page, a redirect, or a `Set-Cookie`.
//!
//! ```text
//! GET  /, /index.html  resolve → greeting | 302 /login
//! GET  /login          login form
//! POST /login          login(name) → 302 / + Set-Cookie | 400 + form
//! GET  /logout         logout → logged-out page + expired Set-Cookie
//! GET  /time           resolve → clock (personalized when known)
//! *                    404 page
//! ```

use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use greeter_session::{MAX_NAME_LEN, SessionError, SessionManager, Visitor};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::templates::{self, Templates};
use crate::GreeterError;

/// Shown above the login form after a rejected name.
pub const NAME_PROMPT: &str =
    "Please enter your first and last name, e.g. \"Jane Doe\".";

/// `strftime` layout for the clock page, e.g. `3:04:05 PM`.
const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Shared state handed to every handler.
///
/// Cloned per request by axum; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub templates: Arc<Templates>,
}

/// Form field carrying the visitor's name.
const NAME_FIELD: &str = "name";

/// Builds the application router.
///
/// When `static_dir` is given, its files are served under `/static`.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", get(logout))
        .route("/time", get(time));

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// All `Cookie` header values on the request.
fn cookie_headers(headers: &HeaderMap) -> impl Iterator<Item = &str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
}

fn log_request(msg: &str, method: &Method, uri: &Uri) {
    tracing::info!(%method, %uri, "{msg}");
}

/// `GET /`: greet a known visitor, send everyone else to the login form.
async fn index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, GreeterError> {
    log_request("default handler called", &method, &uri);

    match state.sessions.resolve(cookie_headers(&headers)) {
        Visitor::Authenticated(identity) => {
            let name = identity.display_name.as_str();
            let body = state.templates.render(templates::GREETINGS, &[("name", name)])?;
            Ok(Html(body).into_response())
        }
        Visitor::Anonymous => {
            tracing::debug!("no session, redirecting to login");
            Ok((StatusCode::FOUND, [(LOCATION, "/login")]).into_response())
        }
    }
}

/// The first `name` value of a submitted login form.
///
/// Repeated fields are allowed (the first wins). An unreadable body
/// (wrong content type, bad encoding) counts as an empty name.
fn submitted_name(form: Result<Form<Vec<(String, String)>>, FormRejection>) -> String {
    match form {
        Ok(Form(fields)) => fields
            .into_iter()
            .find(|(key, _)| key == NAME_FIELD)
            .map(|(_, value)| value)
            .unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable login form");
            String::new()
        }
    }
}

/// Cuts `s` down to at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}

/// `GET /login`: the empty login form. Touches no session state.
async fn login_form(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, GreeterError> {
    log_request("login handler called", &method, &uri);
    let body = state.templates.render(templates::LOGIN, &[])?;
    Ok(Html(body).into_response())
}

/// `POST /login`: validate the name, start a session, go home.
async fn login_submit(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, GreeterError> {
    log_request("login submitted", &method, &uri);

    match state.sessions.login(&submitted_name(form)) {
        Ok(outcome) => Ok((
            StatusCode::FOUND,
            [
                (LOCATION, "/".to_string()),
                (SET_COOKIE, outcome.cookie.to_header_value()),
            ],
        )
            .into_response()),
        Err(SessionError::InvalidName(candidate)) => {
            let candidate = truncate_chars(&candidate, MAX_NAME_LEN);
            tracing::debug!(name = %candidate, "rejected display name");
            let body = state.templates.render(
                templates::LOGIN,
                &[("prompt", NAME_PROMPT), ("name", candidate)],
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(body)).into_response())
        }
    }
}

/// `GET /logout`: expire the cookie and say goodbye.
async fn logout(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, GreeterError> {
    log_request("logout handler called", &method, &uri);

    let cookie = state.sessions.logout(cookie_headers(&headers));
    let body = state.templates.render(templates::LOGGED_OUT, &[])?;
    Ok(([(SET_COOKIE, cookie.to_header_value())], Html(body)).into_response())
}

/// `GET /time`: the current time, with the visitor's name if known.
async fn time(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, GreeterError> {
    log_request("time handler called", &method, &uri);

    let visitor = state.sessions.resolve(cookie_headers(&headers));
    let now = chrono::Local::now().format(TIME_FORMAT).to_string();
    let salutation = visitor
        .display_name()
        .map(|name| format!(", {name}"))
        .unwrap_or_default();

    let body = state.templates.render(
        templates::TIME,
        &[("time", now.as_str()), ("salutation", salutation.as_str())],
    )?;
    Ok(Html(body).into_response())
}

async fn not_found(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, GreeterError> {
    log_request("not found handler called", &method, &uri);
    let body = state
        .templates
        .render(templates::NOT_FOUND, &[("path", uri.path())])?;
    Ok((StatusCode::NOT_FOUND, Html(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_unchanged() {
        assert_eq!(truncate_chars("Jane Doe", MAX_NAME_LEN), "Jane Doe");
    }

    #[test]
    fn test_truncate_chars_cuts_on_char_boundary() {
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }

    #[test]
    fn test_submitted_name_first_value_wins() {
        let fields = vec![
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "Jane Doe".to_string()),
            ("name".to_string(), "John Roe".to_string()),
        ];

        assert_eq!(submitted_name(Ok(Form(fields))), "Jane Doe");
    }

    #[test]
    fn test_submitted_name_missing_field_is_empty() {
        assert_eq!(submitted_name(Ok(Form(Vec::new()))), "");
    }
}
