//! Mock IdP server.

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use super::templates;
use crate::providers::{decode_mock_token, encode_mock_token, MockIdentity};

const SCRIPT_STUB: &str = "window.google = window.google || { accounts: { oauth2: {} } };\n";

#[derive(Deserialize)]
struct AuthorizeQuery {
    state: String,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct ConsentForm {
    email: String,
    name: Option<String>,
    state: String,
    redirect_uri: String,
    decision: String,
}

#[derive(Deserialize)]
struct TokenForm {
    email: String,
    name: Option<String>,
    #[serde(default)]
    deny: bool,
}

/// Mock IdP server.
pub struct MockIdpServer {
    port: u16,
}

/// A mock IdP running in the background. Stops when dropped.
pub struct MockIdpHandle {
    addr: SocketAddr,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl MockIdpHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("socket address forms a valid URL")
    }
}

impl Drop for MockIdpHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockIdpServer {
    /// Create a new mock IdP. Port 0 picks a free port.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    fn router() -> Router {
        Router::new()
            .route("/gsi/client", get(script))
            .route("/authorize", get(authorize))
            .route("/authorize/submit", post(authorize_submit))
            .route("/token", post(token))
            .route("/oauth2/v3/userinfo", get(userinfo))
    }

    async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        TcpListener::bind(addr).await
    }

    /// Run the mock IdP until the process stops.
    ///
    /// Handles:
    /// - `GET /gsi/client` - identity script stub
    /// - `GET /authorize` - consent page
    /// - `POST /authorize/submit` - consent form, redirects with the token in the fragment
    /// - `POST /token` - direct token issue for non-interactive clients
    /// - `GET /oauth2/v3/userinfo` - profile for a bearer token
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener = self.bind().await?;
        tracing::info!("Mock IdP server listening on http://{}", listener.local_addr()?);
        axum::serve(listener, Self::router()).await
    }

    /// Start in the background and return once the port is bound.
    pub async fn spawn(self) -> Result<MockIdpHandle, std::io::Error> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        tracing::debug!("Mock IdP server spawned on http://{}", addr);
        let task = tokio::spawn(async move { axum::serve(listener, Self::router()).await });
        Ok(MockIdpHandle { addr, task })
    }
}

async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        SCRIPT_STUB,
    )
        .into_response()
}

async fn authorize(Query(params): Query<AuthorizeQuery>) -> Html<String> {
    Html(templates::consent_page(&params.state, &params.redirect_uri))
}

async fn authorize_submit(Form(form): Form<ConsentForm>) -> Response {
    let state = urlencode(&form.state);

    let fragment = if form.decision == "deny" {
        format!("error=access_denied&state={}", state)
    } else {
        let token = encode_mock_token(&MockIdentity::new(&form.email, form.name.as_deref()));
        format!(
            "access_token={}&token_type=Bearer&expires_in=3599&state={}",
            token, state
        )
    };

    Redirect::to(&format!("{}#{}", form.redirect_uri, fragment)).into_response()
}

async fn token(Form(form): Form<TokenForm>) -> Response {
    if form.deny {
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "error": "access_denied" })),
        )
            .into_response();
    }

    let identity = MockIdentity::new(&form.email, form.name.as_deref());
    Json(serde_json::json!({
        "access_token": encode_mock_token(&identity),
        "token_type": "Bearer",
        "expires_in": 3599,
        "scope": "email profile",
    }))
    .into_response()
}

async fn userinfo(headers: HeaderMap) -> Response {
    let identity = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(decode_mock_token);

    match identity {
        Some(identity) => Json(serde_json::json!({
            "sub": identity.sub,
            "name": identity.name,
            "email": identity.email,
            "email_verified": true,
            "picture": identity.picture,
        }))
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid_token" })),
        )
            .into_response(),
    }
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
