use crate::generator::PasswordGenerator;
use crate::models::{ErrorResponse, GenerateForm, GenerationParams, PasswordResponse};
use anyhow::{Context, Result};
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn};

#[derive(Clone)]
struct WebState {
    generator: Arc<PasswordGenerator>,
    defaults: Arc<GenerationParams>,
}

pub fn router(generator: PasswordGenerator, defaults: GenerationParams) -> Router {
    let state = WebState {
        generator: Arc::new(generator),
        defaults: Arc::new(defaults),
    };

    Router::new()
        .route("/", post(handle_generate))
        .route("/generate", post(handle_generate))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listener on {addr}"))?;
    info!(?addr, "password server listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("password server exited")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}

/// Generation fields from either an urlencoded or a multipart body.
struct GenerateRequest(GenerateForm);

impl<S> FromRequest<S> for GenerateRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<GenerateForm>::from_request(req, state)
                .await
                .map_err(|e| json_error(e.status(), e.body_text()))?;
            return Ok(GenerateRequest(form));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| json_error(e.status(), e.body_text()))?;

        let mut form = GenerateForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| json_error(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| json_error(e.status(), e.body_text()))?;
            form.set_field(&name, value);
        }
        Ok(GenerateRequest(form))
    }
}

fn json_error(status: StatusCode, message: String) -> Response {
    debug!(%status, %message, "rejecting request");
    (status, Json(ErrorResponse { error: message })).into_response()
}

async fn handle_generate(
    State(state): State<WebState>,
    GenerateRequest(form): GenerateRequest,
) -> Response {
    if !form.wants_generate() {
        debug!(action = ?form.action, "ignoring request");
        return json_error(StatusCode::BAD_REQUEST, "unsupported action".to_string());
    }

    let params = GenerationParams::from_form(&form, &state.defaults);

    // reading the word list touches the filesystem
    let generator = Arc::clone(&state.generator);
    let outcome = tokio::task::spawn_blocking(move || generator.generate(&params)).await;

    // failures still answer 200 with the message in place of a password
    let password = match outcome {
        Ok(Ok(password)) => password,
        Ok(Err(err)) => {
            warn!(error = %err, "password generation failed");
            format!("Error: {}", err)
        }
        Err(err) => {
            warn!(error = %err, "password generation task failed");
            "Error: Generation failed".to_string()
        }
    };

    Json(PasswordResponse { password }).into_response()
}
