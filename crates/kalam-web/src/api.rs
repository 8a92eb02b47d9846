//! REST API endpoint handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kalam::mode::{GenerationRequest, Mode, ModeProfile, parse_word_limit};
use kalam::pipeline::{Generation, Generator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::session::{self, SessionState, SharedSession};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub generator: Generator,
    pub session: SharedSession,
}

/// Error body for rejected requests.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// One entry of GET /api/modes.
#[derive(Serialize, Debug)]
pub struct ModeInfo {
    pub mode: Mode,
    #[serde(flatten)]
    pub profile: ModeProfile,
}

/// GET /api/modes — Modes in display order with their presentation copy.
pub async fn get_modes() -> Json<Vec<ModeInfo>> {
    Json(
        Mode::ALL
            .into_iter()
            .map(|mode| ModeInfo {
                mode,
                profile: mode.profile(),
            })
            .collect(),
    )
}

/// GET /api/state — Loading flag and the last finished output.
pub async fn get_state(State(app): State<AppState>) -> Json<SessionState> {
    Json(session::snapshot(&app.session))
}

/// Request body for POST /api/generate.
#[derive(Deserialize, Debug)]
pub struct GenerateBody {
    pub mode: Mode,
    pub input: String,
    /// Word-limit field exactly as typed; blank means no limit.
    #[serde(default)]
    pub word_limit: Option<String>,
}

/// POST /api/generate — Run one submission.
///
/// Returns 400 for blank input or an unreadable word limit, 409 while another
/// generation is running, and 200 with the generation otherwise. Completion
/// and parse failures are part of a 200 response's display text.
pub async fn post_generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<Generation>, ApiError> {
    let word_limit = match body.word_limit.as_deref() {
        Some(raw) => parse_word_limit(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => None,
    };
    let request = GenerationRequest::new(body.mode, body.input, word_limit)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    let Some(slot) = session::try_begin(&app.session) else {
        debug!("Rejected {} generation: another is in flight", request.mode);
        return Err(api_error(
            StatusCode::CONFLICT,
            "a generation is already in progress",
        ));
    };

    info!("Generating {} output", request.mode);
    let generation = app.generator.generate(&request).await;
    slot.finish(&generation);

    Ok(Json(generation))
}
