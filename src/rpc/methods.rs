//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods.

use log::debug;
use serde::de::DeserializeOwned;

use crate::audio::write_wav;
use crate::catalog::build_page;
use crate::cover::{render_cover, CoverSpec};
use crate::export::{export_page, render_clip, sanitize_component};
use crate::rng::random_seed;

use super::server::{send_notification, ServerState};
use super::types::{
    ExportParams, ExportProgressParams, ExportResult, GetAudioParams, GetAudioResult,
    GetCoverResult, GetSongsParams, JsonRpcError, RandomSeedResult,
};

/// Handles a JSON-RPC method call.
pub fn handle_request(
    method: &str,
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    match method {
        "get_songs" => handle_get_songs(params, state),
        "get_audio" => handle_get_audio(params, state),
        "get_cover" => handle_get_cover(params),
        "export" => handle_export(params, state, |progress| {
            send_notification("export_progress", progress)
        }),
        "random_seed" => handle_random_seed(),
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Deserializes method params; absent params mean all defaults.
fn parse_params<T: DeserializeOwned + Default>(
    params: serde_json::Value,
) -> Result<T, JsonRpcError> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_value<T: serde::Serialize>(result: T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Handles the ping method for health checks.
fn handle_ping() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

/// Handles the get_songs method: one catalog page.
fn handle_get_songs(
    params: serde_json::Value,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: GetSongsParams = parse_params(params)?;
    let request = params.into_request(&state.config);
    let page = build_page(&state.lexicon, &request.locale, &request.params())?;
    to_value(page)
}

/// Handles the get_audio method: synthesizes a clip and writes it as WAV.
///
/// The file is named after the clip's artifact ID, so repeated requests for
/// the same clip overwrite it with identical bytes.
fn handle_get_audio(
    params: serde_json::Value,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: GetAudioParams = parse_params(params)?;
    let audio = params.into_audio_ref(&state.config)?;
    let artifact_id = audio.artifact_id();

    let pcm = render_clip(&audio);
    let wav = pcm.to_wav()?;

    let path = state
        .config
        .effective_output_path()
        .join(format!("{}.wav", artifact_id));
    write_wav(&wav, &path)?;

    debug!(
        "Rendered clip {} (seed {}, page {}, index {}) to {}",
        artifact_id,
        audio.seed,
        audio.page,
        audio.index,
        path.display()
    );

    to_value(GetAudioResult {
        artifact_id,
        path: path.to_string_lossy().to_string(),
        samples: pcm.len(),
        sample_rate: pcm.sample_rate(),
        duration_sec: pcm.duration_sec(),
        bytes: wav.len(),
    })
}

/// Handles the get_cover method: renders an SVG cover.
fn handle_get_cover(params: serde_json::Value) -> Result<serde_json::Value, JsonRpcError> {
    let spec: CoverSpec = parse_params(params)?;
    to_value(GetCoverResult {
        svg: render_cover(&spec),
    })
}

/// Handles the export method: writes every clip of a page.
///
/// `notify` receives one progress update per written file.
fn handle_export<F>(
    params: serde_json::Value,
    state: &ServerState,
    mut notify: F,
) -> Result<serde_json::Value, JsonRpcError>
where
    F: FnMut(ExportProgressParams),
{
    let params: ExportParams = parse_params(params)?;
    let request = params.into_request(&state.config);

    let dir = match request.dir {
        Some(ref dir) => dir.clone(),
        None => state.config.effective_output_path().join(format!(
            "songs_{}_{}",
            sanitize_component(&request.seed),
            request.params().page
        )),
    };

    let files = export_page(&state.lexicon, &request, &dir, |done, total, file| {
        notify(ExportProgressParams {
            done,
            total,
            index: file.index,
            name: file.name.clone(),
            path: file.path.to_string_lossy().to_string(),
        })
    })?;

    to_value(ExportResult {
        dir: dir.to_string_lossy().to_string(),
        files,
    })
}

/// Handles the random_seed method.
fn handle_random_seed() -> Result<serde_json::Value, JsonRpcError> {
    to_value(RandomSeedResult {
        seed: random_seed(),
    })
}
