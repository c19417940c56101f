//! JSON-RPC types for the daemon protocol.
//!
//! Envelopes, error objects, method parameters and results, and the
//! notifications the daemon emits.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::PageRequest;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, ErrorCode};
use crate::export::{ExportRequest, ExportedFile, DEFAULT_EXPORT_SIZE};
use crate::types::AudioRef;

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    /// Creates an invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a locale not found error (-32000).
    pub fn locale_not_found(details: impl Into<String>) -> Self {
        Self::application(-32000, ErrorCode::LocaleNotFound, details)
    }

    /// Creates a locale invalid error (-32001).
    pub fn locale_invalid(details: impl Into<String>) -> Self {
        Self::application(-32001, ErrorCode::LocaleInvalid, details)
    }

    /// Creates an invalid audio reference error (-32002).
    pub fn invalid_audio_ref(details: impl Into<String>) -> Self {
        Self::application(-32002, ErrorCode::InvalidAudioRef, details)
    }

    /// Creates an output failed error (-32003).
    pub fn output_failed(details: impl Into<String>) -> Self {
        Self::application(-32003, ErrorCode::OutputFailed, details)
    }

    fn application(code: i32, error_code: ErrorCode, details: impl Into<String>) -> Self {
        Self {
            code,
            message: error_code.description().to_string(),
            data: Some(JsonRpcErrorData {
                error_code: error_code.as_str().to_string(),
                details: Some(details.into()),
            }),
        }
    }
}

impl From<CatalogError> for JsonRpcError {
    fn from(err: CatalogError) -> Self {
        match err.code {
            ErrorCode::LocaleNotFound => JsonRpcError::locale_not_found(err.message),
            ErrorCode::LocaleInvalid => JsonRpcError::locale_invalid(err.message),
            ErrorCode::InvalidAudioRef => JsonRpcError::invalid_audio_ref(err.message),
            ErrorCode::OutputFailed => JsonRpcError::output_failed(err.message),
        }
    }
}

// ============================================================================
// Method parameters
// ============================================================================

/// A seed as sent by a client: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeedParam {
    Number(serde_json::Number),
    Text(String),
}

impl SeedParam {
    /// The seed as text, the form every generator entry point takes.
    pub fn into_text(self) -> String {
        match self {
            SeedParam::Number(n) => n.to_string(),
            SeedParam::Text(s) => s,
        }
    }
}

fn seed_text(seed: Option<SeedParam>) -> String {
    seed.map(SeedParam::into_text)
        .unwrap_or_else(|| "1".to_string())
}

/// Parameters for `get_songs`. Unset fields take the configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetSongsParams {
    #[serde(alias = "locale")]
    pub lang: Option<String>,
    pub seed: Option<SeedParam>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(alias = "likesAvg")]
    pub likes: Option<f64>,
}

impl GetSongsParams {
    pub fn into_request(self, config: &CatalogConfig) -> PageRequest {
        PageRequest {
            locale: self.lang.unwrap_or_else(|| config.default_locale.clone()),
            seed: seed_text(self.seed),
            page: self.page.unwrap_or(1),
            page_size: self
                .page_size
                .unwrap_or(i64::from(config.default_page_size)),
            likes: self.likes.unwrap_or(config.default_likes),
        }
    }
}

/// Parameters for `get_audio`: either an `audioUrl` or explicit fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAudioParams {
    pub audio_url: Option<String>,
    pub seed: Option<SeedParam>,
    pub page: Option<u64>,
    pub index: Option<u64>,
    pub seconds: Option<u32>,
}

impl GetAudioParams {
    /// Resolves the parameters into an audio reference.
    pub fn into_audio_ref(self, config: &CatalogConfig) -> Result<AudioRef, JsonRpcError> {
        if let Some(url) = self.audio_url {
            return AudioRef::parse(&url).map_err(JsonRpcError::from);
        }
        Ok(AudioRef::new(
            seed_text(self.seed),
            self.page.unwrap_or(1),
            self.index.unwrap_or(1),
            self.seconds.unwrap_or(config.default_seconds),
        ))
    }
}

/// Parameters for `export`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportParams {
    #[serde(alias = "locale")]
    pub lang: Option<String>,
    pub seed: Option<SeedParam>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub likes: Option<f64>,
    pub dir: Option<PathBuf>,
}

impl ExportParams {
    pub fn into_request(self, config: &CatalogConfig) -> ExportRequest {
        ExportRequest {
            locale: self.lang.unwrap_or_else(|| config.default_locale.clone()),
            seed: seed_text(self.seed),
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_EXPORT_SIZE),
            likes: self.likes.unwrap_or(config.default_likes),
            dir: self.dir,
        }
    }
}

// ============================================================================
// Method results
// ============================================================================

/// Response for `get_audio`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAudioResult {
    /// Stable identifier derived from seed, page, index and duration.
    pub artifact_id: String,
    /// Absolute path to the written WAV file.
    pub path: String,
    pub samples: usize,
    pub sample_rate: u32,
    pub duration_sec: f32,
    /// Size of the WAV file in bytes.
    pub bytes: usize,
}

/// Response for `get_cover`.
#[derive(Debug, Serialize)]
pub struct GetCoverResult {
    pub svg: String,
}

/// Response for `export`.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub dir: String,
    pub files: Vec<ExportedFile>,
}

/// Response for `random_seed`.
#[derive(Debug, Serialize)]
pub struct RandomSeedResult {
    pub seed: String,
}

// ============================================================================
// Notifications
// ============================================================================

/// A JSON-RPC notification (no id field).
#[derive(Debug, Serialize)]
pub struct JsonRpcNotification<T: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: T,
}

impl<T: Serialize> JsonRpcNotification<T> {
    pub fn new(method: &'static str, params: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

/// Progress notification sent after each exported file.
#[derive(Debug, Serialize)]
pub struct ExportProgressParams {
    /// Files written so far.
    pub done: usize,
    /// Files in the export.
    pub total: usize,
    /// Global catalog index of the entry just written.
    pub index: u64,
    pub name: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_id_from_int() {
        let id: RequestId = 42.into();
        assert_eq!(id, RequestId::Integer(42));
    }

    #[test]
    fn request_id_from_string() {
        let id: RequestId = "abc".to_string().into();
        assert_eq!(id, RequestId::String("abc".to_string()));
    }

    #[test]
    fn json_rpc_error_codes() {
        assert_eq!(JsonRpcError::parse_error("").code, -32700);
        assert_eq!(JsonRpcError::invalid_request("").code, -32600);
        assert_eq!(JsonRpcError::method_not_found("").code, -32601);
        assert_eq!(JsonRpcError::invalid_params("").code, -32602);
        assert_eq!(JsonRpcError::internal_error("").code, -32603);
        assert_eq!(JsonRpcError::locale_not_found("").code, -32000);
        assert_eq!(JsonRpcError::locale_invalid("").code, -32001);
        assert_eq!(JsonRpcError::invalid_audio_ref("").code, -32002);
        assert_eq!(JsonRpcError::output_failed("").code, -32003);
    }

    #[test]
    fn catalog_errors_map_to_application_codes() {
        let err: JsonRpcError = CatalogError::locale_not_found("xx-XX").into();
        assert_eq!(err.code, -32000);
        let data = err.data.unwrap();
        assert_eq!(data.error_code, "LOCALE_NOT_FOUND");
        assert!(data.details.unwrap().contains("xx-XX"));

        let err: JsonRpcError = CatalogError::invalid_audio_ref("x", "missing seed").into();
        assert_eq!(err.code, -32002);
    }

    #[test]
    fn seed_accepts_numbers_and_strings() {
        let params: GetSongsParams = serde_json::from_value(json!({"seed": 42})).unwrap();
        assert_eq!(params.into_request(&CatalogConfig::default()).seed, "42");

        let params: GetSongsParams = serde_json::from_value(json!({"seed": -7})).unwrap();
        assert_eq!(params.into_request(&CatalogConfig::default()).seed, "-7");

        let params: GetSongsParams = serde_json::from_value(json!({"seed": "0xBEEF"})).unwrap();
        assert_eq!(params.into_request(&CatalogConfig::default()).seed, "0xBEEF");

        let params: GetSongsParams =
            serde_json::from_value(json!({"seed": 18446744073709551615u64})).unwrap();
        assert_eq!(
            params.into_request(&CatalogConfig::default()).seed,
            "18446744073709551615"
        );
    }

    #[test]
    fn get_songs_defaults_from_config() {
        let config = CatalogConfig {
            default_locale: "de-DE".into(),
            default_page_size: 5,
            default_likes: 1.0,
            ..CatalogConfig::default()
        };
        let request = GetSongsParams::default().into_request(&config);
        assert_eq!(request.locale, "de-DE");
        assert_eq!(request.seed, "1");
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 5);
        assert_eq!(request.likes, 1.0);

        let params: GetSongsParams =
            serde_json::from_value(json!({"lang": "en-US", "pageSize": 3, "page": 4})).unwrap();
        let request = params.into_request(&config);
        assert_eq!(request.locale, "en-US");
        assert_eq!(request.page_size, 3);
        assert_eq!(request.page, 4);
    }

    #[test]
    fn get_audio_from_url_or_fields() {
        let config = CatalogConfig::default();

        let params: GetAudioParams = serde_json::from_value(json!({
            "audioUrl": "/api/audio.wav?seed=0x10&page=3&index=41&seconds=10"
        }))
        .unwrap();
        assert_eq!(
            params.into_audio_ref(&config).unwrap(),
            AudioRef::new("0x10", 3, 41, 10)
        );

        let params: GetAudioParams =
            serde_json::from_value(json!({"seed": 5, "index": 2, "seconds": 3})).unwrap();
        assert_eq!(
            params.into_audio_ref(&config).unwrap(),
            AudioRef::new("5", 1, 2, 3)
        );

        let params: GetAudioParams =
            serde_json::from_value(json!({"audioUrl": "/api/audio.wav?seed=1"})).unwrap();
        assert_eq!(params.into_audio_ref(&config).unwrap_err().code, -32002);
    }

    #[test]
    fn export_params_default_page_size() {
        let params: ExportParams = serde_json::from_value(json!({"seed": "9"})).unwrap();
        let request = params.into_request(&CatalogConfig::default());
        assert_eq!(request.page_size, 10);
        assert_eq!(request.seed, "9");
        assert!(request.dir.is_none());
    }

    #[test]
    fn audio_result_serializes_camel_case() {
        let result = GetAudioResult {
            artifact_id: "abc".into(),
            path: "/tmp/abc.wav".into(),
            samples: 44_100,
            sample_rate: 44_100,
            duration_sec: 1.0,
            bytes: 88_244,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["artifactId"], "abc");
        assert_eq!(value["sampleRate"], 44_100);
        assert_eq!(value["durationSec"], 1.0);
    }
}
