//! JSON-RPC module for daemon communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `get_songs`: One catalog page
//! - `get_audio`: Render a clip to WAV
//! - `get_cover`: Render a cover to SVG
//! - `export`: Write every clip of a page
//! - `random_seed`: Suggest a fresh seed
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown
//!
//! Notifications:
//! - `export_progress`: One per file written during `export`

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{run_server, send_notification, ServerState};
pub use types::{
    ExportParams, ExportProgressParams, ExportResult, GetAudioParams, GetAudioResult,
    GetCoverResult, GetSongsParams, JsonRpcError, JsonRpcErrorResponse, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, RandomSeedResult, RequestId, SeedParam,
};
