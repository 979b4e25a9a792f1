//! Wire types for the game backend's HTTP API.

use engine::scene::GameScene;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub env_id: String,
    pub config: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResponse {
    pub session_id: String,
    pub state: BackendState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRequest {
    pub action: i32,
}

/// One observation from the backend. Every field is optional; older
/// backends report a bare base64 frame instead of a `render` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderPayload>,
}

impl BackendState {
    pub fn is_terminal(&self) -> bool {
        self.done.unwrap_or(false) || self.truncated.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RenderPayload {
    Frame {
        #[serde(default)]
        frame: Option<String>,
    },
    Scene {
        scene: GameScene,
    },
}
