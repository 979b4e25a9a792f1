//! Client-side game session lifecycle.
//!
//! The controller owns everything the UI shows about a run: status, the
//! latest render, and the reward and step counters. Responses carry an epoch
//! and sequence number so an answer from a superseded session, or one that
//! arrives behind a newer answer, can never overwrite fresher state.

use engine::scene::{GameId, GameScene};
use serde_json::Value;

use crate::backend::BackendClient;
use crate::protocol::{BackendState, RenderPayload, StartRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Starting,
    Playing,
    Ended,
}

/// What the canvas should show for the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderView {
    Empty,
    /// Base64 PNG straight from the backend.
    Frame(String),
    Scene(GameScene),
}

fn view_from_state(state: &BackendState) -> RenderView {
    match &state.render {
        Some(RenderPayload::Scene { scene }) => RenderView::Scene(scene.clone()),
        Some(RenderPayload::Frame { frame }) => frame
            .as_ref()
            .or(state.frame.as_ref())
            .map(|f| RenderView::Frame(f.clone()))
            .unwrap_or(RenderView::Empty),
        None => state
            .frame
            .as_ref()
            .map(|f| RenderView::Frame(f.clone()))
            .unwrap_or(RenderView::Empty),
    }
}

#[derive(Debug)]
pub struct SessionController {
    client: BackendClient,
    game: GameId,
    status: SessionStatus,
    session_id: Option<String>,
    view: RenderView,
    total_reward: f64,
    step_count: u64,
    epoch: u64,
    next_seq: u64,
    applied_seq: u64,
}

impl SessionController {
    pub fn new(client: BackendClient, game: GameId) -> Self {
        Self {
            client,
            game,
            status: SessionStatus::Idle,
            session_id: None,
            view: RenderView::Empty,
            total_reward: 0.0,
            step_count: 0,
            epoch: 0,
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn game(&self) -> GameId {
        self.game
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn view(&self) -> &RenderView {
        &self.view
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Starts a fresh session. On success the previous session is discarded
    /// wholesale; on failure the controller drops to `Idle` with no session
    /// at all rather than keeping a half-replaced one.
    pub async fn start(&mut self, config: Value) {
        self.status = SessionStatus::Starting;

        let request = StartRequest {
            env_id: self.game.to_string(),
            config,
        };
        match self.client.start(&request).await {
            Ok(response) => {
                self.epoch += 1;
                self.next_seq = 0;
                self.applied_seq = 0;
                self.session_id = Some(response.session_id);
                self.total_reward = 0.0;
                self.step_count = 0;
                self.view = view_from_state(&response.state);
                self.status = if response.state.is_terminal() {
                    SessionStatus::Ended
                } else {
                    SessionStatus::Playing
                };
            }
            Err(err) => {
                eprintln!("start {} failed: {err}", self.game);
                self.epoch += 1;
                self.session_id = None;
                self.status = SessionStatus::Idle;
            }
        }
    }

    /// Sends one action. Silently a no-op unless a session is playing; a
    /// transport failure logs and leaves all counters untouched.
    pub async fn step(&mut self, action: i32) {
        if self.status != SessionStatus::Playing {
            return;
        }
        let Some(session_id) = self.session_id.clone() else {
            return;
        };

        let epoch = self.epoch;
        self.next_seq += 1;
        let seq = self.next_seq;

        match self.client.step(&session_id, action).await {
            Ok(state) => {
                if epoch != self.epoch || seq <= self.applied_seq {
                    return;
                }
                self.applied_seq = seq;
                self.step_count += 1;
                self.total_reward += state.reward.unwrap_or(0.0);
                self.view = view_from_state(&state);
                if state.is_terminal() {
                    self.status = SessionStatus::Ended;
                }
            }
            Err(err) => {
                eprintln!("step {} failed: {err}", self.game);
            }
        }
    }
}
