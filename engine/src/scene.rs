//! Typed snapshots of the backend's per-game scenes.
//!
//! Field names follow the backend's wire format (camelCase) exactly; these
//! types are deserialized straight out of `render.scene` payloads.

use serde::{Deserialize, Serialize};

/// Closed set of games the client knows how to drive and draw.
///
/// The serialized form doubles as the backend `env_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Snake,
    Tetris,
    Doudizhu,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Snake, GameId::Tetris, GameId::Doudizhu];

    pub fn as_str(self) -> &'static str {
        match self {
            GameId::Snake => "Snake",
            GameId::Tetris => "Tetris",
            GameId::Doudizhu => "Doudizhu",
        }
    }

    pub fn parse(s: &str) -> Option<GameId> {
        GameId::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

/// `[x, y]` cell coordinate as the backend sends it.
pub type GridPoint = [i32; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeScene {
    pub grid: GridSize,
    pub snake: Vec<GridPoint>,
    pub food: GridPoint,
    pub score: i64,
    pub direction: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePiece {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: i32,
    pub cells: Vec<GridPoint>,
    pub x: i32,
    pub y: i32,
    pub rotation: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePreview {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: i32,
    pub cells: Vec<GridPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TetrisScene {
    pub grid: GridSize,
    /// Row-major; `-1` is empty, `0..=6` index the piece palette.
    pub board: Vec<Vec<i8>>,
    pub current_piece: ActivePiece,
    pub ghost_cells: Vec<GridPoint>,
    pub next_piece: PiecePreview,
    #[serde(default)]
    pub hold_piece: Option<String>,
    pub score: i64,
    pub lines: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Landlord,
    Peasant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: u8,
    pub role: Role,
    #[serde(default)]
    pub hand_count: usize,
    /// Rank strings; shrinks as the game progresses.
    pub hand: Vec<String>,
    pub is_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LastMove {
    pub player: Option<i32>,
    #[serde(default)]
    pub cards: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

pub const NO_WINNER: i32 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoudizhuScene {
    #[serde(default)]
    pub landlord: i32,
    pub hole_cards: Vec<String>,
    #[serde(default)]
    pub laizi: Vec<String>,
    pub players: Vec<PlayerView>,
    #[serde(default)]
    pub last_move: LastMove,
    #[serde(default = "default_winner")]
    pub winner: i32,
}

fn default_winner() -> i32 {
    NO_WINNER
}

/// The backend does not tag scenes with a game id; the field shapes are
/// disjoint enough for untagged dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameScene {
    Snake(SnakeScene),
    Tetris(TetrisScene),
    Doudizhu(DoudizhuScene),
}

impl GameScene {
    pub fn game_id(&self) -> GameId {
        match self {
            GameScene::Snake(_) => GameId::Snake,
            GameScene::Tetris(_) => GameId::Tetris,
            GameScene::Doudizhu(_) => GameId::Doudizhu,
        }
    }
}
