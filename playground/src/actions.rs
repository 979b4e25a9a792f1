//! Keyboard to backend-action mapping.

use engine::scene::GameId;
use winit::event::VirtualKeyCode;

/// Sentinel the scheduler sends so tick-driven games advance without input.
pub const TICK_ACTION: i32 = -1;

pub fn is_tick_driven(game: GameId) -> bool {
    matches!(game, GameId::Snake | GameId::Tetris)
}

/// Tetris swallows every key press while playing so movement keys never
/// reach other handlers; Snake and Doudizhu only consume mapped keys.
pub fn consumes_unmapped_keys(game: GameId) -> bool {
    game == GameId::Tetris
}

pub fn map_key(game: GameId, key: VirtualKeyCode) -> Option<i32> {
    match game {
        GameId::Snake => snake_key(key),
        GameId::Tetris => tetris_key(key),
        GameId::Doudizhu => None,
    }
}

fn snake_key(key: VirtualKeyCode) -> Option<i32> {
    use VirtualKeyCode::*;
    match key {
        Up | W => Some(0),
        Right | D => Some(1),
        Down | S => Some(2),
        Left | A => Some(3),
        _ => None,
    }
}

fn tetris_key(key: VirtualKeyCode) -> Option<i32> {
    use VirtualKeyCode::*;
    match key {
        Left | A => Some(0),
        Right | D => Some(1),
        Up | X => Some(2),
        Z | LControl | RControl => Some(3),
        Down | S => Some(4),
        Space => Some(5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VirtualKeyCode::*;

    #[test]
    fn snake_directions_are_clockwise_from_up() {
        assert_eq!(map_key(GameId::Snake, Up), Some(0));
        assert_eq!(map_key(GameId::Snake, Right), Some(1));
        assert_eq!(map_key(GameId::Snake, Down), Some(2));
        assert_eq!(map_key(GameId::Snake, Left), Some(3));
        assert_eq!(map_key(GameId::Snake, W), Some(0));
        assert_eq!(map_key(GameId::Snake, Space), None);
    }

    #[test]
    fn tetris_covers_all_six_actions() {
        assert_eq!(map_key(GameId::Tetris, Left), Some(0));
        assert_eq!(map_key(GameId::Tetris, Right), Some(1));
        assert_eq!(map_key(GameId::Tetris, X), Some(2));
        assert_eq!(map_key(GameId::Tetris, Z), Some(3));
        assert_eq!(map_key(GameId::Tetris, LControl), Some(3));
        assert_eq!(map_key(GameId::Tetris, S), Some(4));
        assert_eq!(map_key(GameId::Tetris, Space), Some(5));
        assert_eq!(map_key(GameId::Tetris, Q), None);
    }

    #[test]
    fn doudizhu_takes_no_keyboard_input() {
        for key in [Up, Down, Left, Right, Space, A] {
            assert_eq!(map_key(GameId::Doudizhu, key), None);
        }
        assert!(!consumes_unmapped_keys(GameId::Doudizhu));
    }

    #[test]
    fn only_grid_games_run_on_a_timer() {
        assert!(is_tick_driven(GameId::Snake));
        assert!(is_tick_driven(GameId::Tetris));
        assert!(!is_tick_driven(GameId::Doudizhu));
    }
}
