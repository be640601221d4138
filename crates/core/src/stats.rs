//! Summary stats persisted at the end of every game.

use serde::{Deserialize, Serialize};

/// Snapshot written once per game-over event.
///
/// Keys are camelCase on disk (`timeElapsed`, `isComplete`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub score: u32,
    pub flips: u32,
    /// Seconds used before the game ended
    pub time_elapsed: u32,
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let stats = GameStats {
            score: 300,
            flips: 24,
            time_elapsed: 18,
            is_complete: true,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"score":300,"flips":24,"timeElapsed":18,"isComplete":true}"#
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let parsed: Result<GameStats, _> = serde_json::from_str(r#"{"score":1}"#);
        assert!(parsed.is_err());
    }
}
