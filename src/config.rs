use serde::{Deserialize, Serialize};

/// How a blockade (pieces left, no legal move) is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalemateRule {
    /// The blockaded side loses.
    #[default]
    Loss,
    /// The match ends with no winner.
    Draw,
}

/// Which pieces the forced-capture rule restricts when a single square is
/// queried or moved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedCapture {
    /// A piece that can capture must capture; other pieces may still step.
    #[default]
    PerPiece,
    /// While any piece of the side can capture, no piece may step.
    BoardWide,
}

/// Rule variant knobs fixed when a match is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub stalemate: StalemateRule,
    pub forced_capture: ForcedCapture,
}

impl RuleConfig {
    pub fn with_stalemate(mut self, rule: StalemateRule) -> Self {
        self.stalemate = rule;
        self
    }

    pub fn with_forced_capture(mut self, rule: ForcedCapture) -> Self {
        self.forced_capture = rule;
        self
    }
}
