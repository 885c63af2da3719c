use crate::aggregator::TipState;
use crate::BlockNumber;
use serde::{Deserialize, Serialize};

/// Where a tip stands relative to the best known block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum TipPhase {
    /// Not enough endorsements yet; no closing block has been scheduled
    Open,
    /// Countdown running: closes at `closes_at`, `remaining` blocks from now
    Closing {
        closes_at: BlockNumber,
        remaining: BlockNumber,
    },
    /// Countdown elapsed; anyone may close the tip and pay out the median
    Closeable { closes_at: BlockNumber },
}

impl TipPhase {
    pub fn of(state: &TipState, best_block: BlockNumber) -> TipPhase {
        match state.closes_at {
            None => TipPhase::Open,
            Some(closes_at) if best_block >= closes_at => TipPhase::Closeable { closes_at },
            Some(closes_at) => TipPhase::Closing {
                closes_at,
                remaining: closes_at - best_block,
            },
        }
    }

    pub fn is_closeable(&self) -> bool {
        matches!(self, TipPhase::Closeable { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipPhase::Open => "open",
            TipPhase::Closing { .. } => "closing",
            TipPhase::Closeable { .. } => "closeable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balance;

    fn state(closes_at: Option<BlockNumber>) -> TipState {
        TipState {
            closes_at,
            deposit: None,
            finder: None,
            is_finder: false,
            is_tipped: true,
            is_tipper: false,
            median: Balance(1),
        }
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(TipPhase::of(&state(None), 10), TipPhase::Open);
        assert_eq!(
            TipPhase::of(&state(Some(100)), 40),
            TipPhase::Closing {
                closes_at: 100,
                remaining: 60
            }
        );
        assert!(TipPhase::of(&state(Some(100)), 100).is_closeable());
        assert!(TipPhase::of(&state(Some(100)), 150).is_closeable());
    }

    #[test]
    fn test_phase_json_is_tagged() {
        let json = serde_json::to_value(TipPhase::of(&state(Some(9)), 1)).unwrap();
        assert_eq!(json["phase"], "closing");
        assert_eq!(json["remaining"], 8);
        assert_eq!(TipPhase::Open.label(), "open");
    }
}
