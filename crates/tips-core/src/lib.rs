// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TREASURY TIPS - CORE MODULE
//
// Client-side view of treasury tips: decoding both on-chain tip layouts,
// deriving finder/deposit/median/ownership flags, tip phases, listing order,
// and collecting median endorsements for a batch submission.
// All balance arithmetic uses u128 (no floating-point).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod aggregator;
pub mod balance;
pub mod config;
pub mod listing;
pub mod phase;
pub mod record;
pub mod selection;

pub use aggregator::{calculate_median, compute_tip_state, TipState};
pub use balance::{format_balance, Balance};
pub use config::TipsConfig;
pub use listing::{sort_entries, summarize, TipRow};
pub use phase::TipPhase;
pub use record::{parse_entries, Contribution, CurrentTip, LegacyTip, TipEntry, TipError, TipHash, TipRecord};
pub use selection::{TipEndorsement, TipSelectListener, TipSelections, TipSelector};
pub use tips_crypto::AccountId;

/// Block height on the tracked chain
pub type BlockNumber = u32;
