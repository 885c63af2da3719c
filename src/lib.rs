// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TREASURY TIPS
//
// Umbrella crate: one dependency for hosts that render the tips overview.
// - core:   tip decoding, aggregation, phases, selection, config
// - crypto: SS58 account addresses
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use tips_core as core;
pub use tips_crypto as crypto;

pub use tips_core::{
    compute_tip_state, parse_entries, summarize, AccountId, Balance, TipEntry, TipPhase,
    TipRecord, TipSelectListener, TipSelections, TipSelector, TipState,
};
