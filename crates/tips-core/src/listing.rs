use crate::aggregator::{compute_tip_state, TipState};
use crate::phase::TipPhase;
use crate::record::{TipEntry, TipHash};
use crate::BlockNumber;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tips_crypto::AccountId;

/// One rendered row of the tips overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipRow {
    pub hash: TipHash,
    pub who: AccountId,
    pub reason: TipHash,
    pub state: TipState,
    pub phase: TipPhase,
}

/// Soonest-closing first; tips without a closing block go last.
/// Ties are broken by hash so the order is stable across refreshes.
pub fn sort_entries(entries: &mut [TipEntry]) {
    entries.sort_by(|a, b| {
        let by_close = match (a.tip.closes(), b.tip.closes()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_close.then_with(|| a.hash.cmp(&b.hash))
    });
}

/// Derive state + phase for every entry, in listing order
pub fn summarize(
    entries: &[TipEntry],
    local_accounts: &BTreeSet<AccountId>,
    best_block: BlockNumber,
) -> Vec<TipRow> {
    let mut sorted = entries.to_vec();
    sort_entries(&mut sorted);

    sorted
        .into_iter()
        .map(|entry| {
            let state = compute_tip_state(&entry.tip, local_accounts);
            let phase = TipPhase::of(&state, best_block);
            TipRow {
                hash: entry.hash,
                who: entry.tip.who().clone(),
                reason: *entry.tip.reason(),
                state,
                phase,
            }
        })
        .collect()
}
