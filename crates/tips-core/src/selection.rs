// ─────────────────────────────────────────────────────────────────
// ENDORSEMENT SELECTION
// ─────────────────────────────────────────────────────────────────
// A user ticks "endorse with the median" on any number of tips and then
// submits them as one batch. Each tip row owns a TipSelector; every row
// reports to a single TipSelectListener (normally TipSelections), which
// collects the (tip, amount) pairs for the batch.
// ─────────────────────────────────────────────────────────────────

use crate::aggregator::TipState;
use crate::record::TipHash;
use crate::Balance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Receives `onSelect(id, is_selected, amount)` notifications
pub trait TipSelectListener {
    fn on_select(&mut self, id: &TipHash, is_selected: bool, amount: Balance);
}

/// Per-tip toggle: "endorse this tip with its current median".
///
/// The listener is notified whenever the (selected, median) pair changes,
/// either because the user toggled or because a recomputed state moved the
/// median while the tip is listed.
#[derive(Debug, Clone)]
pub struct TipSelector {
    id: TipHash,
    state: TipState,
    is_median_selected: bool,
}

impl TipSelector {
    pub fn new(id: TipHash, state: TipState) -> Self {
        Self {
            id,
            state,
            is_median_selected: false,
        }
    }

    pub fn id(&self) -> &TipHash {
        &self.id
    }

    pub fn state(&self) -> &TipState {
        &self.state
    }

    pub fn is_selected(&self) -> bool {
        self.is_median_selected
    }

    pub fn set_selected(&mut self, selected: bool, listener: &mut dyn TipSelectListener) {
        if self.is_median_selected == selected {
            return;
        }
        self.is_median_selected = selected;
        self.notify(listener);
    }

    pub fn toggle(&mut self, listener: &mut dyn TipSelectListener) {
        let next = !self.is_median_selected;
        self.set_selected(next, listener);
    }

    /// Replace the derived state with a freshly recomputed one
    pub fn update(&mut self, state: TipState, listener: &mut dyn TipSelectListener) {
        let median_changed = state.median != self.state.median;
        self.state = state;
        if median_changed {
            self.notify(listener);
        }
    }

    fn notify(&self, listener: &mut dyn TipSelectListener) {
        listener.on_select(&self.id, self.is_median_selected, self.state.median);
    }
}

/// One line of a batch endorsement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipEndorsement {
    pub hash: TipHash,
    pub amount: Balance,
}

/// Collects the selected tips and the amount each one will be endorsed with
#[derive(Debug, Clone, Default)]
pub struct TipSelections {
    selected: BTreeMap<TipHash, Balance>,
}

impl TipSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeMap<TipHash, Balance> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of all selected amounts, saturating at u128::MAX
    pub fn total(&self) -> Balance {
        self.selected
            .values()
            .fold(Balance::ZERO, |acc, amount| acc.saturating_add(*amount))
    }

    /// Endorsements in tip-hash order (deterministic batch layout)
    pub fn batch(&self) -> Vec<TipEndorsement> {
        self.selected
            .iter()
            .map(|(hash, amount)| TipEndorsement {
                hash: *hash,
                amount: *amount,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl TipSelectListener for TipSelections {
    fn on_select(&mut self, id: &TipHash, is_selected: bool, amount: Balance) {
        if is_selected {
            log::debug!("selected tip {} with {}", id, amount);
            self.selected.insert(*id, amount);
        } else if self.selected.remove(id).is_some() {
            log::debug!("deselected tip {}", id);
        }
    }
}
