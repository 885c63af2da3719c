//! Tip aggregation — Fixed-Point Integer Math (u128)
//!
//! Derives the view of a single treasury tip for a set of local accounts:
//! finder + deposit, closing block, median endorsement, and whether one of the
//! local accounts found or endorsed the tip.
//!
//! **DETERMINISM:**
//! The median is computed with pure integer math over the endorsement amounts.
//! NO floating-point arithmetic (f64) is used anywhere in this module, so large
//! balances never lose precision.
//!
//! **Lifecycle:**
//! `TipState` has no identity of its own. Hosts recompute it from scratch every
//! time they observe a new record or a new local account snapshot; nothing is
//! cached, so the order in which those changes arrive does not matter.

use crate::record::TipRecord;
use crate::{Balance, BlockNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tips_crypto::AccountId;

/// Derived tip view (immutable, recomputed on every input change)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipState {
    pub closes_at: Option<BlockNumber>,
    pub deposit: Option<Balance>,
    pub finder: Option<AccountId>,
    pub is_finder: bool,
    pub is_tipped: bool,
    pub is_tipper: bool,
    /// Median endorsement; zero when nobody has endorsed yet
    pub median: Balance,
}

/// Compute the tip view for `tip` as seen by `local_accounts`.
///
/// Total over every well-typed record: no tips yields a zero median, and a
/// missing finder yields `finder = None, is_finder = false`.
pub fn compute_tip_state(tip: &TipRecord, local_accounts: &BTreeSet<AccountId>) -> TipState {
    let (finder, deposit) = tip.finder_and_deposit();
    let contributions = tip.tips();

    let mut amounts: Vec<Balance> = contributions.iter().map(|c| c.amount).collect();
    // Stable sort; u128 has total ordering
    amounts.sort();
    let median = calculate_median(&amounts);

    let is_finder = finder.is_some_and(|f| local_accounts.contains(f));
    let is_tipper = contributions
        .iter()
        .any(|c| local_accounts.contains(&c.account));

    log::debug!(
        "tip for {}: {} endorsements, median={}, finder={}, is_finder={}, is_tipper={}",
        tip.who().short(),
        contributions.len(),
        median,
        finder.map(|f| f.short()).unwrap_or_else(|| "-".to_string()),
        is_finder,
        is_tipper
    );

    TipState {
        closes_at: tip.closes(),
        deposit,
        finder: finder.cloned(),
        is_finder,
        is_tipped: !contributions.is_empty(),
        is_tipper,
        median,
    }
}

/// Calculate median of a sorted balance slice (pure integer math)
/// For even-length slices, returns floor of the average of the two middle values
pub fn calculate_median(sorted_values: &[Balance]) -> Balance {
    let len = sorted_values.len();
    if len == 0 {
        return Balance::ZERO;
    }

    if len % 2 == 1 {
        // Odd number: return middle value (exact)
        sorted_values[len / 2]
    } else {
        // Even number: floor average of two middle values, overflow-free
        sorted_values[len / 2 - 1].midpoint(sorted_values[len / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Contribution, CurrentTip, LegacyTip, TipHash};
    use crate::test_support::account;

    fn legacy(finder: Option<(AccountId, Balance)>, tips: &[(u8, u128)]) -> TipRecord {
        TipRecord::Legacy(LegacyTip {
            who: account(100),
            reason: TipHash([1; 32]),
            closes: None,
            finder,
            tips: tips
                .iter()
                .map(|&(who, amount)| Contribution {
                    account: account(who),
                    amount: Balance(amount),
                })
                .collect(),
        })
    }

    fn locals(ids: &[u8]) -> BTreeSet<AccountId> {
        ids.iter().map(|&i| account(i)).collect()
    }

    #[test]
    fn test_median_calculation() {
        let odd = [10u128, 20, 30, 40, 50].map(Balance);
        assert_eq!(calculate_median(&odd), Balance(30));

        let even = [10u128, 20, 30, 40].map(Balance);
        assert_eq!(calculate_median(&even), Balance(25));

        let single = [Balance(42)];
        assert_eq!(calculate_median(&single), Balance(42));

        assert_eq!(calculate_median(&[]), Balance::ZERO);
    }

    #[test]
    fn test_three_tips_median_is_middle() {
        let tip = legacy(None, &[(1, 10), (2, 20), (3, 30)]);
        let state = compute_tip_state(&tip, &locals(&[]));
        assert_eq!(state.median, Balance(20));
        assert!(state.is_tipped);
    }

    #[test]
    fn test_two_tips_median_is_average() {
        let tip = legacy(None, &[(1, 10), (2, 30)]);
        let state = compute_tip_state(&tip, &locals(&[]));
        assert_eq!(state.median, Balance(20));
    }

    #[test]
    fn test_unsorted_input_and_floor() {
        let tip = legacy(None, &[(1, 31), (2, 10), (3, 7), (4, 100)]);
        // sorted: 7, 10, 31, 100 → floor((10 + 31) / 2) = 20
        let state = compute_tip_state(&tip, &locals(&[]));
        assert_eq!(state.median, Balance(20));
    }

    #[test]
    fn test_median_ignores_tipper_identity() {
        let tip = legacy(None, &[(1, 10), (1, 50), (1, 20)]);
        let state = compute_tip_state(&tip, &locals(&[1]));
        assert_eq!(state.median, Balance(20));
        assert!(state.is_tipper);
    }

    #[test]
    fn test_large_amounts_exact() {
        let tip = legacy(None, &[(1, u128::MAX), (2, u128::MAX - 2)]);
        let state = compute_tip_state(&tip, &locals(&[]));
        assert_eq!(state.median, Balance(u128::MAX - 1));
    }

    #[test]
    fn test_empty_tip_defaults() {
        let tip = legacy(None, &[]);
        let state = compute_tip_state(&tip, &locals(&[1, 2]));
        assert_eq!(state.median, Balance::ZERO);
        assert!(!state.is_tipped);
        assert!(!state.is_tipper);
        assert!(!state.is_finder);
        assert_eq!(state.finder, None);
        assert_eq!(state.deposit, None);
    }

    #[test]
    fn test_legacy_finder_unwrapped() {
        let tip = legacy(Some((account(5), Balance(1_000))), &[]);
        let state = compute_tip_state(&tip, &locals(&[5]));
        assert_eq!(state.finder, Some(account(5)));
        assert_eq!(state.deposit, Some(Balance(1_000)));
        assert!(state.is_finder);
    }

    #[test]
    fn test_current_finder_fields() {
        let tip = TipRecord::Current(CurrentTip {
            who: account(100),
            reason: TipHash([1; 32]),
            closes: Some(4_200),
            finder: account(6),
            deposit: Balance(77),
            tips: vec![Contribution {
                account: account(7),
                amount: Balance(3),
            }],
            finders_fee: true,
        });

        let outsider = compute_tip_state(&tip, &locals(&[1]));
        assert_eq!(outsider.finder, Some(account(6)));
        assert_eq!(outsider.deposit, Some(Balance(77)));
        assert_eq!(outsider.closes_at, Some(4_200));
        assert!(!outsider.is_finder);
        assert!(!outsider.is_tipper);

        let both = compute_tip_state(&tip, &locals(&[6, 7]));
        assert!(both.is_finder);
        assert!(both.is_tipper);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = compute_tip_state(&legacy(None, &[(1, 10)]), &locals(&[]));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["median"], "10");
        assert_eq!(json["isTipped"], true);
        assert_eq!(json["closesAt"], serde_json::Value::Null);
    }
}
