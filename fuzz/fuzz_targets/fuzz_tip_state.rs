//! Fuzz target: tip state derivation
//!
//! Builds legacy tips from arbitrary (tipper, amount) lists and checks the
//! median against a sort+index reference computed in 129 bits.
//!
//! Run: cargo +nightly fuzz run fuzz_tip_state

#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tips_core::{compute_tip_state, AccountId, Balance, Contribution, LegacyTip, TipHash, TipRecord};

#[derive(Debug, Arbitrary)]
struct Input {
    tips: Vec<(u8, u128)>,
    locals: Vec<u8>,
    finder: Option<(u8, u128)>,
}

fn account(seed: u8) -> AccountId {
    AccountId::from_public_key(42, &[seed; 32]).unwrap()
}

fn reference_median(mut v: Vec<u128>) -> u128 {
    v.sort_unstable();
    let n = v.len();
    match n {
        0 => 0,
        _ if n % 2 == 1 => v[n / 2],
        _ => {
            let (sum, carry) = v[n / 2 - 1].overflowing_add(v[n / 2]);
            (sum >> 1) | ((carry as u128) << 127)
        }
    }
}

fuzz_target!(|input: Input| {
    let record = TipRecord::Legacy(LegacyTip {
        who: account(0),
        reason: TipHash([0; 32]),
        closes: None,
        finder: input.finder.map(|(who, dep)| (account(who), Balance(dep))),
        tips: input
            .tips
            .iter()
            .map(|&(who, amount)| Contribution {
                account: account(who),
                amount: Balance(amount),
            })
            .collect(),
    });
    let locals: BTreeSet<AccountId> = input.locals.iter().map(|&i| account(i)).collect();

    let state = compute_tip_state(&record, &locals);
    let amounts = input.tips.iter().map(|&(_, a)| a).collect();
    assert_eq!(state.median, Balance(reference_median(amounts)));
    assert_eq!(state.is_tipped, !input.tips.is_empty());
    assert_eq!(
        state.is_tipper,
        input.tips.iter().any(|(who, _)| input.locals.contains(who))
    );
    assert_eq!(
        state.is_finder,
        input.finder.is_some_and(|(who, _)| input.locals.contains(&who))
    );
});
