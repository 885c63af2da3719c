//! Fuzz target: tip record / tip entry JSON decoding
//!
//! Tip exports come from an external node; malformed JSON must be rejected
//! with an error, never a panic.
//!
//! Run: cargo +nightly fuzz run fuzz_tip_record_decode

#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tips_core::{compute_tip_state, parse_entries, TipRecord};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(record) = TipRecord::from_json(s) {
        // Anything that decodes must derive a state without panicking
        let _ = compute_tip_state(&record, &BTreeSet::new());
    }

    if let Ok(entries) = parse_entries(s) {
        let _ = tips_core::summarize(&entries, &BTreeSet::new(), u32::MAX);
    }
});
