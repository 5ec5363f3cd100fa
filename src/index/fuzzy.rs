// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance for `term~N` queries.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so strings whose
//! lengths differ by more than the threshold skip the DP entirely.

/// Are these strings within `max` edits of each other?
///
/// Two early exits: the length difference check, and abandoning the DP as
/// soon as a whole row exceeds `max`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    // Character counts, not byte lengths
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}
