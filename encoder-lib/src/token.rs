//! Bijective base-52 identifiers.
//!
//! Digits run `a..z` then `A..Z` and are 1-indexed, so `1 -> "a"`,
//! `52 -> "Z"`, `53 -> "aa"`. There is no zero digit, hence no two tokens
//! ever spell the same number.

use std::num::NonZeroU64;

pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

pub fn encode(value: NonZeroU64) -> String {
    let mut digits = Vec::with_capacity(len(value));
    let mut n = value.get();

    while n > 0 {
        n -= 1;
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }

    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

pub fn decode(token: &str) -> Option<NonZeroU64> {
    if token.is_empty() {
        return None;
    }

    token.bytes().try_fold(None, |acc: Option<NonZeroU64>, byte| {
        let digit = ALPHABET.iter().position(|&c| c == byte)? as u64 + 1;
        let value = acc.map_or(0, NonZeroU64::get);

        value
            .checked_mul(BASE)?
            .checked_add(digit)
            .and_then(NonZeroU64::new)
            .map(Some)
    })?
}

/// Number of letters `encode(value)` produces, without allocating.
pub fn len(value: NonZeroU64) -> usize {
    let mut n = value.get();
    let mut len = 0;

    while n > 0 {
        n -= 1;
        n /= BASE;
        len += 1;
    }

    len
}
