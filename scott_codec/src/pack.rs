//! Packed integer fields.
//!
//! Actions store several small values per integer:
//! - verb and noun as `verb * 150 + noun`
//! - each condition as `code + 20 * value`
//! - each pair of action codes as `first * 150 + second`
//!
//! Each layout has an unpack/pack pair here; the decoder and encoder never do
//! the arithmetic themselves. Division truncates toward zero, so negative
//! packed values split into non-positive parts and join back to the same
//! integer.

use scott_data::{Condition, ConditionKind};

/// Radix for verb/noun and action-code pairs.
pub const PAIR_RADIX: i64 = 150;

/// Radix for condition code/value.
pub const CONDITION_RADIX: i64 = ConditionKind::COUNT;

/// Split a packed verb/noun into `(verb, noun)`.
pub fn unpack_verb_noun(raw: i64) -> (i64, i64) {
    split(raw, PAIR_RADIX)
}

pub fn pack_verb_noun(verb: i64, noun: i64) -> i64 {
    join(verb, noun, PAIR_RADIX)
}

/// Split a packed condition into its code and value. The code is kept even
/// when it names no [`ConditionKind`].
pub fn unpack_condition(raw: i64) -> Condition {
    let (value, code) = split(raw, CONDITION_RADIX);
    Condition { code, value }
}

pub fn pack_condition(condition: Condition) -> i64 {
    join(condition.value, condition.code, CONDITION_RADIX)
}

/// Split a packed pair of action codes into `(first, second)`.
pub fn unpack_action_codes(raw: i64) -> (i64, i64) {
    split(raw, PAIR_RADIX)
}

pub fn pack_action_codes(first: i64, second: i64) -> i64 {
    join(first, second, PAIR_RADIX)
}

fn split(raw: i64, radix: i64) -> (i64, i64) {
    (raw / radix, raw % radix)
}

fn join(high: i64, low: i64, radix: i64) -> i64 {
    high.saturating_mul(radix).saturating_add(low)
}
