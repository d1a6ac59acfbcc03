//! scott_codec: reader and writer for ScottFree adventure data files
//!
//! The format is a flat stream of whitespace-separated integers and quoted
//! strings laid out in a fixed order:
//! - 12-integer header
//! - actions (8 packed integers each)
//! - vocabulary (verb/noun string pairs)
//! - rooms (6 exits and a description)
//! - messages
//! - items (description and starting location)
//! - one comment string per action
//! - 3-integer footer
//!
//! [`decode`] turns bytes into a [`scott_data::Game`] and [`encode`] turns it
//! back; an unmodified game round-trips byte for byte.

pub mod decode;
pub mod encode;
pub mod pack;
pub mod token;

pub use decode::{DecodeError, FieldError, Phase, decode, decode_tokens};
pub use encode::{EncodeError, encode, write_game};
pub use pack::{
    pack_action_codes, pack_condition, pack_verb_noun, unpack_action_codes, unpack_condition, unpack_verb_noun,
};
pub use token::{ScanState, StreamError, Token, TokenKind, TokenStream, TokenizeError, tokenize};
