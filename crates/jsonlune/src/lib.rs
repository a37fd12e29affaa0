//! A byte-oriented JSON codec: decode documents into [`Value`] trees,
//! encode trees back to compact JSON, and wrap or unwrap JSONP payloads.
//!
//! The decoder is strict about structure (containers only at the top
//! level, whole documents or nothing) but byte-oriented about content:
//! strings are never validated as UTF-8, and `\uXXXX` escapes expand
//! without pairing surrogates. Objects preserve entry order, and an
//! object whose keys run `1..=N` encodes as a JSON array.
//!
//! # Examples
//!
//! ```
//! use jsonlune::{decode, encode};
//!
//! let value = decode(br#"{"a":1,"b":[true,null,"x"]}"#)?;
//! assert_eq!(encode(&value)?, br#"{"a":1,"b":[true,null,"x"]}"#);
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

#![no_std]
#![allow(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod buf;
mod decode;
mod encode;
mod error;
mod utf8;
mod value;

#[cfg(test)]
mod tests;

pub use bstr::BString;
pub use decode::{DEFAULT_MAX_DEPTH, DecodeOptions, decode, decode_with_options};
pub use encode::{encode, encode_jsonp};
pub use error::{DecodeError, DecodeErrorKind, EncodeError};
pub use value::{Array, Object, Value};
