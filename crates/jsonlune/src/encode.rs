//! Compact encoder from [`Value`] trees to JSON bytes.

use alloc::vec::Vec;
use core::fmt::Write;

use crate::{
    buf::DynBuf,
    error::EncodeError,
    value::{Object, Value},
};

/// Per-byte escape expansion for string content; `None` passes through.
#[rustfmt::skip]
static ESCAPE: [Option<&str>; 256] = [
    Some("\\u0000"), Some("\\u0001"), Some("\\u0002"), Some("\\u0003"),
    Some("\\u0004"), Some("\\u0005"), Some("\\u0006"), Some("\\u0007"),
    Some("\\b"),     Some("\\t"),     Some("\\n"),     Some("\\u000b"),
    Some("\\f"),     Some("\\r"),     Some("\\u000e"), Some("\\u000f"),
    Some("\\u0010"), Some("\\u0011"), Some("\\u0012"), Some("\\u0013"),
    Some("\\u0014"), Some("\\u0015"), Some("\\u0016"), Some("\\u0017"),
    Some("\\u0018"), Some("\\u0019"), Some("\\u001a"), Some("\\u001b"),
    Some("\\u001c"), Some("\\u001d"), Some("\\u001e"), Some("\\u001f"),
    None, None, Some("\\\""), None, None, None, None, None, // 0x20
    None, None, None, None, None, None, None, Some("\\/"),  // 0x28
    None, None, None, None, None, None, None, None,         // 0x30
    None, None, None, None, None, None, None, None,         // 0x38
    None, None, None, None, None, None, None, None,         // 0x40
    None, None, None, None, None, None, None, None,         // 0x48
    None, None, None, None, None, None, None, None,         // 0x50
    None, None, None, None, Some("\\\\"), None, None, None, // 0x58
    None, None, None, None, None, None, None, None,         // 0x60
    None, None, None, None, None, None, None, None,         // 0x68
    None, None, None, None, None, None, None, None,         // 0x70
    None, None, None, None, None, None, None, Some("\\u007f"), // 0x78
    None, None, None, None, None, None, None, None,         // 0x80
    None, None, None, None, None, None, None, None,         // 0x88
    None, None, None, None, None, None, None, None,         // 0x90
    None, None, None, None, None, None, None, None,         // 0x98
    None, None, None, None, None, None, None, None,         // 0xa0
    None, None, None, None, None, None, None, None,         // 0xa8
    None, None, None, None, None, None, None, None,         // 0xb0
    None, None, None, None, None, None, None, None,         // 0xb8
    None, None, None, None, None, None, None, None,         // 0xc0
    None, None, None, None, None, None, None, None,         // 0xc8
    None, None, None, None, None, None, None, None,         // 0xd0
    None, None, None, None, None, None, None, None,         // 0xd8
    None, None, None, None, None, None, None, None,         // 0xe0
    None, None, None, None, None, None, None, None,         // 0xe8
    None, None, None, None, None, None, None, None,         // 0xf0
    None, None, None, None, None, None, None, None,         // 0xf8
];

/// Serializes a [`Value`] tree as compact JSON.
///
/// Arrays become JSON arrays. Objects become JSON arrays when their keys
/// run `1..=N` in order, and JSON objects otherwise, with integer and
/// float keys quoted. The output carries no whitespace.
///
/// # Examples
///
/// ```
/// use jsonlune::{Object, encode};
///
/// let mut row = Object::new();
/// row.insert(1, "a");
/// row.insert(2, "b");
/// assert_eq!(encode(&row.into())?, br#"["a","b"]"#);
/// # Ok::<(), jsonlune::EncodeError>(())
/// ```
///
/// # Errors
///
/// Rejects non-container top-level values, non-finite numbers, and keys
/// that are not integers, floats, or strings. Nothing is emitted on error.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder { out: DynBuf::new() };
    encoder.document(value)?;
    Ok(encoder.out.finalize())
}

/// Serializes a [`Value`] tree and wraps it in a JSONP callback invocation.
///
/// # Examples
///
/// ```
/// use jsonlune::{Value, encode_jsonp};
///
/// let value = Value::Array(vec![Value::Integer(1)]);
/// assert_eq!(encode_jsonp(&value, "handle")?, b"handle([1])");
/// # Ok::<(), jsonlune::EncodeError>(())
/// ```
///
/// # Errors
///
/// Fails under the same conditions as [`encode`].
pub fn encode_jsonp(value: &Value, callback: &str) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder {
        out: DynBuf::with_hint(callback.len() + 2),
    };
    encoder.out.push_str(callback);
    encoder.out.push_byte(b'(');
    encoder.document(value)?;
    encoder.out.push_byte(b')');
    Ok(encoder.out.finalize())
}

struct Encoder {
    out: DynBuf,
}

impl Encoder {
    fn document(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Array(elements) => self.array(elements),
            Value::Object(object) => self.object(object),
            other => Err(EncodeError::InvalidValueType {
                type_name: other.type_name(),
            }),
        }
    }

    fn value(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Null => {
                self.out.push_str("null");
                Ok(())
            }
            Value::Boolean(boolean) => {
                self.out.push_str(if *boolean { "true" } else { "false" });
                Ok(())
            }
            Value::Integer(int) => {
                write!(self.out, "{int}").expect("infallible write");
                Ok(())
            }
            Value::Float(float) => self.float(*float),
            Value::String(string) => {
                self.string(string);
                Ok(())
            }
            Value::Array(elements) => self.array(elements),
            Value::Object(object) => self.object(object),
        }
    }

    fn array(&mut self, elements: &[Value]) -> Result<(), EncodeError> {
        self.out.push_byte(b'[');
        for (index, element) in elements.iter().enumerate() {
            if index > 0 {
                self.out.push_byte(b',');
            }
            self.value(element)?;
        }
        self.out.push_byte(b']');
        Ok(())
    }

    fn object(&mut self, object: &Object) -> Result<(), EncodeError> {
        let entries = object.entries();
        if entries.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }
        if entries[0].0 == Value::Integer(1) && self.sequence(entries)? {
            return Ok(());
        }
        self.mapping(entries)
    }

    /// Speculatively emits `entries` as a JSON array, trusting the keys to
    /// run `1..=N` in order. The first key that breaks the run rolls the
    /// speculative output back and returns `Ok(false)`.
    fn sequence(&mut self, entries: &[(Value, Value)]) -> Result<bool, EncodeError> {
        let checkpoint = self.out.len();
        self.out.push_byte(b'[');
        let mut expected = 0i64;
        for (key, value) in entries {
            expected += 1;
            if *key != Value::Integer(expected) {
                self.out.truncate(checkpoint);
                return Ok(false);
            }
            if expected > 1 {
                self.out.push_byte(b',');
            }
            self.value(value)?;
        }
        self.out.push_byte(b']');
        Ok(true)
    }

    fn mapping(&mut self, entries: &[(Value, Value)]) -> Result<(), EncodeError> {
        self.out.push_byte(b'{');
        for (index, (key, value)) in entries.iter().enumerate() {
            if index > 0 {
                self.out.push_byte(b',');
            }
            self.key(key)?;
            self.value(value)?;
        }
        self.out.push_byte(b'}');
        Ok(())
    }

    fn key(&mut self, key: &Value) -> Result<(), EncodeError> {
        match key {
            Value::Integer(int) => {
                write!(self.out, "\"{int}\":").expect("infallible write");
                Ok(())
            }
            Value::Float(float) => {
                self.out.push_byte(b'"');
                self.float(*float)?;
                self.out.push_str("\":");
                Ok(())
            }
            Value::String(string) => {
                self.string(string);
                self.out.push_byte(b':');
                Ok(())
            }
            other => Err(EncodeError::InvalidKeyType {
                type_name: other.type_name(),
            }),
        }
    }

    fn string(&mut self, bytes: &[u8]) {
        self.out.push_byte(b'"');
        for &byte in bytes {
            match ESCAPE[usize::from(byte)] {
                Some(text) => self.out.push_str(text),
                None => self.out.push_byte(byte),
            }
        }
        self.out.push_byte(b'"');
    }

    /// Emits a finite float, switching to exponent notation outside
    /// `1e-4..1e17` so extreme magnitudes stay within the decoder's
    /// literal length bound.
    #[allow(clippy::float_cmp)]
    fn float(&mut self, float: f64) -> Result<(), EncodeError> {
        if !float.is_finite() {
            return Err(EncodeError::NonFiniteNumber);
        }
        let magnitude = float.abs();
        if magnitude == 0.0 || (1e-4..1e17).contains(&magnitude) {
            write!(self.out, "{float}").expect("infallible write");
        } else {
            write!(self.out, "{float:e}").expect("infallible write");
        }
        Ok(())
    }
}
