//! Recursive-descent decoder from raw JSON bytes to [`Value`] trees.

use bstr::BString;

use crate::{
    buf::DynBuf,
    error::{DecodeError, DecodeErrorKind},
    utf8::{codepoint_to_utf8, hex4_to_codepoint},
    value::{Array, Object, Value},
};

/// Nesting depth allowed when [`DecodeOptions::max_depth`] is left alone.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Longest accepted numeric literal, in bytes.
const MAX_NUMBER_LEN: usize = 40;

/// Bytes skipped between tokens: space, tab, LF, VT, FF, and CR.
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Options for [`decode_with_options`].
#[derive(Clone, Copy, Debug)]
pub struct DecodeOptions {
    /// Strip a JSONP callback wrapper before decoding. Everything before
    /// the first `{` or `[` and after the last `}` or `]` is trimmed away,
    /// and input without any such bracket pair rejects the document.
    ///
    /// # Default
    ///
    /// `false`: the input must itself be a JSON document.
    pub extract_jsonp: bool,

    /// Containers may nest this many levels deep before the document is
    /// rejected.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`].
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            extract_jsonp: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes one JSON document into a [`Value`] tree.
///
/// The top level must be an array or an object, and the tree is built
/// whole: any malformation rejects the entire document.
///
/// # Examples
///
/// ```
/// use jsonlune::{Value, decode};
///
/// let value = decode(br#"{"id":7,"tags":["a","b"]}"#)?;
/// assert!(value.is_object());
/// # Ok::<(), jsonlune::DecodeError>(())
/// ```
///
/// # Errors
///
/// Returns a [`DecodeError`] classifying the first malformation found,
/// with an excerpt of the input at the offending position.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with_options(input, DecodeOptions::default())
}

/// Decodes one JSON document under the given [`DecodeOptions`].
///
/// # Examples
///
/// ```
/// use jsonlune::{DecodeOptions, decode_with_options};
///
/// let options = DecodeOptions {
///     extract_jsonp: true,
///     ..DecodeOptions::default()
/// };
/// let value = decode_with_options(br#"handle({"ok":true});"#, options)?;
/// assert!(value.is_object());
/// # Ok::<(), jsonlune::DecodeError>(())
/// ```
///
/// # Errors
///
/// Returns a [`DecodeError`] classifying the first malformation found.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    if input.len() < 2 {
        return Err(DecodeError::at(DecodeErrorKind::InvalidBuffer, input, 0));
    }
    let region = if options.extract_jsonp {
        match extract_jsonp_region(input) {
            Some(region) => region,
            None => return Err(DecodeError::at(DecodeErrorKind::InvalidBuffer, input, 0)),
        }
    } else {
        input
    };
    Decoder::new(region, options.max_depth).document()
}

/// Bytes from the first `{` or `[` through the last `}` or `]`.
fn extract_jsonp_region(input: &[u8]) -> Option<&[u8]> {
    let open = input.iter().position(|&b| matches!(b, b'{' | b'['))?;
    let tail = &input[open..];
    let close = tail.iter().rposition(|&b| matches!(b, b'}' | b']'))?;
    Some(&tail[..=close])
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8], max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.bump();
        }
    }

    fn err(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::at(kind, self.input, self.pos)
    }

    fn err_at(&self, kind: DecodeErrorKind, pos: usize) -> DecodeError {
        DecodeError::at(kind, self.input, pos)
    }

    fn document(mut self) -> Result<Value, DecodeError> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            return Err(self.err(DecodeErrorKind::EmptyBuffer));
        }
        let value = self.container()?;
        if self.pos != self.input.len() {
            return Err(self.err(DecodeErrorKind::TrailingData));
        }
        Ok(value)
    }

    fn container(&mut self) -> Result<Value, DecodeError> {
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            _ => Err(self.err(DecodeErrorKind::InvalidBuffer)),
        }
    }

    fn value(&mut self) -> Result<Value, DecodeError> {
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => self.string(),
            Some(b't' | b'f' | b'n') => self.literal(),
            Some(b'+' | b'-' | b'0'..=b'9') => self.number(),
            _ => Err(self.err(DecodeErrorKind::InvalidLiteral)),
        }
    }

    fn array(&mut self) -> Result<Value, DecodeError> {
        let open = self.pos;
        self.enter(open)?;
        self.bump();
        let mut elements = Array::new();
        let mut comma_pending = false;
        loop {
            self.skip_whitespace();
            let Some(byte) = self.peek() else {
                let kind = if elements.is_empty() {
                    DecodeErrorKind::DuplicateArrayOpen
                } else {
                    DecodeErrorKind::UnterminatedArray
                };
                return Err(self.err_at(kind, open));
            };
            match byte {
                b']' => {
                    if comma_pending {
                        return Err(self.err(DecodeErrorKind::MisplacedComma));
                    }
                    self.bump();
                    self.leave();
                    self.skip_whitespace();
                    return Ok(Value::Array(elements));
                }
                b',' => {
                    if comma_pending || elements.is_empty() {
                        return Err(self.err(DecodeErrorKind::MisplacedComma));
                    }
                    comma_pending = true;
                    self.bump();
                }
                _ => {
                    elements.push(self.value()?);
                    comma_pending = false;
                }
            }
        }
    }

    fn object(&mut self) -> Result<Value, DecodeError> {
        let open = self.pos;
        self.enter(open)?;
        self.bump();
        let mut object = Object::new();
        let mut comma_pending = false;
        loop {
            self.skip_whitespace();
            let Some(byte) = self.peek() else {
                return Err(self.err_at(DecodeErrorKind::UnterminatedObject, open));
            };
            match byte {
                b'}' => {
                    if comma_pending {
                        return Err(self.err(DecodeErrorKind::MisplacedComma));
                    }
                    self.bump();
                    self.leave();
                    self.skip_whitespace();
                    return Ok(Value::Object(object));
                }
                b',' => {
                    if comma_pending || object.is_empty() {
                        return Err(self.err(DecodeErrorKind::MisplacedComma));
                    }
                    comma_pending = true;
                    self.bump();
                }
                b'"' => {
                    let key = self.string()?;
                    self.skip_to_colon()?;
                    self.skip_whitespace();
                    if self.peek().is_none() {
                        return Err(self.err_at(DecodeErrorKind::UnterminatedObject, open));
                    }
                    let value = self.value()?;
                    object.insert(key, value);
                    comma_pending = false;
                }
                b'{' => return Err(self.err(DecodeErrorKind::DuplicateObjectOpen)),
                _ => return Err(self.err(DecodeErrorKind::InvalidLiteral)),
            }
        }
    }

    /// Scans forward to the next `:` and past it. Bytes before the colon
    /// are not inspected.
    fn skip_to_colon(&mut self) -> Result<(), DecodeError> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            self.bump();
            if byte == b':' {
                return Ok(());
            }
        }
        Err(self.err_at(DecodeErrorKind::MissingColon, start))
    }

    fn string(&mut self) -> Result<Value, DecodeError> {
        let open = self.pos;
        self.bump();
        let mut out = DynBuf::new();
        // Unescaped bytes are copied as whole runs, flushed at each escape
        // and at the closing quote.
        let mut run = self.pos;
        loop {
            let Some(byte) = self.peek() else {
                return Err(self.err_at(DecodeErrorKind::UnterminatedString, open));
            };
            match byte {
                b'"' => {
                    out.push_bytes(&self.input[run..self.pos]);
                    self.bump();
                    return Ok(Value::String(BString::from(out.finalize())));
                }
                b'\\' => {
                    out.push_bytes(&self.input[run..self.pos]);
                    self.escape(&mut out);
                    run = self.pos;
                }
                _ => self.bump(),
            }
        }
    }

    /// Expands one backslash escape into `out`.
    ///
    /// Unknown escapes and malformed `\u` quads are taken literally: the
    /// backslash goes through as content and scanning resumes at the next
    /// byte.
    fn escape(&mut self, out: &mut DynBuf) {
        let next = self.input.get(self.pos + 1).copied();
        let simple = match next {
            Some(b'"') => Some(b'"'),
            Some(b'\\') => Some(b'\\'),
            Some(b'/') => Some(b'/'),
            Some(b'b') => Some(0x08),
            Some(b'f') => Some(0x0C),
            Some(b'n') => Some(b'\n'),
            Some(b'r') => Some(b'\r'),
            Some(b't') => Some(b'\t'),
            _ => None,
        };
        if let Some(byte) = simple {
            out.push_byte(byte);
            self.pos += 2;
            return;
        }
        if next == Some(b'u') {
            let hex = self.input.get(self.pos + 2..).unwrap_or_default();
            if let Some(seq) = hex4_to_codepoint(hex).and_then(codepoint_to_utf8) {
                out.push_bytes(seq.as_bytes());
                self.pos += 6;
                return;
            }
        }
        out.push_byte(b'\\');
        self.bump();
    }

    fn literal(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        let (text, value) = match self.peek() {
            Some(b't') => (&b"true"[..], Value::Boolean(true)),
            Some(b'f') => (&b"false"[..], Value::Boolean(false)),
            _ => (&b"null"[..], Value::Null),
        };
        let end = start + text.len();
        if self.input.get(start..end) != Some(text) {
            return Err(self.err_at(DecodeErrorKind::InvalidLiteral, start));
        }
        self.pos = end;
        // The literal must stop at whitespace, a comma, or a container
        // close; anything else glues onto it.
        let mut look = self.pos;
        while self.input.get(look).copied().is_some_and(is_space) {
            look += 1;
        }
        match self.input.get(look).copied() {
            Some(b',' | b']' | b'}') => Ok(value),
            Some(_) => Err(self.err_at(DecodeErrorKind::InvalidLiteral, look)),
            None => Err(self.err_at(DecodeErrorKind::InvalidLiteral, start)),
        }
    }

    fn number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        let mut signs = 0u32;
        while let Some(byte) = self.peek() {
            if is_space(byte) || matches!(byte, b',' | b']' | b'}') {
                break;
            }
            if matches!(byte, b'+' | b'-') {
                signs += 1;
                if signs > 1 {
                    return Err(self.err(DecodeErrorKind::DuplicateSign));
                }
            }
            self.bump();
            if self.pos - start > MAX_NUMBER_LEN {
                return Err(self.err_at(DecodeErrorKind::NumberTooLong, start));
            }
        }
        let literal = &self.input[start..self.pos];
        let text = core::str::from_utf8(literal)
            .map_err(|_| self.err_at(DecodeErrorKind::InvalidNumber, start))?;
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Integer(int));
        }
        match text.parse::<f64>() {
            Ok(float) => Ok(Value::Float(float)),
            Err(_) => Err(self.err_at(DecodeErrorKind::InvalidNumber, start)),
        }
    }

    fn enter(&mut self, open: usize) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.err_at(DecodeErrorKind::MaxDepthExceeded, open));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
