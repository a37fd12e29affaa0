//! Append-only output buffer with a small inline fast path.

use alloc::vec::Vec;
use core::fmt;

/// Bytes a [`DynBuf`] holds before spilling to the heap.
pub(crate) const INLINE_CAPACITY: usize = 512;

/// Byte buffer that starts on the stack and migrates to a `Vec` once it
/// outgrows [`INLINE_CAPACITY`].
///
/// Heap capacity doubles until a pending write fits, so repeated small
/// appends stay amortized. [`DynBuf::truncate`] rolls the buffer back to an
/// earlier length, which the encoder uses to abandon speculative output.
pub(crate) struct DynBuf {
    storage: Storage,
}

enum Storage {
    Inline { buf: [u8; INLINE_CAPACITY], len: usize },
    Spilled(Vec<u8>),
}

impl DynBuf {
    pub(crate) fn new() -> Self {
        Self {
            storage: Storage::Inline {
                buf: [0; INLINE_CAPACITY],
                len: 0,
            },
        }
    }

    /// Creates a buffer sized for `hint` bytes, skipping the inline stage
    /// when the caller already knows the output will outgrow it.
    pub(crate) fn with_hint(hint: usize) -> Self {
        if hint > INLINE_CAPACITY {
            Self {
                storage: Storage::Spilled(Vec::with_capacity(hint)),
            }
        } else {
            Self::new()
        }
    }

    pub(crate) fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline { len, .. } => *len,
            Storage::Spilled(vec) => vec.len(),
        }
    }

    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.reserve(1);
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                buf[*len] = byte;
                *len += 1;
            }
            Storage::Spilled(vec) => vec.push(byte),
        }
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        match bytes {
            [] => {}
            [byte] => self.push_byte(*byte),
            _ => {
                self.reserve(bytes.len());
                match &mut self.storage {
                    Storage::Inline { buf, len } => {
                        buf[*len..*len + bytes.len()].copy_from_slice(bytes);
                        *len += bytes.len();
                    }
                    Storage::Spilled(vec) => vec.extend_from_slice(bytes),
                }
            }
        }
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    /// Rolls the buffer back to `len` bytes. Longer targets are ignored.
    pub(crate) fn truncate(&mut self, len: usize) {
        match &mut self.storage {
            Storage::Inline { len: used, .. } => {
                if len < *used {
                    *used = len;
                }
            }
            Storage::Spilled(vec) => vec.truncate(len),
        }
    }

    /// Consumes the buffer and returns the accumulated bytes.
    pub(crate) fn finalize(self) -> Vec<u8> {
        match self.storage {
            Storage::Inline { buf, len } => buf[..len].to_vec(),
            Storage::Spilled(vec) => vec,
        }
    }

    fn reserve(&mut self, additional: usize) {
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                let needed = *len + additional;
                if needed > INLINE_CAPACITY {
                    let mut spilled = Vec::with_capacity(grown_capacity(INLINE_CAPACITY, needed));
                    spilled.extend_from_slice(&buf[..*len]);
                    self.storage = Storage::Spilled(spilled);
                }
            }
            Storage::Spilled(vec) => {
                let needed = vec.len() + additional;
                if needed > vec.capacity() {
                    let target = grown_capacity(vec.capacity(), needed);
                    vec.reserve_exact(target - vec.len());
                }
            }
        }
    }

    #[cfg(test)]
    fn spilled(&self) -> bool {
        matches!(self.storage, Storage::Spilled(_))
    }
}

impl fmt::Write for DynBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(INLINE_CAPACITY);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{DynBuf, INLINE_CAPACITY};

    #[test]
    fn stays_inline_below_capacity() {
        let mut buf = DynBuf::new();
        buf.push_bytes(b"hello");
        buf.push_byte(b'!');
        assert!(!buf.spilled());
        assert_eq!(buf.finalize(), b"hello!");
    }

    #[test]
    fn spills_once_capacity_is_exceeded() {
        let mut buf = DynBuf::new();
        let chunk: Vec<u8> = (0..=255u8).collect();
        for _ in 0..3 {
            buf.push_bytes(&chunk);
        }
        assert!(buf.spilled());
        let out = buf.finalize();
        assert_eq!(out.len(), 768);
        assert_eq!(&out[..256], chunk.as_slice());
        assert_eq!(&out[512..], chunk.as_slice());
    }

    #[test]
    fn spill_boundary_preserves_prefix() {
        let mut buf = DynBuf::new();
        for byte in 0..INLINE_CAPACITY {
            buf.push_byte(byte as u8);
        }
        assert!(!buf.spilled());
        buf.push_byte(0xFF);
        assert!(buf.spilled());
        let out = buf.finalize();
        assert_eq!(out.len(), INLINE_CAPACITY + 1);
        assert_eq!(out[0], 0);
        assert_eq!(out[INLINE_CAPACITY - 1], (INLINE_CAPACITY - 1) as u8);
        assert_eq!(out[INLINE_CAPACITY], 0xFF);
    }

    #[test]
    fn truncate_discards_speculative_suffix() {
        let mut buf = DynBuf::new();
        buf.push_str("keep");
        let checkpoint = buf.len();
        buf.push_str("[1,2,");
        buf.truncate(checkpoint);
        buf.push_str("{}");
        assert_eq!(buf.finalize(), b"keep{}");
    }

    #[test]
    fn truncate_past_len_is_a_noop() {
        let mut buf = DynBuf::new();
        buf.push_str("ab");
        buf.truncate(10);
        assert_eq!(buf.finalize(), b"ab");
    }

    #[test]
    fn truncate_works_after_spill() {
        let mut buf = DynBuf::new();
        buf.push_bytes(&[b'x'; 600]);
        buf.truncate(2);
        buf.push_byte(b'y');
        assert_eq!(buf.finalize(), b"xxy");
    }

    #[test]
    fn with_hint_skips_the_inline_stage() {
        assert!(DynBuf::with_hint(4 * 1024).spilled());
        assert!(!DynBuf::with_hint(16).spilled());
    }

    #[test]
    fn formats_into_the_buffer() {
        use core::fmt::Write;

        let mut buf = DynBuf::new();
        write!(buf, "{}:{}", -42, 7.5).expect("buffer writes are infallible");
        assert_eq!(buf.finalize(), b"-42:7.5");
    }
}
