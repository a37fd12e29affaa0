use alloc::vec::Vec;

use bstr::BString;
use quickcheck::{Arbitrary, Gen};

use crate::{Array, Object, Value};

/// A float that survives an encode/decode round trip bit-for-bit: finite,
/// bounded magnitude, and always fractional so it re-parses as a float
/// rather than collapsing to an integer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct RoundTripFloat(pub(crate) f64);

impl Arbitrary for RoundTripFloat {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(f64::from(i32::arbitrary(g)) + 0.5)
    }
}

fn arbitrary_bytes(g: &mut Gen) -> BString {
    BString::from(Vec::<u8>::arbitrary(g))
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                match usize::arbitrary(g) % 5 {
                    0 => Value::Null,
                    1 => Value::Boolean(bool::arbitrary(g)),
                    2 => Value::Integer(i64::arbitrary(g)),
                    3 => Value::Float(RoundTripFloat::arbitrary(g).0),
                    _ => Value::String(arbitrary_bytes(g)),
                }
            } else {
                match usize::arbitrary(g) % 7 {
                    0 => Value::Null,
                    1 => Value::Boolean(bool::arbitrary(g)),
                    2 => Value::Integer(i64::arbitrary(g)),
                    3 => Value::Float(RoundTripFloat::arbitrary(g).0),
                    4 => Value::String(arbitrary_bytes(g)),
                    5 => {
                        let len = usize::arbitrary(g) % 4;
                        let mut elements = Array::new();
                        for _ in 0..len {
                            elements.push(gen_val(g, depth - 1));
                        }
                        Value::Array(elements)
                    }
                    _ => {
                        let len = usize::arbitrary(g) % 4;
                        let mut object = Object::new();
                        for _ in 0..len {
                            object.insert(Value::String(arbitrary_bytes(g)), gen_val(g, depth - 1));
                        }
                        Value::Object(object)
                    }
                }
            }
        }
        let depth = usize::arbitrary(g) % 3;
        gen_val(g, depth)
    }
}

/// A tree rooted in a container, as [`encode`](crate::encode) requires,
/// with string keys throughout so the round trip is unambiguous.
#[derive(Debug, Clone)]
pub(crate) struct Document(pub(crate) Value);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 5;
        let value = if bool::arbitrary(g) {
            Value::Array((0..len).map(|_| Value::arbitrary(g)).collect())
        } else {
            let mut object = Object::new();
            for _ in 0..len {
                object.insert(Value::String(arbitrary_bytes(g)), Value::arbitrary(g));
            }
            Value::Object(object)
        };
        Self(value)
    }
}
