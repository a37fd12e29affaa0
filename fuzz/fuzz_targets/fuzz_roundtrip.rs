#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonlune::{BString, Object, Value, decode, encode};
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Copy, PartialEq)]
enum KeyMode {
    /// String keys only; the decoded tree must equal the generated one.
    Text,
    /// Increasing integer keys; tables may come back as arrays.
    Numbered,
}

fn arbitrary_value(u: &mut Unstructured<'_>, depth: u8, mode: KeyMode) -> arbitrary::Result<Value> {
    let choices = if depth == 0 { 4u8 } else { 6 };
    Ok(match u.int_in_range(0u8..=choices)? {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(u)?),
        2 => Value::Integer(i64::arbitrary(u)?),
        // Halving an i32 keeps every float finite, non-integral, and
        // exactly representable, so its text survives reparsing.
        3 => Value::Float(f64::from(i32::arbitrary(u)?) + 0.5),
        4 => Value::String(BString::from(Vec::<u8>::arbitrary(u)?)),
        5 => {
            let len = u.int_in_range(0u8..=3)?;
            let mut elements = Vec::with_capacity(usize::from(len));
            for _ in 0..len {
                elements.push(arbitrary_value(u, depth - 1, mode)?);
            }
            Value::Array(elements)
        }
        _ => arbitrary_table(u, depth - 1, mode)?,
    })
}

fn arbitrary_table(u: &mut Unstructured<'_>, depth: u8, mode: KeyMode) -> arbitrary::Result<Value> {
    let len = u.int_in_range(0u8..=3)?;
    let mut object = Object::new();
    let mut numbered_key = 0i64;
    for _ in 0..len {
        match mode {
            KeyMode::Text => {
                let key = BString::from(Vec::<u8>::arbitrary(u)?);
                object.insert(key, arbitrary_value(u, depth, mode)?);
            }
            KeyMode::Numbered => {
                numbered_key += i64::from(u.int_in_range(1u8..=2)?);
                object.insert(numbered_key, arbitrary_value(u, depth, mode)?);
            }
        }
    }
    Ok(Value::Object(object))
}

fn arbitrary_document(u: &mut Unstructured<'_>, mode: KeyMode) -> arbitrary::Result<Value> {
    if bool::arbitrary(u)? {
        arbitrary_table(u, 3, mode)
    } else {
        let len = u.int_in_range(0u8..=4)?;
        let mut elements = Vec::with_capacity(usize::from(len));
        for _ in 0..len {
            elements.push(arbitrary_value(u, 2, mode)?);
        }
        Ok(Value::Array(elements))
    }
}

fn run(data: &[u8]) -> arbitrary::Result<()> {
    let mut u = Unstructured::new(data);
    let mode = if bool::arbitrary(&mut u)? {
        KeyMode::Text
    } else {
        KeyMode::Numbered
    };
    let value = arbitrary_document(&mut u, mode)?;

    let encoded = encode(&value).expect("generated trees encode");
    let decoded = decode(&encoded).expect("encoded trees decode");
    if mode == KeyMode::Text {
        assert_eq!(decoded, value);
    }
    assert_eq!(encode(&decoded).expect("decoded trees encode"), encoded);
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = run(data);
});
