#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use jsonlune::{DecodeOptions, Object, Value, decode, decode_with_options, encode, encode_jsonp};

fn render(input: &[u8]) -> String {
    let mut out = String::new();
    match decode(input) {
        Ok(value) => {
            writeln!(out, "decoded: {value:?}").unwrap();
            match encode(&value) {
                Ok(bytes) => {
                    writeln!(out, "encoded: {}", String::from_utf8_lossy(&bytes)).unwrap();
                }
                Err(error) => writeln!(out, "encode error: {error}").unwrap(),
            }
        }
        Err(error) => writeln!(out, "decode error: {error}").unwrap(),
    }
    out
}

fn render_encoded(value: &Value) -> String {
    match encode(value) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(error) => format!("error: {error}"),
    }
}

fn table(entries: &[(i64, &str)]) -> Value {
    let mut object = Object::new();
    for &(key, text) in entries {
        object.insert(key, text);
    }
    Value::Object(object)
}

#[test]
fn snapshot_decoded_documents() {
    // Unrolled to satisfy insta inline snapshot rules
    insta::assert_snapshot!(render(br#"{"pick":1,"flags":[true,false,null]}"#), @r#"
    decoded: Object(Object { entries: [(String("pick"), Integer(1)), (String("flags"), Array([Boolean(true), Boolean(false), Null]))] })
    encoded: {"pick":1,"flags":[true,false,null]}
    "#);

    insta::assert_snapshot!(render(br#"[0,-7,2.5,"text",[]]"#), @r#"
    decoded: Array([Integer(0), Integer(-7), Float(2.5), String("text"), Array([])])
    encoded: [0,-7,2.5,"text",[]]
    "#);

    insta::assert_snapshot!(render(br#"{"a" = :1}"#), @r#"
    decoded: Object(Object { entries: [(String("a"), Integer(1))] })
    encoded: {"a":1}
    "#);

    insta::assert_snapshot!(render(br#"{"dup":1,"dup":2}"#), @r#"
    decoded: Object(Object { entries: [(String("dup"), Integer(2))] })
    encoded: {"dup":2}
    "#);
}

#[test]
fn snapshot_decode_errors() {
    insta::assert_snapshot!(render(b"[1,,2]"), @r#"decode error: misplaced comma near `,2]`"#);
    insta::assert_snapshot!(render(br#"{"a":1"#), @r#"decode error: unterminated object near `{"a":1`"#);
    insta::assert_snapshot!(render(b"["), @r#"decode error: invalid json buffer near `[`"#);
    insta::assert_snapshot!(render(b"   "), @r#"decode error: empty json buffer"#);
    insta::assert_snapshot!(render(br#"["ab"#), @r#"decode error: unterminated string near `"ab`"#);
    insta::assert_snapshot!(render(b"[truE]"), @r#"decode error: invalid literal near `truE]`"#);
    insta::assert_snapshot!(render(b"[--1]"), @r#"decode error: duplicate sign in number near `-1]`"#);

    let mut long = Vec::from(&b"["[..]);
    long.extend(core::iter::repeat_n(b'1', 41));
    long.push(b']');
    insta::assert_snapshot!(render(&long), @r#"decode error: number longer than 40 characters near `11111111111111111111`"#);
}

#[test]
fn snapshot_collection_layouts() {
    insta::assert_snapshot!(render_encoded(&table(&[(1, "a"), (2, "b"), (3, "c")])), @r#"["a","b","c"]"#);
    insta::assert_snapshot!(render_encoded(&table(&[(1, "a"), (3, "b")])), @r#"{"1":"a","3":"b"}"#);
    insta::assert_snapshot!(render_encoded(&table(&[(2, "a"), (3, "b")])), @r#"{"2":"a","3":"b"}"#);
    insta::assert_snapshot!(render_encoded(&Value::Object(Object::new())), @"{}");
    insta::assert_snapshot!(render_encoded(&Value::Array(Vec::new())), @"[]");

    let mut inner = Object::new();
    inner.insert(1, 10);
    inner.insert(2, 20);
    let mut outer = Object::new();
    outer.insert(1, Value::Object(inner));
    outer.insert(2, "tail");
    insta::assert_snapshot!(render_encoded(&Value::Object(outer)), @r#"[[10,20],"tail"]"#);

    insta::assert_snapshot!(render_encoded(&Value::Integer(5)), @r#"error: invalid value type `integer`"#);
    insta::assert_snapshot!(
        render_encoded(&Value::Array(vec![Value::Float(f64::NAN)])),
        @"error: cannot serialise number: must not be NaN or Infinity"
    );
}

#[test]
fn snapshot_jsonp_cycle() {
    let feed = br#"loadWeather({"city":"Reno","temps":[61,58]});"#;
    let options = DecodeOptions {
        extract_jsonp: true,
        ..DecodeOptions::default()
    };
    let value = decode_with_options(feed, options).expect("jsonp feed decodes");
    let wrapped = encode_jsonp(&value, "showWeather").expect("jsonp encodes");
    insta::assert_snapshot!(String::from_utf8_lossy(&wrapped), @r#"showWeather({"city":"Reno","temps":[61,58]})"#);
}
