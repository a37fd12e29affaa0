//! Decodes a JSONP feed the way a scoreboard widget would: strip the
//! callback wrapper, poke at the decoded table, then wrap the updated
//! value for the next consumer.
//!
//! The feed arrives as a function call around one JSON document:
//!
//! ```text
//! renderScores({"event":"qualifiers","rows":[...]});
//! ```
//!
//! [`DecodeOptions::extract_jsonp`] cuts the document out of that wrapper,
//! and [`encode_jsonp`] puts a fresh wrapper around the re-encoded value.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonlune --example jsonp_feed
//! ```

use jsonlune::{DecodeOptions, Value, decode_with_options, encode_jsonp};

fn main() {
    // In real life this would come from the network.
    let feed = br#"renderScores({"event":"qualifiers","rows":[{"name":"ada","points":61},{"name":"lin","points":58}]});"#;

    let options = DecodeOptions {
        extract_jsonp: true,
        ..DecodeOptions::default()
    };
    let mut value = decode_with_options(feed, options).expect("feed decodes");

    let Value::Object(table) = &mut value else {
        panic!("feed root should be an object");
    };

    if let Some(Value::String(event)) = table.get("event") {
        println!("event: {event}");
    }

    if let Some(Value::Array(rows)) = table.get("rows") {
        println!("rows:  {}", rows.len());
        for row in rows {
            let Value::Object(row) = row else { continue };
            if let (Some(Value::String(name)), Some(Value::Integer(points))) =
                (row.get("name"), row.get("points"))
            {
                println!("  {name}: {points}");
            }
        }
    }

    // Stamp the payload before passing it along.
    table.insert("checked", true);

    let wrapped = encode_jsonp(&value, "paintScores").expect("feed encodes");
    println!("{}", String::from_utf8_lossy(&wrapped));
}
