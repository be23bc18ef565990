/// Makes serialized JSON safe to embed inside an inline `<script>` element.
///
/// The result is still valid JSON, the escapes only change how the characters are spelled.
pub fn escape_json_for_script(json: &str) -> String {
  let mut escaped = String::with_capacity(json.len());
  for char in json.chars() {
    match char {
      '<' => escaped.push_str("\\u003c"),
      '>' => escaped.push_str("\\u003e"),
      '&' => escaped.push_str("\\u0026"),
      '\u{2028}' => escaped.push_str("\\u2028"),
      '\u{2029}' => escaped.push_str("\\u2029"),
      _ => escaped.push(char),
    }
  }
  escaped
}

/// Escapes a value placed inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for char in value.chars() {
    match char {
      '"' => escaped.push_str("&quot;"),
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      _ => escaped.push(char),
    }
  }
  escaped
}

#[test]
fn test_escape_json_for_script() {
  assert_eq!(
    escape_json_for_script(r#"{"./</script>.js":"a&b"}"#),
    r#"{"./\u003c/script\u003e.js":"a\u0026b"}"#
  );
}

#[test]
fn test_escape_attribute() {
  assert_eq!(escape_attribute(r#"a"b&c"#), "a&quot;b&amp;c");
}
