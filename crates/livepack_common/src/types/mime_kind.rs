use mime::Mime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeKind {
  Script,
  Style,
  /// Markup. Only the rewritten entry document is published with this kind.
  Other,
}

impl MimeKind {
  pub fn mime(self) -> Mime {
    match self {
      Self::Script => mime::TEXT_JAVASCRIPT,
      Self::Style => mime::TEXT_CSS,
      Self::Other => mime::TEXT_HTML,
    }
  }
}

#[test]
fn test_mime_kind() {
  assert_eq!(MimeKind::Script.mime().essence_str(), "text/javascript");
  assert_eq!(MimeKind::Style.mime().essence_str(), "text/css");
  assert_eq!(MimeKind::Other.mime().essence_str(), "text/html");
}
