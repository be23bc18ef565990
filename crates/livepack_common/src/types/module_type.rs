use livepack_utils::path_ext::SlashPathExt;

use crate::MimeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleType {
  Js,
  Jsx,
  Ts,
  Tsx,
  Css,
  Html,
  Custom(String),
}

impl ModuleType {
  /// ref: https://github.com/evanw/esbuild/blob/9c13ae1f06dfa909eb4a53882e3b7e4216a503fe/internal/bundler/bundler.go#L1161-L1183
  pub fn from_path(path: &str) -> Self {
    match path.extension() {
      Some("js" | "mjs" | "cjs") => Self::Js,
      Some("jsx") => Self::Jsx,
      Some("ts" | "mts" | "cts") => Self::Ts,
      Some("tsx") => Self::Tsx,
      Some("css") => Self::Css,
      Some("html" | "htm") => Self::Html,
      Some(ext) => Self::Custom(ext.to_string()),
      None => Self::Custom(String::new()),
    }
  }

  /// Sources that must go through the transpiler before a browser can load them.
  pub fn needs_transpile(&self) -> bool {
    matches!(self, Self::Jsx | Self::Ts | Self::Tsx)
  }

  /// Anything that is neither transpiled nor a stylesheet is served as script text.
  pub fn mime_kind(&self) -> MimeKind {
    match self {
      Self::Css => MimeKind::Style,
      Self::Js | Self::Jsx | Self::Ts | Self::Tsx | Self::Html | Self::Custom(_) => {
        MimeKind::Script
      }
    }
  }
}

#[test]
fn test_module_type_from_path() {
  assert_eq!(ModuleType::from_path("components/Button.tsx"), ModuleType::Tsx);
  assert_eq!(ModuleType::from_path("lib/util.mts"), ModuleType::Ts);
  assert_eq!(ModuleType::from_path("main.jsx"), ModuleType::Jsx);
  assert_eq!(ModuleType::from_path("styles/app.css"), ModuleType::Css);
  assert_eq!(ModuleType::from_path("data.json"), ModuleType::Custom("json".to_string()));
  assert_eq!(ModuleType::from_path("LICENSE"), ModuleType::Custom(String::new()));

  assert!(ModuleType::Tsx.needs_transpile());
  assert!(!ModuleType::Js.needs_transpile());
  assert_eq!(ModuleType::Css.mime_kind(), MimeKind::Style);
  assert_eq!(ModuleType::Custom("svg".to_string()).mime_kind(), MimeKind::Script);
}
