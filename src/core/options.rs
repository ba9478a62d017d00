//! Purpose: Accumulate optional request attributes before a request is built.
//! Exports: `RequestConfig`, `RequestOption`, `with_json_body`, `with_body`, `with_header`.
//! Role: Options are plain values applied in order to a default `RequestConfig`.
//! Invariants: Later options overwrite earlier ones that touch the same field.
//! Invariants: A `Content-Type` header option writes `content_type`, never `headers`.
//! Invariants: Body bytes are passed through untouched; no content validation here.
use super::transport::Body;
use std::io::Cursor;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Resolved request attributes. An empty `content_type` means unset.
#[derive(Default)]
pub struct RequestConfig {
    pub content_type: String,
    pub body: Option<Body>,
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn resolve(options: impl IntoIterator<Item = RequestOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestOption {
    Body { content_type: String, bytes: Vec<u8> },
    Header { name: String, value: String },
}

impl RequestOption {
    pub fn apply(self, config: &mut RequestConfig) {
        match self {
            RequestOption::Body {
                content_type,
                bytes,
            } => {
                config.content_type = content_type;
                config.body = Some(Box::new(Cursor::new(bytes)));
            }
            RequestOption::Header { name, value } if is_content_type(&name) => {
                config.content_type = value;
            }
            RequestOption::Header { name, value } => config.headers.push((name, value)),
        }
    }
}

fn is_content_type(name: &str) -> bool {
    name.eq_ignore_ascii_case("content-type")
}

pub fn with_json_body(bytes: impl Into<Vec<u8>>) -> RequestOption {
    with_body(JSON_CONTENT_TYPE, bytes)
}

pub fn with_body(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> RequestOption {
    RequestOption::Body {
        content_type: content_type.into(),
        bytes: bytes.into(),
    }
}

pub fn with_header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    RequestOption::Header {
        name: name.into(),
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestConfig, with_body, with_header, with_json_body};
    use std::io::Read;

    fn read_body(config: &mut RequestConfig) -> Vec<u8> {
        let mut out = Vec::new();
        config
            .body
            .as_mut()
            .expect("body")
            .read_to_end(&mut out)
            .expect("read");
        out
    }

    #[test]
    fn empty_options_leave_config_unset() {
        let config = RequestConfig::resolve([]);
        assert!(config.content_type.is_empty());
        assert!(config.body.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn json_body_sets_type_and_stream() {
        let mut config = RequestConfig::resolve([with_json_body(br#"{"a":1}"#.to_vec())]);
        assert_eq!(config.content_type, "application/json");
        assert_eq!(read_body(&mut config), br#"{"a":1}"#);
    }

    #[test]
    fn json_body_accepts_non_json_bytes() {
        let mut config = RequestConfig::resolve([with_json_body("not json")]);
        assert_eq!(config.content_type, "application/json");
        assert_eq!(read_body(&mut config), b"not json");
    }

    #[test]
    fn last_body_option_wins() {
        let mut config = RequestConfig::resolve([
            with_json_body("{}"),
            with_body("text/plain", "hello"),
        ]);
        assert_eq!(config.content_type, "text/plain");
        assert_eq!(read_body(&mut config), b"hello");
    }

    #[test]
    fn content_type_header_is_routed_to_content_type() {
        let config = RequestConfig::resolve([with_header("CONTENT-TYPE", "text/csv")]);
        assert_eq!(config.content_type, "text/csv");
        assert!(config.headers.is_empty());
        assert!(config.body.is_none());
    }

    #[test]
    fn content_type_header_and_body_follow_application_order() {
        let config = RequestConfig::resolve([
            with_json_body("[]"),
            with_header("Content-Type", "text/csv"),
        ]);
        assert_eq!(config.content_type, "text/csv");

        let config = RequestConfig::resolve([
            with_header("content-type", "text/csv"),
            with_json_body("[]"),
        ]);
        assert_eq!(config.content_type, "application/json");
    }

    #[test]
    fn headers_accumulate_in_order() {
        let config = RequestConfig::resolve([
            with_header("X-One", "1"),
            with_header("X-Two", "2"),
        ]);
        assert_eq!(
            config.headers,
            vec![
                ("X-One".to_string(), "1".to_string()),
                ("X-Two".to_string(), "2".to_string()),
            ]
        );
    }
}
