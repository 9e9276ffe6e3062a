//! Framework-agnostic request snapshots and method/encoding dispatch.
//!
//! A [`RequestDescriptor`] is the only thing the resolver knows about an
//! HTTP request: method, ordered query pairs, a body-parameter mapping, and
//! whether that body was JSON. The hosting framework builds it (see the
//! `extract` module for the axum path); the resolver never touches the
//! originating request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only snapshot of an inbound request's argument sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method token, verbatim and case-sensitive.
    pub method: String,

    /// Query pairs in their original order.
    #[serde(default)]
    pub query_params: Vec<(String, String)>,

    /// Whether the body carried a JSON content type.
    #[serde(default)]
    pub is_json: bool,

    /// Body parameters; only meaningful for POST/PUT. Iteration follows the
    /// mapping's natural order, which callers must not rely on beyond
    /// determinism within a single parse.
    #[serde(default)]
    pub body_params: Map<String, Value>,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>) -> Self {
        RequestDescriptor {
            method: method.into(),
            ..RequestDescriptor::default()
        }
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query_params = pairs;
        self
    }

    pub fn with_json_body(mut self, body: Map<String, Value>) -> Self {
        self.is_json = true;
        self.body_params = body;
        self
    }

    pub fn with_form_body(mut self, body: Map<String, Value>) -> Self {
        self.is_json = false;
        self.body_params = body;
        self
    }

    /// Ordered (name, raw value) pairs for this request, selected by its
    /// [`ParamSource`]. Pure: same descriptor, same pairs.
    pub fn raw_pairs(&self) -> Vec<(String, String)> {
        match ParamSource::classify(&self.method, self.is_json) {
            ParamSource::Query => self.query_params.clone(),
            ParamSource::JsonBody | ParamSource::FormBody => self
                .body_params
                .iter()
                .map(|(name, value)| (name.clone(), raw_text(value)))
                .collect(),
            ParamSource::Empty => Vec::new(),
        }
    }
}

/// Where a request's argument values are read from.
///
/// Closed over the methods that carry arguments; every other method
/// (HEAD, DELETE, PATCH, anything nonstandard) maps to [`ParamSource::Empty`]
/// and extracts nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// GET: the query string.
    Query,
    /// POST/PUT with a JSON body: the decoded body object.
    JsonBody,
    /// POST/PUT otherwise: the form-encoded body mapping.
    FormBody,
    /// Any other method: no arguments.
    Empty,
}

impl ParamSource {
    /// Classify a request. Case-sensitive on the method token: `get` is not
    /// `GET`.
    pub fn classify(method: &str, is_json: bool) -> ParamSource {
        match method {
            "GET" => ParamSource::Query,
            "POST" | "PUT" if is_json => ParamSource::JsonBody,
            "POST" | "PUT" => ParamSource::FormBody,
            _ => ParamSource::Empty,
        }
    }
}

/// Raw string form of a body value: strings verbatim, any other value as
/// its compact JSON text.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classification_matrix() {
        assert_eq!(ParamSource::classify("GET", false), ParamSource::Query);
        assert_eq!(ParamSource::classify("GET", true), ParamSource::Query);
        assert_eq!(ParamSource::classify("POST", true), ParamSource::JsonBody);
        assert_eq!(ParamSource::classify("POST", false), ParamSource::FormBody);
        assert_eq!(ParamSource::classify("PUT", true), ParamSource::JsonBody);
        assert_eq!(ParamSource::classify("PUT", false), ParamSource::FormBody);
        assert_eq!(ParamSource::classify("HEAD", false), ParamSource::Empty);
        assert_eq!(ParamSource::classify("DELETE", false), ParamSource::Empty);
        assert_eq!(ParamSource::classify("PATCH", true), ParamSource::Empty);
        // Case-sensitive on purpose.
        assert_eq!(ParamSource::classify("get", false), ParamSource::Empty);
    }

    #[test]
    fn get_pairs_preserve_query_order() {
        let descriptor = RequestDescriptor::new("GET").with_query(vec![
            ("b".to_owned(), "2".to_owned()),
            ("a".to_owned(), "1".to_owned()),
        ]);
        assert_eq!(
            descriptor.raw_pairs(),
            vec![
                ("b".to_owned(), "2".to_owned()),
                ("a".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn post_pairs_come_from_body_not_query() {
        let mut body = Map::new();
        body.insert("username".to_owned(), json!("lib"));

        let descriptor = RequestDescriptor::new("POST")
            .with_query(vec![("ignored".to_owned(), "x".to_owned())])
            .with_json_body(body);

        assert_eq!(
            descriptor.raw_pairs(),
            vec![("username".to_owned(), "lib".to_owned())]
        );
    }

    #[test]
    fn head_yields_no_pairs_regardless_of_content() {
        let mut body = Map::new();
        body.insert("username".to_owned(), json!("lib"));

        let descriptor = RequestDescriptor::new("HEAD")
            .with_query(vec![("username".to_owned(), "lib".to_owned())])
            .with_json_body(body);

        assert!(descriptor.raw_pairs().is_empty());
    }

    #[test]
    fn non_string_body_values_flatten_to_json_text() {
        let mut body = Map::new();
        body.insert("retries".to_owned(), json!(3));
        body.insert("force".to_owned(), json!(true));
        body.insert("tags".to_owned(), json!(["a", "b"]));

        let descriptor = RequestDescriptor::new("POST").with_json_body(body);
        let pairs = descriptor.raw_pairs();

        assert!(pairs.contains(&("retries".to_owned(), "3".to_owned())));
        assert!(pairs.contains(&("force".to_owned(), "true".to_owned())));
        assert!(pairs.contains(&("tags".to_owned(), "[\"a\",\"b\"]".to_owned())));
    }
}
