//! Render request construction.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use url::Url;

/// REST route of the block-renderer endpoint, relative to the API base.
pub const RENDER_ROUTE: &str = "wp/v2/block-renderer";

/// HTTP methods supported by the block-renderer endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Attributes travel as query parameters.
    #[default]
    Get,
    /// Attributes travel in the JSON request body (avoids URL-length limits).
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Inputs identifying one server-side render.
///
/// Equality is deep comparison over every field; the lifecycle controller
/// uses it to decide whether an input change warrants a new fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Logical name of the server-side renderable block.
    pub block: String,
    /// Structured block attributes, if any.
    pub attributes: Option<Map<String, Value>>,
    /// HTTP method used to reach the endpoint.
    pub method: Method,
    /// Extra query arguments merged into the URL.
    pub query_args: BTreeMap<String, String>,
}

impl RenderRequest {
    /// Create a GET request for a block.
    pub fn get(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            attributes: None,
            method: Method::Get,
            query_args: BTreeMap::new(),
        }
    }

    /// Create a POST request for a block.
    pub fn post(block: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(block)
        }
    }

    /// Set the full attribute map.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Set a single attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add an extra query argument.
    pub fn with_query_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_args.insert(key.into(), value.into());
        self
    }

    /// Build the endpoint URL for this request.
    ///
    /// Always carries `context=edit`. Attributes are serialized as bracketed
    /// query pairs only for GET requests with a non-null attribute map;
    /// extra query arguments are merged in last.
    pub fn build_path(&self, base: &Url) -> Url {
        let mut url = base.clone();

        let mut path = url.path().trim_end_matches('/').to_string();
        path.push('/');
        path.push_str(RENDER_ROUTE);
        path.push('/');
        path.push_str(&self.block);
        url.set_path(&path);

        let mut query = vec![("context".to_string(), "edit".to_string())];
        if self.method == Method::Get {
            if let Some(attributes) = &self.attributes {
                for (key, value) in attributes {
                    collect_query_value(&mut query, &format!("attributes[{}]", key), value);
                }
            }
        }
        for (key, value) in &self.query_args {
            query.push((key.clone(), value.clone()));
        }

        let mut pairs = url.query_pairs_mut();
        for (key, value) in &query {
            pairs.append_pair(key, value);
        }
        drop(pairs);

        url
    }

    /// JSON body for POST requests.
    ///
    /// The `attributes` field is always present, `null` when unset, so the
    /// server can distinguish "no attributes" from a malformed request. GET
    /// requests carry no body.
    pub fn body_value(&self) -> Option<Value> {
        match self.method {
            Method::Get => None,
            Method::Post => Some(serde_json::json!({ "attributes": self.attributes })),
        }
    }
}

/// Serialize one attribute value as bracketed query pairs.
///
/// Nested maps become `attributes[a][b]=...`, arrays use numeric indices.
fn collect_query_value(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (child, value) in map {
                collect_query_value(pairs, &format!("{}[{}]", key, child), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                collect_query_value(pairs, &format!("{}[{}]", key, index), value);
            }
        }
        Value::Null => {
            pairs.push((key.to_string(), String::new()));
        }
        Value::String(text) => {
            pairs.push((key.to_string(), text.clone()));
        }
        other => {
            pairs.push((key.to_string(), other.to_string()));
        }
    }
}
