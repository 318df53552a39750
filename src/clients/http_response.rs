//! HTTP response type for the Levels API client.

use std::collections::HashMap;

/// Header names that carry a server-side request id.
const REQUEST_ID_HEADERS: [&str; 3] = ["x-request-id", "x-amzn-requestid", "x-amz-cf-id"];

/// A decoded response from the Levels API.
///
/// Header names are stored lower-cased. The body is the decoded JSON value,
/// unchanged.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased name to values.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns the server request id, if one of the known headers is present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        request_id(&self.headers)
    }

    /// Returns the GraphQL `errors` array of the body, if present.
    ///
    /// The Levels API reports application-level failures this way with a
    /// 200 status. The array is returned as-is.
    #[must_use]
    pub fn graphql_errors(&self) -> Option<&Vec<serde_json::Value>> {
        self.body.get("errors").and_then(serde_json::Value::as_array)
    }
}

pub(crate) fn request_id(headers: &HashMap<String, Vec<String>>) -> Option<&str> {
    REQUEST_ID_HEADERS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|values| values.first()))
        .map(String::as_str)
}
