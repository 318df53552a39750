//! The JSON body of a GraphQL request.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::queries::QueryTemplate;

/// A GraphQL request body: `{operationName?, query, variables}`.
///
/// `operationName` is left out of the JSON when it is `None`.
///
/// # Example
///
/// ```rust
/// use levels_api::clients::graphql::GraphqlRequest;
/// use serde_json::json;
///
/// let request = GraphqlRequest::new("query Me { me { id } }").with_operation_name("Me");
///
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     json!({ "operationName": "Me", "query": "query Me { me { id } }", "variables": {} })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    /// Operation to run when the document defines several.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// The GraphQL document.
    pub query: String,
    /// Variables for the operation.
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    /// Creates a request for `query` with no operation name and no variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Creates a request from a catalog template and its resolved variables.
    #[must_use]
    pub fn from_template(template: &QueryTemplate, variables: Map<String, Value>) -> Self {
        Self {
            operation_name: template.operation_name().map(String::from),
            query: template.document().to_string(),
            variables,
        }
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Replaces the variables.
    #[must_use]
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }
}
