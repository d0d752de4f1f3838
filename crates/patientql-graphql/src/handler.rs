//! `/graphql` over axum.
//!
//! - `POST /graphql` - execute a GraphQL request from a JSON body
//! - `GET /graphql` - execute a query from URL params, or serve GraphiQL
//!   when no `query` param is given

use async_graphql::dynamic::Schema;
use async_graphql::http::GraphiQLSource;
use async_graphql::parser::parse_query;
use async_graphql::parser::types::{DocumentOperations, OperationType};
use async_graphql::{Request, Response, Variables};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse};
use patientql_storage::DynStorage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GraphQLConfig;
use crate::context::{GraphQLContext, GraphQLContextBuilder};
use crate::error::GraphQLError;

/// Path the GraphQL endpoints are mounted on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Header carrying the request id set by the server middleware.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// State shared across GraphQL handlers.
#[derive(Clone)]
pub struct GraphQLState {
    /// The executable schema, built once at startup.
    pub schema: Schema,

    /// Storage injected into every request context.
    pub storage: DynStorage,

    /// GraphQL configuration.
    pub config: GraphQLConfig,
}

impl GraphQLState {
    /// Builds the schema from `config` and bundles it with `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be built.
    pub fn new(storage: DynStorage, config: GraphQLConfig) -> Result<Self, GraphQLError> {
        let schema =
            crate::PatientSchemaBuilder::new(config.to_schema_builder_config()).build()?;
        Ok(Self {
            schema,
            storage,
            config,
        })
    }
}

/// Body of `POST /graphql`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    pub operation_name: Option<String>,
    pub variables: Option<serde_json::Value>,
}

impl GraphQLRequest {
    fn into_engine_request(self, context: GraphQLContext) -> Request {
        let mut request = Request::new(self.query).data(context);
        if let Some(name) = self.operation_name {
            request = request.operation_name(name);
        }
        if let Some(vars) = self.variables {
            request = request.variables(Variables::from_json(vars));
        }
        request
    }
}

/// URL parameters of `GET /graphql`. `variables` is a JSON-encoded string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLQueryParams {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    pub variables: Option<String>,
}

impl TryFrom<GraphQLQueryParams> for GraphQLRequest {
    type Error = GraphQLError;

    fn try_from(params: GraphQLQueryParams) -> Result<Self, Self::Error> {
        let query = params
            .query
            .ok_or_else(|| GraphQLError::InvalidQuery("missing 'query' parameter".into()))?;
        let variables = params
            .variables
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| GraphQLError::InvalidQuery(format!("invalid 'variables': {e}")))?;

        Ok(Self {
            query,
            operation_name: params.operation_name,
            variables,
        })
    }
}

pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    Json(request): Json<GraphQLRequest>,
) -> axum::response::Response {
    execute_graphql(&state, &headers, request).await
}

/// Without a `query` param this serves the GraphiQL explorer when enabled.
pub async fn graphql_handler_get(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    Query(params): Query<GraphQLQueryParams>,
) -> axum::response::Response {
    if params.query.is_none() && state.config.graphiql {
        return graphiql().into_response();
    }

    let request = match GraphQLRequest::try_from(params) {
        Ok(request) => request,
        Err(e) => return error_response(&e, state.config.pretty),
    };

    if selected_operation_type(&request.query, request.operation_name.as_deref())
        == Some(OperationType::Mutation)
    {
        let mut response = error_response(
            &GraphQLError::MethodNotAllowed("mutations must be sent with POST".into()),
            state.config.pretty,
        );
        response
            .headers_mut()
            .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        return response;
    }

    execute_graphql(&state, &headers, request).await
}

/// Type of the operation `operation_name` selects in `query`.
///
/// `None` when the document does not parse or the selection is ambiguous;
/// execution then reports the problem.
fn selected_operation_type(query: &str, operation_name: Option<&str>) -> Option<OperationType> {
    let document = parse_query(query).ok()?;
    match document.operations {
        DocumentOperations::Single(op) => Some(op.node.ty),
        DocumentOperations::Multiple(ops) => match operation_name {
            Some(name) => ops
                .iter()
                .find(|(op_name, _)| op_name.as_str() == name)
                .map(|(_, op)| op.node.ty),
            None if ops.len() == 1 => ops.values().next().map(|op| op.node.ty),
            None => None,
        },
    }
}

pub fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

fn header_request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Runs one document. Execution errors travel in the `errors` array of a
/// 200 response; only failures before execution change the status.
async fn execute_graphql(
    state: &GraphQLState,
    headers: &HeaderMap,
    request: GraphQLRequest,
) -> axum::response::Response {
    let request_id = header_request_id(headers).to_owned();
    let context = match GraphQLContextBuilder::new()
        .with_storage(state.storage.clone())
        .with_request_id(request_id.clone())
        .build()
    {
        Ok(ctx) => ctx,
        Err(e) => {
            return error_response(&GraphQLError::Internal(e.to_string()), state.config.pretty);
        }
    };

    debug!(request_id = %request_id, query = %request.query, "Executing GraphQL document");
    let response: Response = state
        .schema
        .execute(request.into_engine_request(context))
        .await;

    if response.is_err() {
        debug!(
            request_id = %request_id,
            errors = response.errors.len(),
            "GraphQL response carries errors"
        );
    }

    json_response(StatusCode::OK, &response, state.config.pretty)
}

fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    pretty: bool,
) -> axum::response::Response {
    let rendered = if pretty {
        serde_json::to_string_pretty(body)
    } else {
        serde_json::to_string(body)
    };

    match rendered {
        Ok(text) => (status, [(header::CONTENT_TYPE, "application/json")], text).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize GraphQL response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"data":null,"errors":[{"message":"failed to serialize response"}]}"#,
            )
                .into_response()
        }
    }
}

fn error_response(error: &GraphQLError, pretty: bool) -> axum::response::Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
        "data": null,
        "errors": [{
            "message": error.to_string(),
            "extensions": { "code": error.error_code() }
        }]
    });
    json_response(status, &body, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_body_uses_camel_case_operation_name() {
        let request: GraphQLRequest = serde_json::from_str(
            r#"{"query": "{ Patients { id } }", "operationName": "All", "variables": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(request.operation_name.as_deref(), Some("All"));
        assert_eq!(request.variables, Some(serde_json::json!({"id": 1})));
    }

    #[test]
    fn test_get_params_decode_variables() {
        let request = GraphQLRequest::try_from(GraphQLQueryParams {
            query: Some("query One($id: Int) { Patient(id: $id) { name } }".into()),
            operation_name: Some("One".into()),
            variables: Some(r#"{"id": 1}"#.into()),
        })
        .unwrap();
        assert_eq!(request.variables, Some(serde_json::json!({"id": 1})));
    }

    #[test]
    fn test_get_params_reject_bad_input() {
        let no_query = GraphQLRequest::try_from(GraphQLQueryParams::default()).unwrap_err();
        assert_eq!(no_query.error_code(), "INVALID_QUERY");

        let bad_vars = GraphQLRequest::try_from(GraphQLQueryParams {
            query: Some("{ posts { id } }".into()),
            variables: Some("not json".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(bad_vars.to_string().contains("variables"));
    }

    #[test]
    fn test_selected_operation_type() {
        assert_eq!(
            selected_operation_type("{ Patients { id } }", None),
            Some(OperationType::Query)
        );
        assert_eq!(
            selected_operation_type(
                "mutation { createPatient(name: \"x\", email: \"y\") { id } }",
                None
            ),
            Some(OperationType::Mutation)
        );

        let doc = "query Read { posts { id } } mutation Wipe { deletePost(id: 1) { id } }";
        assert_eq!(
            selected_operation_type(doc, Some("Read")),
            Some(OperationType::Query)
        );
        assert_eq!(
            selected_operation_type(doc, Some("Wipe")),
            Some(OperationType::Mutation)
        );
        assert_eq!(selected_operation_type(doc, None), None);
        assert_eq!(selected_operation_type("{ broken", None), None);
    }

    #[test]
    fn test_method_not_allowed_status() {
        let err = GraphQLError::MethodNotAllowed("use POST".into());
        assert_eq!(err.status_code(), 405);
        assert_eq!(err.error_code(), "METHOD_NOT_ALLOWED");
        let response = error_response(&err, false);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(&GraphQLError::InvalidQuery("bad".into()), false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_request_id_falls_back_to_unknown() {
        let mut headers = HeaderMap::new();
        assert_eq!(header_request_id(&headers), "unknown");
        headers.insert(REQUEST_ID_HEADER, "req-7".parse().unwrap());
        assert_eq!(header_request_id(&headers), "req-7");
    }

    #[test]
    fn test_graphiql_points_at_endpoint() {
        let Html(page) = graphiql();
        assert!(page.contains(GRAPHQL_PATH));
    }
}
