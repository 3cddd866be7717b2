//! ES|QL query tool.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::Query;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, structured_result};

/// Parameters for the ES|QL tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EsqlParams {
    /// ES|QL query, e.g. `FROM logs-* | WHERE status >= 500 | STATS c = COUNT(*) BY host | LIMIT 10`.
    pub query: String,
}

/// Turn the columnar ES|QL response into one object per row.
fn rows_from_columns(response: &Value) -> Vec<Value> {
    let columns: Vec<&str> = response["columns"]
        .as_array()
        .map(|cols| cols.iter().filter_map(|c| c["name"].as_str()).collect())
        .unwrap_or_default();

    response["values"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_array)
                .map(|row| {
                    let record: Map<String, Value> = columns
                        .iter()
                        .zip(row)
                        .map(|(name, value)| (name.to_string(), value.clone()))
                        .collect();
                    Value::Object(record)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// ES|QL query tool.
pub struct EsqlTool;

#[async_trait::async_trait]
impl ToolHandler for EsqlTool {
    const NAME: &'static str = "esql_query";
    const DESCRIPTION: &'static str = "Run an ES|QL (Elasticsearch Query Language) query and return the result rows.";

    type Params = EsqlParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, params: EsqlParams) -> CallToolResult {
        info!("Running ES|QL query");

        let query = Query::new().with("format", "json");
        let body = json!({ "query": params.query }).into();
        match client.post("/_query", Some(body), Some(&query)).await.into_result() {
            Ok(response) => {
                let rows = rows_from_columns(&response);
                let summary = format!("ES|QL returned {} row(s)", rows.len());
                structured_result(
                    summary,
                    json!({ "columns": response["columns"], "rows": rows }),
                )
            }
            Err(failure) => error_result("ES|QL query failed", &failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::{client, text};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_rows_from_columns() {
        let response = json!({
            "columns": [{"name": "host", "type": "keyword"}, {"name": "c", "type": "long"}],
            "values": [["a", 3], ["b", 1]]
        });
        assert_eq!(
            rows_from_columns(&response),
            vec![json!({"host": "a", "c": 3}), json!({"host": "b", "c": 1})]
        );
        assert!(rows_from_columns(&json!({})).is_empty());
    }

    #[tokio::test]
    async fn test_esql_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_query"))
            .and(query_param("format", "json"))
            .and(body_json(json!({"query": "FROM logs | LIMIT 1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "columns": [{"name": "message", "type": "text"}],
                "values": [["hello"]]
            })))
            .mount(&server)
            .await;

        let params = EsqlParams { query: "FROM logs | LIMIT 1".into() };
        let result = EsqlTool::execute(&client(&server), params).await;
        assert!(text(&result).starts_with("ES|QL returned 1 row(s)"));
        assert_eq!(result.structured_content.unwrap()["rows"][0]["message"], "hello");
    }
}
