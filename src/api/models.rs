use serde::{Deserialize, Serialize};

use crate::chat::dispatcher::QueryReply;
use crate::chat::message::Row;

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

/// Wire shape of POST /api/powerbi/query-natural.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    #[serde(default)]
    pub dax_query: Option<String>,
    #[serde(default)]
    pub execution: Option<Execution>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Execution {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl QueryResponse {
    /// Missing `execution` or `execution.rows` means no tabular data.
    pub fn into_reply(self) -> QueryReply {
        QueryReply {
            response: self.response,
            dax_query: self.dax_query,
            rows: self.execution.map(|e| e.rows).unwrap_or_default(),
        }
    }
}

/// Wire shape of GET /api/config.
#[derive(Debug, Deserialize)]
pub struct ConfigStatus {
    pub groq_configured: bool,
    pub api_key_exists: bool,
    pub groq_service_loaded: bool,
    #[serde(default)]
    pub app_name: String,
}

/// Wire shape of GET /api/powerbi/local-schema.
#[derive(Debug, Deserialize)]
pub struct SchemaEnvelope {
    pub success: bool,
    pub schema: SemanticModel,
}

#[derive(Debug, Default, Deserialize)]
pub struct SemanticModel {
    #[serde(default)]
    pub tables: Vec<SchemaTable>,
    #[serde(default)]
    pub relationships: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<SchemaColumn>,
    #[serde(default)]
    pub measures: Vec<SchemaMeasure>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "dataType", default)]
    pub data_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaMeasure {
    pub name: String,
    #[serde(default)]
    pub expression: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_decodes_with_rows_in_wire_order() {
        let body = r#"{
            "response": "Top cities by sales",
            "dax_query": "EVALUATE TOPN(5, ...)",
            "execution": { "rows": [ { "City": "Oslo", "SalesAmount": 1200 } ] }
        }"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        let reply = parsed.into_reply();
        assert_eq!(reply.response, "Top cities by sales");
        assert_eq!(reply.dax_query.as_deref(), Some("EVALUATE TOPN(5, ...)"));
        assert_eq!(reply.rows.len(), 1);
        let keys: Vec<&str> = reply.rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["City", "SalesAmount"]);
    }

    #[test]
    fn minimal_response_defaults_to_no_dax_and_no_rows() {
        let parsed: QueryResponse =
            serde_json::from_str(r#"{ "response": "Query completed" }"#).unwrap();
        let reply = parsed.into_reply();
        assert!(reply.dax_query.is_none());
        assert!(reply.rows.is_empty());
    }

    #[test]
    fn missing_rows_inside_execution_defaults_to_empty() {
        let parsed: QueryResponse =
            serde_json::from_str(r#"{ "response": "ok", "execution": {} }"#).unwrap();
        assert!(parsed.into_reply().rows.is_empty());
    }
}
