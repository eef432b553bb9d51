//! JSON-RPC 2.0 interface over line-delimited transports.
//!
//! One request per line in, one response per line out. The same handler
//! serves stdin/stdout and every accepted TCP connection; TCP connections
//! run as tokio tasks.
//!
//! Methods:
//! - `ping` -> `{}`
//! - `list_books` -> `{"books": [...]}`
//! - `count` -> `{"count": n}`
//! - `get_hadith {book, number}` -> `{"hadith": record | null}`
//! - `search {query, limit?, book?}` -> `{"results": [{hadith, score}, ...]}`

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::corpus::Catalog;
use crate::error::{ErrorCode, Result, StructuredError};
use crate::search::{scoped_records, search_or_browse};

// JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }

    fn invalid_params(id: Option<Value>, message: String) -> Self {
        let data = serde_json::to_value(StructuredError::new(ErrorCode::InvalidArgument, &message)).ok();
        Self::error(id, INVALID_PARAMS, message, data)
    }
}

#[derive(Debug, Deserialize)]
struct GetHadithParams {
    book: String,
    number: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchParams {
    query: String,
    limit: Option<usize>,
    book: Option<String>,
}

/// Request handler shared by every connection.
pub struct RpcService {
    catalog: Arc<dyn Catalog>,
    default_limit: usize,
}

impl RpcService {
    pub fn new(catalog: Arc<dyn Catalog>, default_limit: usize) -> Self {
        Self { catalog, default_limit }
    }

    /// Handle one request line.
    pub fn handle_line(&self, line: &str) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"), None);
            }
        };

        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                "Invalid JSON-RPC version".to_string(),
                None,
            );
        }

        debug!(method = %request.method, "rpc request");
        let id = request.id;
        match request.method.as_str() {
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "list_books" => {
                JsonRpcResponse::success(id, serde_json::json!({ "books": self.catalog.books() }))
            }
            "count" => {
                JsonRpcResponse::success(id, serde_json::json!({ "count": self.catalog.count() }))
            }
            "get_hadith" => match parse_params::<GetHadithParams>(&request.params) {
                Ok(p) => {
                    let hadith = self.catalog.get(&p.book, p.number);
                    JsonRpcResponse::success(id, serde_json::json!({ "hadith": hadith }))
                }
                Err(msg) => JsonRpcResponse::invalid_params(id, msg),
            },
            "search" => match parse_params::<SearchParams>(&request.params) {
                Ok(p) => {
                    let limit = p.limit.unwrap_or(self.default_limit);
                    let records = scoped_records(self.catalog.as_ref(), p.book.as_deref());
                    let results = search_or_browse(&records, &p.query, limit);
                    JsonRpcResponse::success(id, serde_json::json!({ "results": results }))
                }
                Err(msg) => JsonRpcResponse::invalid_params(id, msg),
            },
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
                None,
            ),
        }
    }

    /// Answer requests from `reader` on `writer` until EOF.
    pub fn serve_lines<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(error = %e, "rpc read error");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let payload = encode_response(&self.handle_line(&line))?;
            if writeln!(writer, "{payload}").is_err() {
                break;
            }
            writer.flush()?;
        }
        Ok(())
    }
}

/// Serialize a response, falling back to an internal error response.
fn encode_response(response: &JsonRpcResponse) -> Result<String> {
    let payload = serde_json::to_string(response).or_else(|e| {
        serde_json::to_string(&JsonRpcResponse::error(
            None,
            INTERNAL_ERROR,
            format!("Failed to serialize response: {e}"),
            None,
        ))
    })?;
    Ok(payload)
}

/// Serve on stdin/stdout.
pub fn serve_stdio(service: &RpcService) -> Result<()> {
    info!("rpc server on stdio");
    let stdin = io::stdin();
    service.serve_lines(stdin.lock(), io::stdout())
}

/// Bind `addr` and serve TCP connections, one task per connection.
pub async fn serve_tcp(service: Arc<RpcService>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "rpc server listening");
    accept_loop(listener, service).await
}

/// Accept loop over an already bound listener.
pub async fn accept_loop(listener: TcpListener, service: Arc<RpcService>) -> Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "rpc accept failed");
                continue;
            }
        };
        debug!(peer = %peer, "rpc connection opened");
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(service, stream).await {
                warn!(peer = %peer, error = %e, "rpc connection ended with error");
            }
            debug!(peer = %peer, "rpc connection closed");
        });
    }
}

async fn handle_connection(service: Arc<RpcService>, stream: TcpStream) -> Result<()> {
    let (reader, writer) = stream.into_split();
    let mut lines = tokio::io::BufReader::new(reader).lines();
    let mut writer = BufWriter::new(writer);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // Searches are CPU-bound; keep them off the reactor threads.
        let service = Arc::clone(&service);
        let response = tokio::task::spawn_blocking(move || service.handle_line(&line))
            .await
            .unwrap_or_else(|e| {
                JsonRpcResponse::error(None, INTERNAL_ERROR, format!("Request failed: {e}"), None)
            });

        let mut payload = encode_response(&response)?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

fn parse_params<T: DeserializeOwned>(params: &Value) -> std::result::Result<T, String> {
    let params = if params.is_null() { serde_json::json!({}) } else { params.clone() };
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Hadith};

    fn service() -> RpcService {
        let rec = |n, primary: &str, translated: &str| Hadith {
            book: String::new(),
            number: n,
            primary_text: primary.into(),
            translated_text: translated.into(),
        };
        let corpus = Corpus::from_books([
            (
                "bukhari",
                vec![
                    rec(1, "the sun rises", "matahari terbit"),
                    rec(2, "the moon sets", "bulan terbenam"),
                ],
            ),
            ("muslim", vec![rec(1, "the sun rises", "matahari terbenam")]),
        ]);
        RpcService::new(Arc::new(corpus), 20)
    }

    fn call(line: &str) -> JsonRpcResponse {
        service().handle_line(line)
    }

    #[test]
    fn test_parse_error() {
        let resp = call("{not json");
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[test]
    fn test_wrong_version_is_invalid_request() {
        let resp = call(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#);
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
        assert_eq!(resp.id, Some(serde_json::json!(1)));
    }

    #[test]
    fn test_unknown_method() {
        let resp = call(r#"{"jsonrpc":"2.0","id":2,"method":"delete_everything"}"#);
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_list_books_and_count() {
        let books = call(r#"{"jsonrpc":"2.0","id":1,"method":"list_books"}"#);
        assert_eq!(books.result.unwrap()["books"], serde_json::json!(["bukhari", "muslim"]));

        let count = call(r#"{"jsonrpc":"2.0","id":2,"method":"count"}"#);
        assert_eq!(count.result.unwrap()["count"], 3);
    }

    #[test]
    fn test_get_hadith_found_and_missing() {
        let found = call(
            r#"{"jsonrpc":"2.0","id":1,"method":"get_hadith","params":{"book":"muslim","number":1}}"#,
        );
        assert_eq!(found.result.unwrap()["hadith"]["id"], "matahari terbenam");

        let missing = call(
            r#"{"jsonrpc":"2.0","id":2,"method":"get_hadith","params":{"book":"muslim","number":7}}"#,
        );
        assert!(missing.error.is_none());
        assert!(missing.result.unwrap()["hadith"].is_null());
    }

    #[test]
    fn test_get_hadith_bad_params() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"get_hadith","params":{"book":"muslim"}}"#);
        let err = resp.error.unwrap();
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["code"], "INVALID_ARGUMENT");
    }

    #[test]
    fn test_search_scores_and_orders() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"search","params":{"query":"matahari"}}"#);
        let results = resp.result.unwrap()["results"].clone();
        assert_eq!(results.as_array().unwrap().len(), 2);
        assert_eq!(results[0]["hadith"]["book"], "bukhari");
        assert_eq!(results[0]["score"], 3);
        assert_eq!(results[1]["hadith"]["book"], "muslim");
    }

    #[test]
    fn test_search_empty_query_browses_with_limit() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"search","params":{"query":"","limit":2}}"#);
        let results = resp.result.unwrap()["results"].clone();
        assert_eq!(results.as_array().unwrap().len(), 2);
        assert_eq!(results[0]["score"], 0);
        assert_eq!(results[1]["hadith"]["number"], 2);
    }

    #[test]
    fn test_search_book_filter() {
        let resp = call(
            r#"{"jsonrpc":"2.0","id":1,"method":"search","params":{"query":"sun","book":"muslim"}}"#,
        );
        let results = resp.result.unwrap()["results"].clone();
        assert_eq!(results.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_serve_lines_answers_each_request() {
        let input = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"count\"}\n";
        let mut out = Vec::new();
        service().serve_lines(input.as_bytes(), &mut out).unwrap();

        let lines: Vec<JsonRpcResponse> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].id, Some(serde_json::json!(2)));
    }

    #[tokio::test]
    async fn test_tcp_connection_answers_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(accept_loop(listener, Arc::new(service())));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = tokio::io::BufReader::new(reader).lines();

        writer
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"count\"}\n\n")
            .await
            .unwrap();
        let first: JsonRpcResponse =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(first.id, Some(serde_json::json!(7)));
        assert_eq!(first.result.unwrap()["count"], 3);

        writer
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":8,\"method\":\"search\",\"params\":{\"query\":\"sun\"}}\n")
            .await
            .unwrap();
        let second: JsonRpcResponse =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(second.result.unwrap()["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_tcp_connections_are_independent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(accept_loop(listener, Arc::new(service())));

        let mut idle = TcpStream::connect(addr).await.unwrap();
        idle.write_all(b"{\"jsonrpc\":\"2.0\"").await.unwrap();

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        writer
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
            .await
            .unwrap();
        let mut lines = tokio::io::BufReader::new(reader).lines();
        let resp: JsonRpcResponse =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert!(resp.error.is_none());
    }
}
