//! Turns a resource-relative path plus options into one HTTP exchange and
//! normalises the outcome.
//!
//! # Design
//! The work is split the same way for every call:
//! - `build_request` resolves the URL, merges headers and serializes the
//!   body. It is pure and does no I/O.
//! - the transport performs exactly one exchange.
//! - `parse_response` decides success from the transport status alone
//!   (`[200, 300)`) and decodes the envelope.
//!
//! `fetch_data` and `fetch_envelope` are the two public entry points; the
//! first unwraps `data`, the second keeps the pagination block and the
//! response classification.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, field, instrument, warn, Span};
use url::Url;

use crate::config::Config;
use crate::envelope::{Envelope, ResponseType};
use crate::error::{ConjoinError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Per-call request settings.
///
/// `headers` are layered over `Authorization` and `Content-Type` and replace
/// them when a name matches. `body` is ignored for `GET`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn patch() -> Self {
        Self::new(HttpMethod::Patch)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| ConjoinError::Serialization(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Adds every field of `query` as a query parameter. `query` must
    /// serialize to a JSON object; `null` fields are skipped.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        let value =
            serde_json::to_value(query).map_err(|e| ConjoinError::Serialization(e.to_string()))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    if let Some(text) = query_text(&value) {
                        self.set_query(key, text);
                    }
                }
            }
            other => {
                return Err(ConjoinError::Serialization(format!(
                    "query must be an object, got {other}"
                )))
            }
        }
        Ok(self)
    }

    /// Sets one query parameter, replacing an earlier value for the same key.
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_query(key.into(), value.to_string());
        self
    }

    fn set_query(&mut self, key: String, value: String) {
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.query.push((key, value)),
        }
    }
}

/// String form of a query value: strings verbatim, scalars as JSON text,
/// arrays comma-joined, objects as compact JSON. Integral floats drop the
/// fraction (`1.0` is `1`).
fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Some(f.to_string()),
            _ => Some(n.to_string()),
        },
        Value::Bool(_) | Value::Object(_) => Some(value.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

/// A failure needs only `response.message`; `data` may be absent or of any
/// shape, and `type` and `code` are read when they are well formed.
#[derive(Deserialize)]
struct ErrorBody {
    response: ErrorStatus,
}

#[derive(Deserialize)]
struct ErrorStatus {
    message: String,
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    code: Value,
}

/// Issues requests on behalf of every resource client.
#[derive(Debug)]
pub struct Dispatcher<T> {
    config: Config,
    transport: T,
}

impl<T> Dispatcher<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_request(&self, path: &str, options: &RequestOptions) -> Result<HttpRequest> {
        let raw = format!(
            "{}/{}/{}",
            self.config.api_uri(),
            self.config.api_version(),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| ConjoinError::InvalidUrl(format!("{raw}: {e}")))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                options
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key()),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        for (name, value) in &options.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(existing) => *existing = (name.clone(), value.clone()),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        let body = match (&options.method, &options.body) {
            (HttpMethod::Get, _) | (_, None) => None,
            (_, Some(body)) => Some(
                serde_json::to_string(body)
                    .map_err(|e| ConjoinError::Serialization(e.to_string()))?,
            ),
        };

        Ok(HttpRequest {
            method: options.method,
            url: url.into(),
            headers,
            body,
        })
    }

    pub fn parse_response<D: DeserializeOwned>(&self, response: HttpResponse) -> Result<Envelope<D>> {
        if !response.is_success() {
            let ErrorBody { response: error } = serde_json::from_str(&response.body)
                .map_err(|e| ConjoinError::Deserialization(e.to_string()))?;
            let code = error.code.as_u64().and_then(|c| u16::try_from(c).ok());
            warn!(
                status = ?response.status,
                code = ?code,
                "request rejected by the billing service"
            );
            return Err(ConjoinError::Api {
                status: response.status,
                kind: error.kind.as_str().map(ResponseType::from),
                code,
                message: error.message,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ConjoinError::Deserialization(e.to_string()))
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Performs the call and returns the whole envelope.
    #[instrument(
        name = "conjoin_request",
        skip_all,
        fields(
            http.method = %options.method,
            http.path = path,
            http.status_code = field::Empty,
        )
    )]
    pub async fn fetch_envelope<D: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Envelope<D>> {
        let request = self.build_request(path, &options)?;
        debug!(url = %request.url, has_body = request.body.is_some(), "dispatching");

        let response = self.transport.execute(request).await?;
        if let Some(status) = response.status {
            Span::current().record("http.status_code", status);
        }
        self.parse_response(response)
    }

    /// Performs the call and returns only `data`.
    pub async fn fetch_data<D: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<D> {
        self.fetch_envelope(path, options).await.map(Envelope::into_data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::config::ConjoinOptions;
    use crate::test_support::StubTransport;

    const OK_CUSTOMER: &str = r#"{"response":{"type":"SUCCESS","code":200,"message":"OK"},"data":{"customer_id":"cus_1","email":"a@b.com"}}"#;
    const NOT_FOUND: &str = r#"{"response":{"type":"CLIENT_ERROR","code":404,"message":"Customer not found"},"data":null}"#;

    fn dispatcher(transport: StubTransport) -> Dispatcher<StubTransport> {
        let options = ConjoinOptions::default().dangerously_set_api_uri("http://localhost:3000");
        Dispatcher::new(Config::new("sk_test", options), transport)
    }

    fn offline() -> Dispatcher<StubTransport> {
        dispatcher(StubTransport::new(200, OK_CUSTOMER))
    }

    #[test]
    fn url_joins_uri_version_and_path() {
        let req = offline()
            .build_request("/billing/customer/p1/e1", &RequestOptions::get())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/billing/customer/p1/e1");
        assert_eq!(req.method, HttpMethod::Get);

        let req = offline()
            .build_request("billing/customer/p1/e1", &RequestOptions::get())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/billing/customer/p1/e1");
    }

    #[test]
    fn default_headers_are_always_present() {
        let req = offline().build_request("billing", &RequestOptions::get()).unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer sk_test"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn caller_headers_layer_over_defaults() {
        let options = RequestOptions::get()
            .header("content-type", "text/plain")
            .header("Idempotency-Key", "abc");
        let req = offline().build_request("billing", &options).unwrap();
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
        assert_eq!(req.header("Authorization"), Some("Bearer sk_test"));
        assert_eq!(req.header("idempotency-key"), Some("abc"));
        assert_eq!(req.headers.len(), 3);
    }

    #[test]
    fn get_never_carries_a_body() {
        let options = RequestOptions::get().body(&json!({"ignored": true})).unwrap();
        let req = offline().build_request("billing", &options).unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn non_get_body_is_serialized_json() {
        let payload = json!({"email": "a@b.com", "name": "Ada"});
        for options in [RequestOptions::post(), RequestOptions::patch(), RequestOptions::put()] {
            let options = options.body(&payload).unwrap();
            let req = offline().build_request("billing", &options).unwrap();
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(sent, payload);
        }
    }

    #[test]
    fn non_get_without_body_sends_nothing() {
        let req = offline().build_request("billing", &RequestOptions::patch()).unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn query_values_are_coerced_to_strings() {
        let options = RequestOptions::get()
            .query(&json!({"limit": 10, "active": true, "email": "a b@c.com", "skip": null}))
            .unwrap();
        let req = offline().build_request("billing", &options).unwrap();
        let url = Url::parse(&req.url).unwrap();
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("active".to_string(), "true".to_string()),
                ("email".to_string(), "a b@c.com".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn single_numeric_query_renders_plainly() {
        let options = RequestOptions::get().query_param("limit", 10);
        let req = offline().build_request("billing/customer/p1/e1", &options).unwrap();
        assert!(req.url.ends_with("/billing/customer/p1/e1?limit=10"), "{}", req.url);
    }

    #[test]
    fn array_query_values_are_comma_joined() {
        assert_eq!(query_text(&json!(["a", 1, true])), Some("a,1,true".to_string()));
        assert_eq!(query_text(&json!({"k": 1})), Some(r#"{"k":1}"#.to_string()));
    }

    #[test]
    fn repeated_query_key_keeps_the_last_value() {
        let options = RequestOptions::get()
            .query_param("limit", 10)
            .query(&json!({"limit": 25, "email": "a@b.com"}))
            .unwrap()
            .query_param("email", "c@d.com");
        assert_eq!(
            options.query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("email".to_string(), "c@d.com".to_string()),
            ]
        );
        let req = offline().build_request("billing", &options).unwrap();
        assert!(req.url.ends_with("?limit=25&email=c%40d.com"), "{}", req.url);
    }

    #[test]
    fn integral_floats_render_without_a_fraction() {
        assert_eq!(query_text(&json!(1.0)), Some("1".to_string()));
        assert_eq!(query_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(query_text(&json!(-3)), Some("-3".to_string()));
        assert_eq!(query_text(&json!([1.0, 2.0])), Some("1,2".to_string()));
    }

    #[test]
    fn non_object_query_is_rejected() {
        let err = RequestOptions::get().query(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConjoinError::Serialization(_)));
    }

    #[test]
    fn success_boundaries() {
        let d = offline();
        for status in [200, 201, 299] {
            let parsed: Envelope<Value> = d.parse_response(HttpResponse::new(status, OK_CUSTOMER)).unwrap();
            assert_eq!(parsed.data["customer_id"], "cus_1");
        }
        for status in [199, 300, 404, 500] {
            let err = d
                .parse_response::<Value>(HttpResponse::new(status, NOT_FOUND))
                .unwrap_err();
            assert_eq!(err.status(), Some(status), "status {status}");
        }
    }

    #[test]
    fn missing_status_is_a_failure() {
        let response = HttpResponse {
            status: None,
            headers: Vec::new(),
            body: NOT_FOUND.to_string(),
        };
        let err = offline().parse_response::<Value>(response).unwrap_err();
        assert_eq!(err.to_string(), "Customer not found");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn failure_uses_transport_status_not_envelope_type() {
        // Envelope claims success, status says otherwise.
        let err = offline()
            .parse_response::<Value>(HttpResponse::new(400, OK_CUSTOMER))
            .unwrap_err();
        match err {
            ConjoinError::Api { kind, message, .. } => {
                assert_eq!(kind, Some(ResponseType::Success));
                assert_eq!(message, "OK");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_propagates_the_parse_failure() {
        let err = offline()
            .parse_response::<Value>(HttpResponse::new(502, "<html>bad gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, ConjoinError::Deserialization(_)));
    }

    #[test]
    fn unknown_response_type_does_not_fail_a_success() {
        let body = r#"{"response":{"type":"OK","code":200,"message":"fine"},"data":{"id":1}}"#;
        let parsed: Envelope<Value> = offline().parse_response(HttpResponse::new(200, body)).unwrap();
        assert_eq!(parsed.data, json!({"id": 1}));
        assert_eq!(parsed.response.kind, Some(ResponseType::Other("OK".to_string())));
    }

    #[test]
    fn unrecognised_sort_order_does_not_fail_a_success() {
        let body = r#"{"response":{"type":"SUCCESS","code":200,"message":"OK"},"data":[],
            "query":{"next_page":{"cursor":"c2","sort_order":"ASC"}}}"#;
        let parsed: Envelope<Vec<Value>> = offline().parse_response(HttpResponse::new(200, body)).unwrap();
        assert_eq!(parsed.next_page().unwrap().cursor.as_deref(), Some("c2"));
    }

    #[test]
    fn unknown_error_type_keeps_the_service_message() {
        let body = r#"{"response":{"type":"VALIDATION_ERROR","code":422,"message":"email is invalid"}}"#;
        let err = offline()
            .parse_response::<Value>(HttpResponse::new(422, body))
            .unwrap_err();
        match err {
            ConjoinError::Api { status, kind, code, message } => {
                assert_eq!(status, Some(422));
                assert_eq!(kind, Some(ResponseType::Other("VALIDATION_ERROR".to_string())));
                assert_eq!(code, Some(422));
                assert_eq!(message, "email is invalid");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn error_needs_only_a_message() {
        let body = r#"{"response":{"message":"rate limited","code":"E_RATE"}}"#;
        let err = offline()
            .parse_response::<Value>(HttpResponse::new(429, body))
            .unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
        assert!(matches!(err, ConjoinError::Api { kind: None, code: None, .. }));
    }

    #[tokio::test]
    async fn not_found_rejects_with_service_message() {
        let d = dispatcher(StubTransport::new(404, NOT_FOUND));
        let err = d
            .fetch_data::<Value>("billing/customer/p1/e1", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Customer not found");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fetch_data_unwraps_the_payload() {
        let d = offline();
        let data: Value = d
            .fetch_data("billing/customer/p1/e1", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(data, json!({"customer_id": "cus_1", "email": "a@b.com"}));
    }

    #[tokio::test]
    async fn fetch_envelope_returns_the_whole_body() {
        let d = offline();
        let envelope: Envelope<Value> = d
            .fetch_envelope("billing/customer/p1/e1", RequestOptions::get())
            .await
            .unwrap();
        let expected: Value = serde_json::from_str(OK_CUSTOMER).unwrap();
        assert_eq!(serde_json::to_value(&envelope).unwrap(), expected);
    }

    #[tokio::test]
    async fn fetch_envelope_keeps_unmodelled_keys() {
        let body = r#"{"response":{"type":"SUCCESS","code":200,"message":"OK","request_id":"r1"},
            "data":{"customer_id":"cus_1"},"query":null,"meta":{"x":1}}"#;
        let d = dispatcher(StubTransport::new(200, body));
        let envelope: Envelope<Value> = d
            .fetch_envelope("billing/customer/p1/e1", RequestOptions::get())
            .await
            .unwrap();
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(serde_json::to_value(&envelope).unwrap(), expected);
    }

    #[tokio::test]
    async fn one_transport_call_per_dispatch() {
        let d = dispatcher(StubTransport::new(500, NOT_FOUND));
        let _ = d.fetch_data::<Value>("billing", RequestOptions::get()).await;
        assert_eq!(d.transport().requests().len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn api_key_never_reaches_the_logs() {
        let d = offline();
        let _: Value = d.fetch_data("billing", RequestOptions::get()).await.unwrap();
        assert!(logs_contain("dispatching"));
        assert!(!logs_contain("sk_test"));
    }
}
