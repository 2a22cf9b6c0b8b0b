//! In-memory stand-in for the Conjoin Billing customer endpoints.
//!
//! Speaks the real wire format: bearer authentication, the
//! `{response, data, query}` envelope on every reply (errors included), query
//! addressing for get/update and path addressing for archive/restore.
//! Customers are partitioned by `(project, entity)`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Key accepted by [`app`].
pub const MOCK_API_KEY: &str = "sk_test_mock";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub reference_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_settings: Option<Value>,
    pub payment_settings: PaymentSettings,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentSettings {
    pub default_currency: Option<String>,
    pub tax_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCustomer {
    pub email: String,
    pub reference_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Value>,
    pub shipping_address: Option<Value>,
    pub invoice_settings: Option<Value>,
    pub payment_settings: Option<PaymentSettings>,
}

#[derive(Deserialize)]
pub struct UpdateCustomer {
    pub email: Option<String>,
    pub reference_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Value>,
    pub shipping_address: Option<Value>,
    pub invoice_settings: Option<Value>,
    pub payment_settings: Option<PaymentSettings>,
}

#[derive(Clone, Debug)]
struct Record {
    customer: Customer,
    archived: bool,
}

type Scope = (String, String);
type Db = Arc<RwLock<HashMap<Scope, Vec<Record>>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Arc<str>,
}

pub fn app() -> Router {
    app_with_key(MOCK_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route(
            "/{version}/billing/customer/{project}/{entity}",
            get(get_or_list_customers)
                .post(create_customer)
                .patch(update_customer),
        )
        .route(
            "/{version}/billing/customer/{project}/{entity}/{customer_id}/archive",
            patch(archive_customer),
        )
        .route(
            "/{version}/billing/customer/{project}/{entity}/{customer_id}/restore",
            patch(restore_customer),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock billing server listening");
    }
    axum::serve(listener, app()).await
}

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    response: ResponseStatus,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<Value>,
}

#[derive(Serialize)]
struct ResponseStatus {
    #[serde(rename = "type")]
    kind: &'static str,
    code: u16,
    message: String,
}

fn response_type(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "INFO",
        200..=299 => "SUCCESS",
        300..=399 => "REDIRECT",
        400..=499 => "CLIENT_ERROR",
        _ => "SERVER_ERROR",
    }
}

fn reply<T: Serialize>(status: StatusCode, message: &str, data: T, query: Option<Value>) -> Response {
    let body = Envelope {
        response: ResponseStatus {
            kind: response_type(status),
            code: status.as_u16(),
            message: message.to_string(),
        },
        data,
        query,
    };
    (status, Json(body)).into_response()
}

fn ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    reply(status, "OK", data, None)
}

fn fail(status: StatusCode, message: &str) -> Response {
    reply(status, message, Value::Null, None)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", state.api_key);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(fail(StatusCode::UNAUTHORIZED, "Invalid API key")),
        None => Err(fail(StatusCode::UNAUTHORIZED, "Missing API key")),
    }
}

fn customer_not_found() -> Response {
    fail(StatusCode::NOT_FOUND, "Customer not found")
}

async fn create_customer(
    State(state): State<AppState>,
    Path((_version, project, entity)): Path<(String, String, String)>,
    headers: HeaderMap,
    payload: Result<Json<CreateCustomer>, JsonRejection>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return fail(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let id = Uuid::new_v4().simple().to_string();
    let customer = Customer {
        customer_id: format!("cus_{id}"),
        reference_id: input.reference_id.unwrap_or_else(|| format!("ref_{id}")),
        name: input.name,
        email: input.email,
        phone: input.phone,
        address: input.address,
        shipping_address: input.shipping_address,
        invoice_settings: input.invoice_settings,
        payment_settings: input.payment_settings.unwrap_or_default(),
    };
    state
        .db
        .write()
        .await
        .entry((project, entity))
        .or_default()
        .push(Record {
            customer: customer.clone(),
            archived: false,
        });
    ok(StatusCode::CREATED, customer)
}

async fn get_or_list_customers(
    State(state): State<AppState>,
    Path((_version, project, entity)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let db = state.db.read().await;
    let records = db.get(&(project, entity)).map(Vec::as_slice).unwrap_or_default();

    if let Some(id) = query.get("customer_id") {
        return match records.iter().find(|r| &r.customer.customer_id == id) {
            Some(record) => ok(StatusCode::OK, &record.customer),
            None => customer_not_found(),
        };
    }

    let wanted = |field: &str, value: &str| query.get(field).map_or(true, |want| want == value);
    let visible: Vec<&Customer> = records
        .iter()
        .filter(|r| !r.archived)
        .map(|r| &r.customer)
        .filter(|c| wanted("email", &c.email) && wanted("reference_id", &c.reference_id))
        .collect();

    let offset = match parse_number(&query, "offset") {
        Ok(n) => n.unwrap_or(0),
        Err(denied) => return denied,
    };
    let limit = match parse_number(&query, "limit") {
        Ok(n) => n.unwrap_or(visible.len()),
        Err(denied) => return denied,
    };
    let page: Vec<&Customer> = visible.iter().skip(offset).take(limit).copied().collect();

    let mut page_query = serde_json::json!({ "total_count": visible.len() });
    if offset + page.len() < visible.len() {
        page_query["next_page"] = serde_json::json!({ "offset": offset + page.len(), "limit": limit });
    }
    reply(StatusCode::OK, "OK", page, Some(page_query))
}

fn parse_number(query: &HashMap<String, String>, key: &str) -> Result<Option<usize>, Response> {
    match query.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| fail(StatusCode::BAD_REQUEST, &format!("{key} must be a number"))),
    }
}

async fn update_customer(
    State(state): State<AppState>,
    Path((_version, project, entity)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    payload: Result<Json<UpdateCustomer>, JsonRejection>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Some(id) = query.get("customer_id") else {
        return fail(StatusCode::BAD_REQUEST, "customer_id is required");
    };
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return fail(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let mut db = state.db.write().await;
    let Some(record) = db
        .get_mut(&(project, entity))
        .and_then(|records| records.iter_mut().find(|r| &r.customer.customer_id == id))
    else {
        return customer_not_found();
    };
    let customer = &mut record.customer;
    if let Some(email) = input.email {
        customer.email = email;
    }
    if let Some(reference_id) = input.reference_id {
        customer.reference_id = reference_id;
    }
    if input.name.is_some() {
        customer.name = input.name;
    }
    if input.phone.is_some() {
        customer.phone = input.phone;
    }
    if input.address.is_some() {
        customer.address = input.address;
    }
    if input.shipping_address.is_some() {
        customer.shipping_address = input.shipping_address;
    }
    if input.invoice_settings.is_some() {
        customer.invoice_settings = input.invoice_settings;
    }
    if let Some(settings) = input.payment_settings {
        customer.payment_settings = settings;
    }
    ok(StatusCode::OK, customer.clone())
}

async fn set_archived(
    state: AppState,
    headers: HeaderMap,
    (project, entity, id): (String, String, String),
    archived: bool,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let mut db = state.db.write().await;
    match db
        .get_mut(&(project, entity))
        .and_then(|records| records.iter_mut().find(|r| r.customer.customer_id == id))
    {
        Some(record) => {
            record.archived = archived;
            ok(StatusCode::OK, record.customer.clone())
        }
        None => customer_not_found(),
    }
}

async fn archive_customer(
    State(state): State<AppState>,
    Path((_version, project, entity, id)): Path<(String, String, String, String)>,
    headers: HeaderMap,
) -> Response {
    set_archived(state, headers, (project, entity, id), true).await
}

async fn restore_customer(
    State(state): State<AppState>,
    Path((_version, project, entity, id)): Path<(String, String, String, String)>,
    headers: HeaderMap,
) -> Response {
    set_archived(state, headers, (project, entity, id), false).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_omits_absent_optionals() {
        let customer = Customer {
            customer_id: "cus_1".to_string(),
            reference_id: "ref_1".to_string(),
            name: None,
            email: "a@b.com".to_string(),
            phone: None,
            address: None,
            shipping_address: None,
            invoice_settings: None,
            payment_settings: PaymentSettings::default(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["customer_id"], "cus_1");
        assert!(json.get("name").is_none());
        assert!(json["payment_settings"]["tax_id"].is_null());
    }

    #[test]
    fn response_type_follows_status_class() {
        assert_eq!(response_type(StatusCode::OK), "SUCCESS");
        assert_eq!(response_type(StatusCode::CREATED), "SUCCESS");
        assert_eq!(response_type(StatusCode::NOT_FOUND), "CLIENT_ERROR");
        assert_eq!(response_type(StatusCode::BAD_GATEWAY), "SERVER_ERROR");
        assert_eq!(response_type(StatusCode::PERMANENT_REDIRECT), "REDIRECT");
    }

    #[test]
    fn create_customer_requires_email() {
        let result: Result<CreateCustomer, _> = serde_json::from_str(r#"{"name":"Ada"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_customer_all_fields_optional() {
        let input: UpdateCustomer = serde_json::from_str("{}").unwrap();
        assert!(input.email.is_none());
        assert!(input.payment_settings.is_none());
    }
}
