//! Customer lifecycle against the live mock billing server.
//!
//! # Design
//! Starts the mock server on a random port in its own runtime, then drives
//! the public client over real HTTP with `ReqwestTransport`. Catches drift
//! between the client's DTOs and the server's wire format.

use conjoin::types::{CreateCustomer, CustomerFilters, PageParams, UpdateCustomer};
use conjoin::{BillingOptions, Config, Conjoin, ConjoinError, ConjoinOptions, ReqwestTransport};
use mock_billing::MOCK_API_KEY;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_billing::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(uri: &str, api_key: &str) -> Conjoin {
    let options = ConjoinOptions::default().dangerously_set_api_uri(uri);
    Conjoin::with_transport(Config::new(api_key, options), ReqwestTransport::new().unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn customer_lifecycle() {
    let uri = start_server();
    let client = client(&uri, MOCK_API_KEY);
    let opts = BillingOptions::new("proj_1", "ent_1");
    let customers = client.billing().customer();

    // Step 1: list is empty.
    let listed = customers.list(&CustomerFilters::default(), &opts).await.unwrap();
    assert!(listed.is_empty());

    // Step 2: create.
    let input = CreateCustomer {
        email: "ada@example.com".to_string(),
        name: Some("Ada".to_string()),
        ..CreateCustomer::default()
    };
    let created = customers.create(&input, &opts).await.unwrap();
    assert!(created.customer_id.starts_with("cus_"));
    assert_eq!(created.email, "ada@example.com");
    let id = created.customer_id.clone();

    // Step 3: get by id.
    let fetched = customers.get(&id, &opts).await.unwrap();
    assert_eq!(fetched, created);

    // Step 4: partial update.
    let patch = UpdateCustomer {
        phone: Some("+233200000000".to_string()),
        ..UpdateCustomer::default()
    };
    let updated = customers.update(&id, &patch, &opts).await.unwrap();
    assert_eq!(updated.phone.as_deref(), Some("+233200000000"));
    assert_eq!(updated.name.as_deref(), Some("Ada"));

    // Step 5: filtered page keeps the pagination block.
    let filters = CustomerFilters {
        email: Some("ada@example.com".to_string()),
        page: PageParams {
            limit: Some(10),
            ..PageParams::default()
        },
        ..CustomerFilters::default()
    };
    let page = customers.list_page(&filters, &opts).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total_count(), Some(1));
    assert!(page.next_page().is_none());

    // Step 6: archive hides it from the list.
    customers.archive(&id, &opts).await.unwrap();
    let listed = customers.list(&CustomerFilters::default(), &opts).await.unwrap();
    assert!(listed.is_empty());

    // Step 7: restore brings it back.
    let restored = customers.restore(&id, &opts).await.unwrap();
    assert_eq!(restored.customer_id, id);
    let listed = customers.list(&CustomerFilters::default(), &opts).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_customer_reports_the_service_message() {
    let uri = start_server();
    let client = client(&uri, MOCK_API_KEY);
    let opts = BillingOptions::new("proj_1", "ent_1");

    let err = client.billing().customer().get("cus_missing", &opts).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Customer not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_key_is_rejected() {
    let uri = start_server();
    let client = client(&uri, "sk_wrong");
    let opts = BillingOptions::new("proj_1", "ent_1");

    let err = client
        .billing()
        .customer()
        .list(&CustomerFilters::default(), &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, ConjoinError::Api { status: Some(401), .. }));
    assert_eq!(err.to_string(), "Invalid API key");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(&format!("http://{addr}"), MOCK_API_KEY);
    let opts = BillingOptions::new("proj_1", "ent_1");

    let err = client.billing().customer().get("cus_1", &opts).await.unwrap_err();
    assert!(matches!(err, ConjoinError::Transport(_)));
}
