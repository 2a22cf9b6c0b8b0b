//! Root client for the Conjoin API.
//!
//! # Design
//! `Conjoin` owns the only `Dispatcher`; resource clients borrow it, so every
//! call made through one `Conjoin` shares the same key, version and base
//! URI. Nothing here is mutable after construction, so a `Conjoin` can be
//! shared across tasks behind an `Arc` without locking.

use crate::billing::Billing;
use crate::config::{Config, ConjoinOptions};
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Debug)]
pub struct Conjoin<T = ReqwestTransport> {
    dispatcher: Dispatcher<T>,
}

impl Conjoin<ReqwestTransport> {
    /// Production endpoint, API version `v1`.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, ConjoinOptions::default())
    }

    pub fn with_options(api_key: impl Into<String>, options: ConjoinOptions) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(Config::new(api_key, options), transport))
    }

    /// Configuration from `CONJOIN_API_KEY`, `CONJOIN_API_VERSION` and
    /// `CONJOIN_API_URI`.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> Conjoin<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, transport),
        }
    }

    pub fn billing(&self) -> Billing<'_, T> {
        Billing::new(&self.dispatcher)
    }

    /// Raw access for endpoints that have no typed resource yet.
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    pub fn config(&self) -> &Config {
        self.dispatcher.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingOptions;
    use crate::test_support::StubTransport;

    const CUSTOMER: &str = r#"{"response":{"type":"SUCCESS","code":200,"message":"OK"},"data":{"customer_id":"cus_1","reference_id":"r","email":"a@b.com","payment_settings":{"default_currency":"GHS","tax_id":null}}}"#;

    fn client() -> Conjoin<StubTransport> {
        let options = ConjoinOptions::default()
            .api_version("v2")
            .dangerously_set_api_uri("http://billing.local/");
        Conjoin::with_transport(Config::new("sk_test", options), StubTransport::new(200, CUSTOMER))
    }

    #[test]
    fn new_uses_production_defaults() {
        let client = Conjoin::new("sk_test").unwrap();
        assert_eq!(client.config().api_uri(), "https://api.conjoin.com");
        assert_eq!(client.config().api_version(), "v1");
    }

    #[tokio::test]
    async fn every_resource_shares_the_configuration() {
        let client = client();
        let opts = BillingOptions::new("p", "e");
        let billing = client.billing();

        billing.customer().get("cus_1", &opts).await.unwrap();
        let _ = billing.payment_intent().get("pi_1", &opts).await;
        let _ = billing.product().get("prod_1", &opts).await;
        let _ = billing.price().get("price_1", &opts).await;

        let urls: Vec<String> = client
            .dispatcher()
            .transport()
            .requests()
            .into_iter()
            .map(|r| {
                assert_eq!(r.header("Authorization"), Some("Bearer sk_test"));
                r.url
            })
            .collect();
        assert_eq!(
            urls,
            vec![
                "http://billing.local/v2/billing/customer/p/e?customer_id=cus_1",
                "http://billing.local/v2/billing/payment-intent/p/e?payment_intent_id=pi_1",
                "http://billing.local/v2/billing/product/p/e?product_id=prod_1",
                "http://billing.local/v2/billing/price/p/e?price_id=price_1",
            ]
        );
    }

    #[test]
    fn conjoin_is_shareable_across_tasks() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Conjoin>();
    }
}
