//! The billing namespace: one typed client per billing resource.

pub mod customer;
pub mod payment_intent;
pub mod price;
pub mod product;
pub mod resource;

use crate::dispatcher::Dispatcher;
use crate::transport::Transport;

pub use customer::{CustomerResource, Customers};
pub use payment_intent::{PaymentIntentResource, PaymentIntents};
pub use price::{PriceResource, Prices};
pub use product::{ProductResource, Products};
pub use resource::{Resource, ResourceKind};

/// Project and entity a billing call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingOptions {
    pub project_id: String,
    pub entity_id: String,
}

impl BillingOptions {
    pub fn new(project_id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            entity_id: entity_id.into(),
        }
    }
}

/// Resource clients sharing one dispatcher.
pub struct Billing<'a, T> {
    dispatcher: &'a Dispatcher<T>,
}

impl<'a, T: Transport> Billing<'a, T> {
    pub(crate) fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub fn customer(&self) -> CustomerResource<'a, T> {
        Resource::new(self.dispatcher)
    }

    pub fn payment_intent(&self) -> PaymentIntentResource<'a, T> {
        Resource::new(self.dispatcher)
    }

    pub fn product(&self) -> ProductResource<'a, T> {
        Resource::new(self.dispatcher)
    }

    pub fn price(&self) -> PriceResource<'a, T> {
        Resource::new(self.dispatcher)
    }
}
