use super::resource::{Resource, ResourceKind};
use crate::types::{CreatePaymentIntent, PaymentIntent, PaymentIntentFilters, UpdatePaymentIntent};

/// `billing/payment-intent`, addressed by `payment_intent_id`.
#[derive(Debug, Clone, Copy)]
pub struct PaymentIntents;

impl ResourceKind for PaymentIntents {
    const SEGMENT: &'static str = "payment-intent";
    const ID_FIELD: &'static str = "payment_intent_id";

    type Entity = PaymentIntent;
    type Create = CreatePaymentIntent;
    type Update = UpdatePaymentIntent;
    type Filters = PaymentIntentFilters;
}

pub type PaymentIntentResource<'a, T> = Resource<'a, PaymentIntents, T>;
