//! Data shapes returned by and sent to the billing service.
//!
//! # Design
//! Fields are named exactly as on the wire. A field that may be `null` is an
//! `Option` that always serializes; a field that may be absent also skips
//! serialization when `None`. String unions are enums; timestamps are UTC
//! `DateTime`s. Amounts are integers in the smallest currency unit.

pub mod charge;
pub mod common;
pub mod customer;
pub mod entity;
pub mod invoice;
pub mod payment_intent;
pub mod payment_method;
pub mod price;
pub mod product;
pub mod subscription;

pub use charge::{Charge, Discount, DiscountCoupon, Refund};
pub use common::{Address, AuditLog, PageParams, SupportedCurrency, TaxBehavior};
pub use customer::{CreateCustomer, Customer, CustomerFilters, UpdateCustomer};
pub use entity::Entity;
pub use invoice::Invoice;
pub use payment_intent::{
    CreatePaymentIntent, PaymentIntent, PaymentIntentFilters, PaymentIntentStatus,
    UpdatePaymentIntent,
};
pub use payment_method::PaymentMethod;
pub use price::{CreatePrice, Price, PriceFilters, UpdatePrice};
pub use product::{CreateProduct, Product, ProductFilters, UpdateProduct};
pub use subscription::{
    Subscription, SubscriptionCycle, SubscriptionStateHistory, UsageRecord, UsageReport,
};
