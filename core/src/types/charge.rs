//! Charges, refunds and discounts: the money movements behind invoices and
//! payment intents.

use serde::{Deserialize, Serialize};

use super::payment_intent::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Success,
    Pending,
    Failed,
}

/// What originally triggered a charge. A subscription that produced an
/// invoice that produced a payment intent still reports `subscription`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargePaymentType {
    Unknown,
    PaymentMethod,
    PaymentIntent,
    Subscription,
    Invoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub charge_id: String,
    pub transaction_id: String,
    pub transaction_type: TransactionType,
    pub payment_type: ChargePaymentType,
    pub status: ChargeStatus,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundFulfilment {
    Full,
    Partial,
    None,
}

/// Returns a previous charge to the payer, on the same payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub refund_id: String,
    pub reference_id: String,
    pub charge_id: String,
    pub status: ChargeStatus,
    pub fulfilment_type: RefundFulfilment,
    /// Smallest currency unit.
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponDurationInterval {
    Once,
    Forever,
    /// Resets on the price's recurring interval.
    Recurring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDuration {
    pub interval: CouponDurationInterval,
    /// Only meaningful for `recurring`.
    pub interval_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCoupon {
    pub coupon_id: String,
    pub reference_id: String,
    pub coupon_code: String,
    pub price_id: String,
    pub discount_amount_off: i64,
    pub discount_percent_off: f64,
    pub currency: String,
    pub duration: CouponDuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub discount_id: String,
    pub reference_id: String,
    pub customer_id: String,
    pub coupon_id: String,
    pub discount_amount: i64,
}
