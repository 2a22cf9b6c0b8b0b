//! Stored ways of collecting money from a customer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
    BankAccount,
    MobileMoney,
    Wallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardBrand {
    #[serde(rename = "visa")]
    Visa,
    #[serde(rename = "mastercard")]
    Mastercard,
    #[serde(rename = "amex")]
    Amex,
    #[serde(rename = "discover")]
    Discover,
    #[serde(rename = "diners")]
    Diners,
    #[serde(rename = "jcb")]
    Jcb,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "gh:mtn_mobile_money")]
    GhMtnMobileMoney,
    #[serde(rename = "gh:telecel_mobile_money")]
    GhTelecelMobileMoney,
    #[serde(rename = "gh:airtel_tigo_mobile_money")]
    GhAirtelTigoMobileMoney,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletBrand {
    ApplePay,
    GooglePay,
    Giropay,
    Sofort,
    Ideal,
    P24,
}

/// `brand` holds either a card network or a wallet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentBrand {
    Card(CardBrand),
    Wallet(WalletBrand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFunding {
    Credit,
    Debit,
    Prepaid,
    Unknown,
}

/// A payment method attached to a customer. When a customer has several,
/// the default one is used for automatic billing and the others are
/// fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub payment_method_id: String,
    pub reference_id: String,
    pub customer_id: String,
    pub customer_card_email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<PaymentMethodType>,
    pub brand: Option<PaymentBrand>,
    pub currency: Option<String>,
    /// ISO 3166-1 alpha-2 code of the issuer.
    pub country_of_issuance: Option<String>,
    pub bin: Option<String>,
    pub last4: Option<String>,
    pub exp_month: Option<u8>,
    pub exp_year: Option<u16>,
    pub funding: Option<CardFunding>,
    /// Provider-side handle, e.g. a Stripe payment method id or a Paystack
    /// authorization code.
    pub provider_authorisation: Option<String>,
    pub provider_signature: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
}
