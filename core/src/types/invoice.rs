//! Invoices: formal payment requests, one-off or produced by subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subscription::InvoicingOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Uncollectible,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfPaperSize {
    A4,
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmartRetryStrategy {
    Aggressive,
    Moderate,
    Conservative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticFinalisation {
    pub is_enabled: bool,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub price_id: Option<String>,
    pub discount_id: Option<String>,
    pub currency: String,
    pub unit_price: i64,
    pub quantity: u64,
    pub discount_amount: i64,
    /// Before taxes.
    pub amount: i64,
    pub amount_after_taxes: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePaymentSettings {
    /// Overrides the customer's invoice setting when present.
    pub allow_multiple_payment_methods: Option<bool>,
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceEmailSettings {
    pub send_email_when_finalised: bool,
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDisplaySettings {
    pub pdf_paper_size: PdfPaperSize,
}

/// An invoice carries either `price_ids` (one-off) or a `subscription_id`,
/// never both. Amounts are in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub customer_id: String,
    #[serde(default)]
    pub price_ids: Vec<String>,
    pub subscription_id: Option<String>,
    pub subtotal: i64,
    pub tax_amount: i64,
    pub amount_due: i64,
    pub amount_paid: i64,
    pub amount_remaining: i64,
    pub currency: String,
    pub charge_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub description: String,
    pub footer_text: Option<String>,
    pub invoice_number: String,
    pub automatic_finalisation: AutomaticFinalisation,
    pub status: InvoiceStatus,
    pub invoicing_option: InvoicingOption,
    pub invoice_url: Option<String>,
    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,
    pub attempted_at: Option<DateTime<Utc>>,
    pub retry_count: u32,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_paid: bool,
    pub is_paid_without_charge: bool,
    pub payment_method_id: Option<String>,
    pub payment_settings: InvoicePaymentSettings,
    pub email_settings: InvoiceEmailSettings,
    pub display_settings: InvoiceDisplaySettings,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_an_open_invoice() {
        let invoice: Invoice = serde_json::from_value(json!({
            "invoice_id": "in_1",
            "customer_id": "cus_1",
            "price_ids": [],
            "subscription_id": "sub_1",
            "subtotal": 1000,
            "tax_amount": 150,
            "amount_due": 1150,
            "amount_paid": 0,
            "amount_remaining": 1150,
            "currency": "GHS",
            "charge_id": null,
            "payment_intent_id": null,
            "description": "January",
            "footer_text": null,
            "invoice_number": "INV-0001",
            "automatic_finalisation": {"is_enabled": true, "date": "2025-01-01T01:00:00Z"},
            "status": "open",
            "invoicing_option": "automatic_charge",
            "invoice_url": "https://pay.example/in_1",
            "line_items": [{
                "price_id": "price_1", "discount_id": null, "currency": "GHS",
                "unit_price": 1000, "quantity": 1, "discount_amount": 0,
                "amount": 1000, "amount_after_taxes": 1150, "description": "Plan A"
            }],
            "attempted_at": null,
            "retry_count": 0,
            "custom_fields": [{"name": "PO", "value": "42"}],
            "due_date": null,
            "is_paid": false,
            "is_paid_without_charge": false,
            "payment_method_id": null,
            "payment_settings": {"allow_multiple_payment_methods": null, "payment_url": null},
            "email_settings": {"send_email_when_finalised": true, "customer_email": "a@b.com"},
            "display_settings": {"pdf_paper_size": "a4"}
        }))
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Open);
        assert_eq!(invoice.invoicing_option, InvoicingOption::AutomaticCharge);
        assert!(invoice.automatic_finalisation.date.is_some());
        assert_eq!(invoice.line_items[0].amount_after_taxes, 1150);
        assert_eq!(invoice.display_settings.pdf_paper_size, PdfPaperSize::A4);
    }
}
