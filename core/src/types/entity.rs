//! Billing entities: the business account configured for payments,
//! payouts, invoicing and compliance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Address;
use super::invoice::{PdfPaperSize, SmartRetryStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Company,
    Individual,
    NonProfit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStructure {
    MultiMemberLlc,
    SingleMemberLlc,
    Partnership,
    PrivateCorporation,
    PublicCorporation,
    SoleProprietorship,
    NonProfit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationDocumentType {
    GovernmentId,
    DriversLicense,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutInterval {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountHolderType {
    Individual,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionType {
    Fraud,
    Compliance,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Payments,
    Payouts,
    CardIssuing,
    TaxReporting,
    Subscriptions,
    Invoicing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceNumberDelegation {
    CustomerBased,
    EntityBased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub card_payments: bool,
    pub bank_account_payments: bool,
    pub mobile_money_payments: bool,
    pub transfers: bool,
    pub card_issuing: bool,
    pub tax_reporting: bool,
    pub subscriptions: bool,
    pub invoicing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDocument {
    pub document_id: Option<String>,
    pub document_type: Option<VerificationDocumentType>,
    pub front_url: Option<String>,
    pub back_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub is_verified: bool,
    pub document: VerificationDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub registration_number: String,
    pub structure: BusinessStructure,
    pub tin: String,
    pub website_url: Option<String>,
    pub address: Address,
    pub verification: Verification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRelationship {
    pub title: String,
    pub is_owner: bool,
    pub is_director: bool,
    pub is_executive: bool,
    pub ownership_percentage: f64,
}

/// A person attached to the account (owner, director, executive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub person_id: String,
    /// Timestamp at which the person became account manager.
    pub is_account_manager: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: Address,
    pub gender: String,
    pub dob: Option<DateTime<Utc>>,
    pub is_politically_exposed: bool,
    pub tin: String,
    pub account_relationship: AccountRelationship,
    pub nationality: String,
    pub verification: Verification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAgreement {
    pub is_accepted: bool,
    pub accepted_at: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    pub business_type: BusinessType,
    /// Merchant category code.
    pub mcc: Option<String>,
    pub capabilities: Capabilities,
    pub company: Company,
    #[serde(default)]
    pub individuals: Vec<Individual>,
    pub country: String,
    pub service_agreement: ServiceAgreement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsSettings {
    pub is_enabled: bool,
    pub statement_descriptor: Option<String>,
    pub allow_multiple_payment_methods: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSchedule {
    pub interval: PayoutInterval,
    pub day_of_week: Option<Weekday>,
    pub day_of_month: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBankAccount {
    pub bank_id: Option<String>,
    pub last_4: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<AccountHolderType>,
    pub routing_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutsSettings {
    pub is_enabled: bool,
    pub debit_negative_balances: bool,
    pub schedule: PayoutSchedule,
    pub bank_account: PayoutBankAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIssuingSettings {
    pub is_enabled: bool,
    pub service_agreement: ServiceAgreement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReportingSettings {
    pub is_enabled: bool,
    pub merchant_tax_number: Option<String>,
    pub service_agreement: ServiceAgreement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRenewalNotifications {
    pub is_enabled: bool,
    pub days_before: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionsSettings {
    pub is_enabled: bool,
    pub renewal_notifications: EntityRenewalNotifications,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub due_days: u32,
    pub include_payment_link: bool,
    pub allow_scheduled_payments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFinalisation {
    pub grace_period_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartRetries {
    pub is_enabled: bool,
    pub strategy: Option<SmartRetryStrategy>,
    pub max_retries: u32,
    pub max_duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueReminders {
    pub is_enabled: bool,
    pub reminder_days: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicingSettings {
    pub is_enabled: bool,
    pub invoice_number_delegation: Option<InvoiceNumberDelegation>,
    pub last_invoice_number_delegation_date: Option<DateTime<Utc>>,
    pub allow_invoice_pdf_download: Option<bool>,
    pub default_memo: String,
    pub default_footer_text: String,
    pub default_paper_size: Option<PdfPaperSize>,
    pub payment_terms: PaymentTerms,
    pub invoice_finalisation: InvoiceFinalisation,
    pub smart_retries: SmartRetries,
    pub overdue_email_reminders: OverdueReminders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    #[serde(rename = "type")]
    pub kind: RejectionType,
    pub reason: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub icon_url: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    pub account_data: AccountData,
    pub payments: PaymentsSettings,
    pub payouts: PayoutsSettings,
    pub card_issuing: CardIssuingSettings,
    pub tax_reporting: TaxReportingSettings,
    pub subscriptions: SubscriptionsSettings,
    pub invoicing: InvoicingSettings,
    pub is_active: bool,
    #[serde(default)]
    pub rejections: Vec<Rejection>,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub enabled_capabilities: Vec<Capability>,
}

impl Entity {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.enabled_capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payout_schedule_parses_weekday() {
        let schedule: PayoutSchedule = serde_json::from_value(json!({
            "interval": "weekly",
            "day_of_week": "friday",
            "day_of_month": null
        }))
        .unwrap();
        assert_eq!(schedule.interval, PayoutInterval::Weekly);
        assert_eq!(schedule.day_of_week, Some(Weekday::Friday));
    }

    #[test]
    fn rejection_type_field_maps_to_kind() {
        let rejection: Rejection = serde_json::from_value(json!({
            "type": "compliance",
            "reason": "missing documents",
            "date": "2025-03-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(rejection.kind, RejectionType::Compliance);
    }

    #[test]
    fn capability_names_are_snake_case() {
        assert_eq!(serde_json::to_value(Capability::CardIssuing).unwrap(), json!("card_issuing"));
    }
}
