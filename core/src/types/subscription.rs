//! Subscriptions and the records that hang off them: billing cycles, usage
//! records and status history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::TaxBehavior;
use super::price::{AggregateUsage, RecurringInterval, UsageType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Incomplete,
    IncompleteExpired,
    PastDue,
    /// In a trial period. The wire value is spelled `trailing`.
    Trailing,
    Unpaid,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationBehavior {
    AlwaysProrate,
    NeverProrate,
    ProrateUpgrades,
    ProrateDowngrades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationTiming {
    Immediate,
    NextBillingCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationBehavior {
    EndImmediately,
    EndOfPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundPolicy {
    NoRefund,
    ProratedRefund,
    FullRefund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoicingOption {
    AutomaticCharge,
    ManualFinalisation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStrategy {
    AllowIncomplete,
    AutoIncomplete,
    RejectIfIncomplete,
}

/// One priced line of a subscription. All plans of a subscription share
/// the same recurring interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub plan_id: String,
    pub price_id: Option<String>,
    pub discount_id: Option<String>,
    pub currency: String,
    pub unit_price: i64,
    pub quantity: u64,
    pub discount_amount: i64,
    pub amount: i64,
    pub amount_after_taxes: i64,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub interval: RecurringInterval,
    pub interval_count: u32,
    pub usage_type: UsageType,
    pub aggregate_usage: Option<AggregateUsage>,
    pub tax_behavior: TaxBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalNotifications {
    pub days_before: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestStateTransition {
    pub state_history_id: Option<String>,
    pub previous_status: Option<SubscriptionStatus>,
    pub transition_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proration {
    pub behavior: ProrationBehavior,
    pub application_timing: ProrationTiming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub canceled_date: Option<DateTime<Utc>>,
    pub termination_behavior: Option<TerminationBehavior>,
    pub refund_policy: Option<RefundPolicy>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCycle {
    pub cycle_id: Option<String>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscription_id: String,
    pub reference_id: String,
    pub customer_id: String,
    pub plans: Vec<SubscriptionPlan>,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Always set by the service.
    pub trial_start_date: Option<DateTime<Utc>>,
    pub trial_end_date: Option<DateTime<Utc>>,
    pub currency: String,
    pub invoicing_option: InvoicingOption,
    pub payment_strategy: PaymentStrategy,
    pub payment_method: Option<String>,
    pub days_until_due: Option<u32>,
    /// Locked once the subscription is active.
    pub cycle_start_date: Option<DateTime<Utc>>,
    pub auto_renew: Option<bool>,
    pub renewal_notifications: Option<RenewalNotifications>,
    #[serde(default)]
    pub latest_state_transition: LatestStateTransition,
    pub proration: Option<Proration>,
    pub cancellation: Option<Cancellation>,
    pub current_cycle: Option<CurrentCycle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Upcoming,
    Current,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleUsage {
    /// Metered plans whose usage is summed into this entry.
    pub plan_ids: Vec<String>,
    pub usage_quantity: f64,
    pub usage_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationAdjustment {
    pub reason: String,
    /// Positive for charges, negative for credits.
    pub amount: i64,
    pub applied_at: DateTime<Utc>,
}

/// One billing period of a subscription. Licensed plans bill in advance,
/// metered plans in arrears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCycle {
    pub cycle_id: String,
    pub subscription_id: String,
    /// 1 for the first cycle.
    pub cycle_sequence: u32,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub invoice_id: Option<String>,
    pub status: CycleStatus,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub usage_data: Vec<CycleUsage>,
    #[serde(default)]
    pub proration_adjustments: Vec<ProrationAdjustment>,
    pub billed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    #[default]
    Increment,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub usage_record_id: String,
    pub subscription_id: String,
    pub cycle_id: String,
    pub plan_id: String,
    pub quantity: f64,
    pub action: UsageAction,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Usage reported against a metered plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    pub subscription_id: String,
    pub plan_id: String,
    pub records: Vec<UsageReportRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReportRecord {
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<UsageAction>,
    /// Defaults to the time the service receives the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecordSummary {
    pub usage_record_id: String,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
    pub action: UsageAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSource {
    System,
    Customer,
    PaymentFailure,
    Scheduled,
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactType {
    Charge,
    Refund,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialImpact {
    pub has_impact: bool,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub impact_type: Option<ImpactType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResources {
    pub invoice_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub refund_id: Option<String>,
}

/// A single status change of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStateHistory {
    pub state_history_id: String,
    pub subscription_id: String,
    pub from_status: SubscriptionStatus,
    pub to_status: SubscriptionStatus,
    pub transition_date: DateTime<Utc>,
    pub transition_source: TransitionSource,
    pub notes: Option<String>,
    pub financial_impact: FinancialImpact,
    pub related_resources: RelatedResources,
}
