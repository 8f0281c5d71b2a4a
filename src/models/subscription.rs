use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use sonic_rs::Value;

use super::record;

/// A subscription as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subscription {
    raw: Value,
}

impl Subscription {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn id(&self) -> Option<String> {
        record::id(&self.raw)
    }

    pub fn user_id(&self) -> Option<&str> {
        record::text(&self.raw, "userId")
    }

    pub fn plan_type(&self) -> Option<&str> {
        record::text(&self.raw, "planType")
    }

    pub fn status(&self) -> Option<&str> {
        record::text(&self.raw, "status")
    }
}

/// Paid plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanType {
    Premium,
    Pro,
}

impl PlanType {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanType::Premium => "PREMIUM",
            PlanType::Pro => "PRO",
        }
    }

    /// Price in rupees for one billing period.
    pub fn price(self, billing: Billing) -> u32 {
        match (self, billing) {
            (PlanType::Premium, Billing::Monthly) => 499,
            (PlanType::Premium, Billing::Yearly) => 4790,
            (PlanType::Pro, Billing::Monthly) => 999,
            (PlanType::Pro, Billing::Yearly) => 9590,
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Billing {
    Monthly,
    Yearly,
}

impl Billing {
    /// The end of a period that starts at `start`.
    ///
    /// Month arithmetic clamps to the last day of the target month.
    pub fn period_end(self, start: DateTime<Utc>) -> DateTime<Utc> {
        let months = match self {
            Billing::Monthly => Months::new(1),
            Billing::Yearly => Months::new(12),
        };
        start.checked_add_months(months).unwrap_or(start)
    }

    pub fn period_name(self) -> &'static str {
        match self {
            Billing::Monthly => "month",
            Billing::Yearly => "year",
        }
    }
}

/// Subscription status values the client sends. New subscriptions always
/// start active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Active,
}

/// A subscription built on the client before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub user_id: String,
    pub plan_type: PlanType,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub auto_renew: bool,
}

impl NewSubscription {
    /// An active, auto-renewing subscription starting at `now`.
    pub fn starting(user_id: impl Into<String>, plan: PlanType, billing: Billing, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            plan_type: plan,
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: billing.period_end(now),
            auto_renew: true,
        }
    }
}
