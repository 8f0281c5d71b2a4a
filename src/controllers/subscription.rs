use chrono::Utc;

use crate::{
    controllers::auth::require_session,
    error::Result,
    models::subscription::{Billing, NewSubscription, PlanType, Subscription},
    notification::Notification,
    services::subscriptions as subscription_service,
    state::AppState,
};

/// The confirmation shown after subscribing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub plan: PlanType,
    pub billing: Billing,
    /// Price in rupees for one period.
    pub price: u32,
    pub period: &'static str,
}

impl PaymentSummary {
    pub fn new(plan: PlanType, billing: Billing) -> Self {
        Self {
            plan,
            billing,
            price: plan.price(billing),
            period: billing.period_name(),
        }
    }

    /// `"Monthly"` or `"Yearly"`.
    pub fn billing_label(&self) -> &'static str {
        match self.billing {
            Billing::Monthly => "Monthly",
            Billing::Yearly => "Yearly",
        }
    }

    /// The total line, e.g. `₹499/month`.
    pub fn total_label(&self) -> String {
        format!("₹{}/{}", self.price, self.period)
    }
}

/// The outcome of a successful subscription.
#[derive(Debug, Clone)]
pub struct Subscribed {
    pub notification: Notification,
    pub summary: PaymentSummary,
    pub subscription: Subscription,
}

/// Subscribes the current user to `plan`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `plan` - The plan picked.
/// * `billing` - The billing toggle.
///
/// # Returns
///
/// A `Result` containing the created subscription and its payment summary.
pub async fn subscribe(state: &AppState, plan: PlanType, billing: Billing) -> Result<Subscribed> {
    let token = require_session(state)?;
    // Sessions created by login use the user id as the token.
    let user_id = state
        .tokens
        .get_user()
        .and_then(|user| user.id())
        .unwrap_or(token);

    let request = NewSubscription::starting(user_id, plan, billing, Utc::now());
    let subscription = subscription_service::create_subscription(&state.api, &request).await?;
    tracing::info!("💳 Subscribed {} to {} ({})", request.user_id, plan, billing.period_name());

    Ok(Subscribed {
        notification: Notification::success(format!("Successfully subscribed to {plan} plan!")),
        summary: PaymentSummary::new(plan, billing),
        subscription,
    })
}
