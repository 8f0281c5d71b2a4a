use urlencoding::encode;

use crate::{
    client::ApiClient,
    error::Result,
    models::subscription::{NewSubscription, Subscription},
};

pub async fn list_subscriptions(api: &ApiClient) -> Result<Vec<Subscription>> {
    api.get("/subscriptions").await
}

pub async fn active_subscriptions(api: &ApiClient) -> Result<Vec<Subscription>> {
    api.get("/subscriptions/active").await
}

pub async fn get_subscription(api: &ApiClient, subscription_id: &str) -> Result<Subscription> {
    api.get(&format!("/subscriptions/{}", encode(subscription_id)))
        .await
}

pub async fn subscriptions_for_user(api: &ApiClient, user_id: &str) -> Result<Vec<Subscription>> {
    api.get(&format!("/subscriptions/user/{}", encode(user_id)))
        .await
}

/// Submits a subscription built on the client.
///
/// Only the fact that the backend accepted it is relied upon; the returned
/// body is kept as a raw record.
pub async fn create_subscription(
    api: &ApiClient,
    subscription: &NewSubscription,
) -> Result<Subscription> {
    api.post("/subscriptions", subscription).await
}

pub async fn update_subscription(
    api: &ApiClient,
    subscription_id: &str,
    subscription: &Subscription,
) -> Result<Subscription> {
    api.put(&format!("/subscriptions/{}", encode(subscription_id)), subscription)
        .await
}

pub async fn delete_subscription(api: &ApiClient, subscription_id: &str) -> Result<()> {
    api.delete(&format!("/subscriptions/{}", encode(subscription_id)))
        .await
}
