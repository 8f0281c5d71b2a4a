use urlencoding::encode;

use crate::{
    client::ApiClient,
    error::Result,
    models::dictionary::{DictionaryTerm, TermDraft},
};

pub async fn list_terms(api: &ApiClient) -> Result<Vec<DictionaryTerm>> {
    api.get("/dictionary").await
}

pub async fn get_term(api: &ApiClient, term_id: &str) -> Result<DictionaryTerm> {
    api.get(&format!("/dictionary/{}", encode(term_id))).await
}

/// Looks a term up by its exact name.
pub async fn term_by_name(api: &ApiClient, name: &str) -> Result<DictionaryTerm> {
    api.get(&format!("/dictionary/term/{}", encode(name))).await
}

pub async fn terms_by_category(api: &ApiClient, category: &str) -> Result<Vec<DictionaryTerm>> {
    api.get(&format!("/dictionary/category/{}", encode(category)))
        .await
}

pub async fn search_terms(api: &ApiClient, keyword: &str) -> Result<Vec<DictionaryTerm>> {
    api.get(&format!("/dictionary/search?keyword={}", encode(keyword)))
        .await
}

pub async fn create_term(api: &ApiClient, draft: &TermDraft) -> Result<DictionaryTerm> {
    api.post("/dictionary", draft).await
}

pub async fn update_term(
    api: &ApiClient,
    term_id: &str,
    term: &DictionaryTerm,
) -> Result<DictionaryTerm> {
    api.put(&format!("/dictionary/{}", encode(term_id)), term)
        .await
}

pub async fn delete_term(api: &ApiClient, term_id: &str) -> Result<()> {
    api.delete(&format!("/dictionary/{}", encode(term_id))).await
}
