//! The dictionary page: an A–Z index over every term plus live search.

use std::collections::BTreeSet;

use tokio::sync::RwLock;

use crate::{
    controllers::auth::require_session,
    error::Result,
    models::dictionary::DictionaryTerm,
    search::SearchGate,
    services::dictionary as dictionary_service,
    state::AppState,
};

struct GlossaryState {
    all: Vec<DictionaryTerm>,
    letter: Option<char>,
    keyword: Option<String>,
    displayed: Vec<DictionaryTerm>,
}

/// The fetched terms plus the letter filter and search shown over them.
pub struct Glossary {
    state: RwLock<GlossaryState>,
    gate: SearchGate,
}

fn starting_with(terms: &[DictionaryTerm], letter: Option<char>) -> Vec<DictionaryTerm> {
    match letter {
        None => terms.to_vec(),
        Some(letter) => terms
            .iter()
            .filter(|term| term.initial() == Some(letter))
            .cloned()
            .collect(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

impl Glossary {
    pub fn new(terms: Vec<DictionaryTerm>, gate: SearchGate) -> Self {
        Self {
            state: RwLock::new(GlossaryState {
                displayed: terms.clone(),
                all: terms,
                letter: None,
                keyword: None,
            }),
            gate,
        }
    }

    pub async fn displayed(&self) -> Vec<DictionaryTerm> {
        self.state.read().await.displayed.clone()
    }

    pub async fn current_letter(&self) -> Option<char> {
        self.state.read().await.letter
    }

    /// Shows the terms whose name starts with `letter`, or all of them.
    pub async fn filter_by_letter(&self, letter: Option<char>) -> Vec<DictionaryTerm> {
        let letter = letter.and_then(|c| c.to_uppercase().next());

        let mut state = self.state.write().await;
        state.letter = letter;
        state.keyword = None;
        state.displayed = starting_with(&state.all, letter);
        state.displayed.clone()
    }

    /// Letters at least one term starts with. Other index buttons are disabled.
    pub async fn available_letters(&self) -> BTreeSet<char> {
        self.state
            .read()
            .await
            .all
            .iter()
            .filter_map(DictionaryTerm::initial)
            .collect()
    }

    /// Runs a debounced search through `fetch`.
    ///
    /// Results replace the listing as-is; the letter filter applies again once
    /// the keyword is cleared.
    pub async fn search<F, Fut>(&self, keyword: &str, fetch: F) -> Result<bool>
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Result<Vec<DictionaryTerm>>>,
    {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.gate.cancel();
            let letter = self.current_letter().await;
            self.filter_by_letter(letter).await;
            return Ok(true);
        }

        let keyword = keyword.to_string();
        let Some(results) = self.gate.run(|| fetch(keyword.clone())).await? else {
            return Ok(false);
        };

        let mut state = self.state.write().await;
        state.keyword = Some(keyword);
        state.displayed = results;
        Ok(true)
    }

    /// The caption above the listing, e.g. `3 terms starting with "B"`.
    pub async fn count_label(&self) -> String {
        let state = self.state.read().await;
        let count = state.displayed.len();

        match (&state.keyword, state.letter) {
            (Some(keyword), _) => format!("Found {count} term{} for \"{keyword}\"", plural(count)),
            (None, Some(letter)) => {
                format!("{count} term{} starting with \"{letter}\"", plural(count))
            }
            (None, None) => format!("{count} financial terms available"),
        }
    }
}

/// Opens the dictionary page.
///
/// # Returns
///
/// A `Result` containing the glossary of every term.
pub async fn open(state: &AppState) -> Result<Glossary> {
    require_session(state)?;

    let terms = dictionary_service::list_terms(&state.api).await?;
    tracing::info!("📖 Loaded {} dictionary terms", terms.len());

    Ok(Glossary::new(terms, state.dictionary_search_gate()))
}

pub async fn search(state: &AppState, page: &Glossary, keyword: &str) -> Result<bool> {
    page.search(keyword, |keyword| async move {
        dictionary_service::search_terms(&state.api, &keyword).await
    })
    .await
}

pub async fn detail(state: &AppState, term_id: &str) -> Result<DictionaryTerm> {
    require_session(state)?;
    dictionary_service::get_term(&state.api, term_id).await
}

/// Looks a term up by its exact name.
pub async fn lookup(state: &AppState, name: &str) -> Result<DictionaryTerm> {
    require_session(state)?;
    dictionary_service::term_by_name(&state.api, name.trim()).await
}
