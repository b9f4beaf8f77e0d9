//! Session driver: one view state plus the client that serves its searches.
//!
//! Messages go through the pure [`update`] function; the `Search` effect is
//! executed here and its outcome fed back as a message. The state lock is
//! never held across a request, so a page can be rendered while a search is
//! in flight.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::search::SearchClient;
use crate::view::{update, Effect, Msg, ViewModel, ViewState};

pub struct Session {
    state: Mutex<ViewState>,
    client: SearchClient,
}

impl Session {
    pub fn new(client: SearchClient) -> Self {
        Self {
            state: Mutex::new(ViewState::new()),
            client,
        }
    }

    pub fn client(&self) -> &SearchClient {
        &self.client
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ViewModel {
        self.lock().view()
    }

    /// Apply `msg` and run every effect it produces to completion.
    pub async fn dispatch(&self, msg: Msg) {
        let effects = self.apply(msg);
        self.run_effects(effects).await;
    }

    /// Apply `msgs` now and run the resulting effects on a spawned task.
    ///
    /// The state reflects every message before this returns, so a search
    /// is already in the `Searching` stage when the caller renders.
    pub fn dispatch_in_background(self: &Arc<Self>, msgs: impl IntoIterator<Item = Msg>) {
        let effects: Vec<Effect> = msgs.into_iter().flat_map(|msg| self.apply(msg)).collect();
        if effects.is_empty() {
            return;
        }

        let session = Arc::clone(self);
        tokio::spawn(async move {
            session.run_effects(effects).await;
        });
    }

    /// Apply several messages in order, e.g. form fields followed by submit.
    pub async fn dispatch_all(&self, msgs: impl IntoIterator<Item = Msg>) {
        for msg in msgs {
            self.dispatch(msg).await;
        }
    }

    async fn run_effects(&self, effects: Vec<Effect>) {
        let mut pending: VecDeque<Effect> = effects.into();

        while let Some(effect) = pending.pop_front() {
            let follow_up = self.run_effect(effect).await;
            pending.extend(self.apply(follow_up));
        }
    }

    fn apply(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        let current = std::mem::take(&mut *guard);
        let (next, effects) = update(current, msg);
        *guard = next;
        effects
    }

    async fn run_effect(&self, effect: Effect) -> Msg {
        match effect {
            Effect::Search { query, filters } => {
                debug!(query = %query, filters = ?filters, "Running search effect");
                match self.client.search(&query, &filters).await {
                    Ok(response) => {
                        info!(papers = response.papers.len(), "Search succeeded");
                        Msg::SearchSucceeded(response)
                    }
                    Err(e) => Msg::SearchFailed(e.to_string()),
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
