//! In-memory backend for tests.

use crate::api::types::ItemKind;
use crate::api::{HnApi, Item, User};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
enum Entry {
    Item(Item),
    Failure,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    item_calls: AtomicUsize,
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    items: HashMap<u64, (Entry, Duration)>,
    users: HashMap<String, User>,
    lists: HashMap<String, Vec<u64>>,
    search_results: Vec<Item>,
    counters: Arc<Counters>,
}

pub(crate) fn story(id: u64) -> Item {
    Item {
        id,
        kind: Some(ItemKind::Story),
        author: Some(format!("user{id}")),
        created_at: 1_700_000_000,
        title: format!("Story {id}"),
        url: Some(format!("https://example.com/{id}")),
        score: id as i64,
        ..Item::default()
    }
}

pub(crate) fn comment(id: u64, text: &str) -> Item {
    Item {
        id,
        kind: Some(ItemKind::Comment),
        author: Some(format!("c{id}")),
        created_at: 1_700_000_000,
        text: text.to_string(),
        ..Item::default()
    }
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_item(mut self, item: Item, latency: Duration) -> Self {
        self.items.insert(item.id, (Entry::Item(item), latency));
        self
    }

    pub(crate) fn with_story(self, id: u64, latency: Duration) -> Self {
        self.with_item(story(id), latency)
    }

    pub(crate) fn with_failure(mut self, id: u64, latency: Duration) -> Self {
        self.items.insert(id, (Entry::Failure, latency));
        self
    }

    pub(crate) fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub(crate) fn with_list(mut self, name: &str, ids: Vec<u64>) -> Self {
        self.lists.insert(name.to_string(), ids);
        self
    }

    pub(crate) fn with_search_results(mut self, items: Vec<Item>) -> Self {
        self.search_results = items;
        self
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_peak(&self) {
        self.counters.peak.store(0, Ordering::SeqCst);
    }

    pub(crate) fn item_calls(&self) -> usize {
        self.counters.item_calls.load(Ordering::SeqCst)
    }
}

impl HnApi for FakeApi {
    async fn fetch_item(&self, id: u64) -> Result<Item> {
        self.counters.item_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);

        let entry = self.items.get(&id).cloned();
        if let Some((_, latency)) = &entry {
            tokio::time::sleep(*latency).await;
        }
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        match entry {
            Some((Entry::Item(item), _)) => Ok(item),
            Some((Entry::Failure, _)) => Err(anyhow!("simulated failure id={id}")),
            None => Ok(Item::default()),
        }
    }

    async fn fetch_user(&self, name: &str) -> Result<User> {
        Ok(self.users.get(name).cloned().unwrap_or_default())
    }

    async fn fetch_list(&self, name: &str) -> Result<Vec<u64>> {
        self.lists
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("list {name} unavailable"))
    }

    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<Item>> {
        Ok(self.search_results.iter().take(limit).cloned().collect())
    }
}
