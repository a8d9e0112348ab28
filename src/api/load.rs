//! Per-view load orchestration on top of [`fetch_many`].

use crate::api::{fetch_many, BatchError, Feed, HnApi, Item, User};
use anyhow::Result;

pub const MAX_COMMENT_CHILDREN: usize = 50;
pub const MAX_USER_SUBMISSIONS: usize = 10;

#[derive(Debug)]
pub struct FeedLoad {
    pub items: Vec<Item>,
    pub error: Option<BatchError>,
}

#[derive(Debug)]
pub struct ItemLoad {
    pub story: Item,
    /// First-level children in source order; failed fetches stay as `None`.
    pub children: Vec<Option<Item>>,
    pub error: Option<BatchError>,
}

#[derive(Debug)]
pub struct UserLoad {
    /// `None` when the service has no such user.
    pub user: Option<User>,
    pub submissions: Vec<Item>,
}

/// Resolves a named feed and hydrates its first `count` entries.
pub async fn load_feed<A: HnApi>(
    api: &A,
    feed: Feed,
    count: usize,
    cap: usize,
) -> Result<FeedLoad> {
    let ids = api.fetch_list(feed.list_name()).await?;
    let ids = &ids[..ids.len().min(count)];
    tracing::info!(feed = feed.list_name(), count = ids.len(), "loading feed");

    let (items, error) = fetch_many(api, ids, cap).await.into_present();
    let items = items.into_iter().filter(|item| !item.is_absent()).collect();
    Ok(FeedLoad { items, error })
}

/// Fetches a story and, concurrently, its direct replies. Deeper replies are
/// never resolved.
pub async fn load_item<A: HnApi>(api: &A, id: u64, cap: usize) -> Result<ItemLoad> {
    let story = api.fetch_item(id).await?;
    anyhow::ensure!(!story.is_absent(), "item {id} not found");

    let limit = story.child_ids.len().min(MAX_COMMENT_CHILDREN);
    let batch = fetch_many(api, &story.child_ids[..limit], cap).await;
    tracing::info!(id, children = limit, "loaded item");

    Ok(ItemLoad {
        story,
        children: batch.items,
        error: batch.error,
    })
}

/// Fetches a profile and scans its submissions one at a time for the most
/// recent live stories.
pub async fn load_user<A: HnApi>(api: &A, name: &str) -> Result<UserLoad> {
    let user = api.fetch_user(name).await?;
    if user.is_absent() {
        return Ok(UserLoad {
            user: None,
            submissions: vec![],
        });
    }

    let mut submissions = Vec::with_capacity(MAX_USER_SUBMISSIONS);
    for &id in &user.submitted_ids {
        if submissions.len() >= MAX_USER_SUBMISSIONS {
            break;
        }
        match api.fetch_item(id).await {
            Ok(item) if item.is_live_story() => submissions.push(item),
            Ok(_) => {}
            Err(err) => tracing::debug!(id, "skipping submission: {err:#}"),
        }
    }
    tracing::info!(user = name, kept = submissions.len(), "loaded user");

    Ok(UserLoad {
        user: Some(user),
        submissions,
    })
}

/// Full-text story search; results arrive fully hydrated so no batch is needed.
pub async fn search<A: HnApi>(api: &A, query: &str, limit: usize) -> Result<Vec<Item>> {
    let items = api.search(query, limit).await?;
    tracing::info!(query, hits = items.len(), "search complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{comment, story, FakeApi};
    use crate::api::types::ItemKind;
    use std::time::Duration;

    const MS: Duration = Duration::from_millis(1);

    #[tokio::test(start_paused = true)]
    async fn feed_truncates_and_keeps_order() {
        let mut api = FakeApi::new().with_list("topstories", (1..=8).collect());
        for id in 1..=8 {
            api = api.with_story(id, Duration::from_millis(10 - id));
        }

        let load = load_feed(&api, Feed::Top, 5, 2).await.unwrap();
        let ids = load.items.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(load.error.is_none());
        assert_eq!(api.item_calls(), 5);
    }

    #[tokio::test]
    async fn feed_list_failure_is_fatal() {
        let api = FakeApi::new();
        assert!(load_feed(&api, Feed::New, 5, 2).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn feed_reports_partial_failure() {
        let api = FakeApi::new()
            .with_list("beststories", vec![1, 2, 3])
            .with_story(1, MS)
            .with_failure(2, MS)
            .with_story(3, MS);

        let load = load_feed(&api, Feed::Best, 10, 4).await.unwrap();
        assert_eq!(load.items.len(), 2);
        assert_eq!(load.error.map(|e| e.id), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn item_fetches_at_most_fifty_children() {
        let mut root = story(1);
        root.child_ids = (100..220).collect();
        let mut api = FakeApi::new().with_item(root, MS);
        for id in 100..220 {
            api = api.with_item(comment(id, "hi"), MS);
        }

        let load = load_item(&api, 1, 20).await.unwrap();
        assert_eq!(load.children.len(), 50);
        assert_eq!(api.item_calls(), 51);
        assert_eq!(load.children[0].as_ref().map(|c| c.id), Some(100));
        assert_eq!(load.children[49].as_ref().map(|c| c.id), Some(149));
        assert!(api.peak_in_flight() <= 20);
    }

    #[tokio::test]
    async fn missing_item_is_an_error() {
        let api = FakeApi::new();
        let err = load_item(&api, 404, 4).await.unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
    }

    #[tokio::test(start_paused = true)]
    async fn user_keeps_first_ten_live_stories_and_stops_scanning() {
        // 15 submissions: ids 1..=15. 3 are not stories, 2 are dead/deleted.
        let mut api = FakeApi::new();
        for id in 1..=15u64 {
            let mut item = story(id);
            match id {
                2 => item.kind = Some(ItemKind::Comment),
                4 => item.kind = Some(ItemKind::Job),
                6 => item.dead = true,
                7 => item.kind = Some(ItemKind::Comment),
                9 => item.deleted = true,
                _ => {}
            }
            api = api.with_item(item, MS);
        }
        api = api.with_user(User {
            id: "pg".to_string(),
            submitted_ids: (1..=15).collect(),
            ..User::default()
        });

        let load = load_user(&api, "pg").await.unwrap();
        let ids = load.submissions.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3, 5, 8, 10, 11, 12, 13, 14, 15]);
        assert_eq!(api.item_calls(), 15);
        assert_eq!(api.peak_in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn user_scan_stops_at_tenth_story() {
        let mut api = FakeApi::new();
        for id in 1..=30u64 {
            api = api.with_story(id, MS);
        }
        api = api.with_user(User {
            id: "dang".to_string(),
            submitted_ids: (1..=30).collect(),
            ..User::default()
        });

        let load = load_user(&api, "dang").await.unwrap();
        assert_eq!(load.submissions.len(), 10);
        assert_eq!(api.item_calls(), 10);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let api = FakeApi::new();
        let load = load_user(&api, "nobody").await.unwrap();
        assert!(load.user.is_none());
        assert!(load.submissions.is_empty());
    }
}
