use serde::Deserialize;

pub const HN_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";
pub const HN_USER_URL: &str = "https://news.ycombinator.com/user?id=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Story,
    Comment,
    Job,
    Poll,
    PollOpt,
    #[serde(other)]
    Unknown,
}

/// One record of the feed. Every fetch yields a fresh snapshot; nothing is
/// mutated after decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: u64,

    #[serde(rename = "type")]
    pub kind: Option<ItemKind>,

    #[serde(rename = "by")]
    pub author: Option<String>,

    #[serde(rename = "time", default)]
    pub created_at: i64,

    #[serde(default)]
    pub text: String,

    pub url: Option<String>,

    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "kids", default)]
    pub child_ids: Vec<u64>,

    #[serde(rename = "descendants", default)]
    pub descendant_count: i64,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub dead: bool,
}

impl Item {
    /// The API answers unknown ids with `null`, which decodes to the default
    /// record. Such an item has neither a type nor an author.
    pub fn is_absent(&self) -> bool {
        self.kind.is_none() && self.author.is_none()
    }

    pub fn is_visible(&self) -> bool {
        !self.deleted && !self.dead && !self.is_absent()
    }

    pub fn is_live_story(&self) -> bool {
        self.kind == Some(ItemKind::Story) && !self.dead && !self.deleted
    }

    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or("[unknown]")
    }

    pub fn permalink(&self) -> String {
        format!("{HN_ITEM_URL}{}", self.id)
    }

    /// The story link, falling back to the discussion page for text posts.
    pub fn link_or_permalink(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.permalink(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "created", default)]
    pub created_at: i64,

    #[serde(default)]
    pub karma: i64,

    #[serde(default)]
    pub about: String,

    #[serde(rename = "submitted", default)]
    pub submitted_ids: Vec<u64>,
}

impl User {
    pub fn is_absent(&self) -> bool {
        self.id.is_empty()
    }

    pub fn profile_url(&self) -> String {
        format!("{HN_USER_URL}{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Top,
    New,
    Best,
    Ask,
    Show,
    Jobs,
}

impl Feed {
    pub fn list_name(self) -> &'static str {
        match self {
            Feed::Top => "topstories",
            Feed::New => "newstories",
            Feed::Best => "beststories",
            Feed::Ask => "askstories",
            Feed::Show => "showstories",
            Feed::Jobs => "jobstories",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Feed::Top => "Hacker News · Top Stories",
            Feed::New => "Hacker News · New Stories",
            Feed::Best => "Hacker News · Best Stories",
            Feed::Ask => "Hacker News · Ask HN",
            Feed::Show => "Hacker News · Show HN",
            Feed::Jobs => "Hacker News · Jobs",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub points: Option<i64>,
    pub num_comments: Option<i64>,
    pub created_at_i: Option<i64>,
    pub story_text: Option<String>,
}

impl SearchHit {
    /// Hits without a numeric id cannot be opened, so they are dropped.
    pub fn into_item(self) -> Option<Item> {
        let id = self.object_id.parse::<u64>().ok()?;
        Some(Item {
            id,
            kind: Some(ItemKind::Story),
            author: self.author,
            created_at: self.created_at_i.unwrap_or(0),
            text: self.story_text.unwrap_or_default(),
            url: self.url.filter(|u| !u.is_empty()),
            score: self.points.unwrap_or(0),
            title: self.title.unwrap_or_default(),
            child_ids: vec![],
            descendant_count: self.num_comments.unwrap_or(0),
            deleted: false,
            dead: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_story_with_missing_optional_fields() {
        let json = r#"{"id":8863,"type":"story","by":"dhouston","time":1175714200,
            "title":"My YC app","url":"http://www.getdropbox.com/u/2/screencast.html",
            "score":111,"kids":[9224,8917],"descendants":71}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, Some(ItemKind::Story));
        assert_eq!(item.author.as_deref(), Some("dhouston"));
        assert_eq!(item.child_ids, vec![9224, 8917]);
        assert_eq!(item.descendant_count, 71);
        assert!(item.text.is_empty());
        assert!(!item.deleted && !item.dead);
        assert!(item.is_live_story());
    }

    #[test]
    fn null_item_is_absent() {
        let item: Option<Item> = serde_json::from_str("null").unwrap();
        let item = item.unwrap_or_default();
        assert!(item.is_absent());
        assert!(!item.is_visible());
    }

    #[test]
    fn deleted_comment_keeps_position_but_is_not_visible() {
        let json = r#"{"id":5,"type":"comment","deleted":true,"time":1}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(!item.is_absent());
        assert!(!item.is_visible());
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let item: Item = serde_json::from_str(r#"{"id":1,"type":"shiny"}"#).unwrap();
        assert_eq!(item.kind, Some(ItemKind::Unknown));
    }

    #[test]
    fn pollopt_kind_decodes() {
        let item: Item = serde_json::from_str(r#"{"id":1,"type":"pollopt"}"#).unwrap();
        assert_eq!(item.kind, Some(ItemKind::PollOpt));
    }

    #[test]
    fn text_post_links_to_permalink() {
        let item = Item {
            id: 42,
            url: None,
            ..Item::default()
        };
        assert_eq!(
            item.link_or_permalink(),
            "https://news.ycombinator.com/item?id=42"
        );
    }

    #[test]
    fn search_hit_maps_to_story() {
        let json = r#"{"hits":[
            {"objectID":"123","title":"Rust","url":"https://rust-lang.org","author":"a",
             "points":10,"num_comments":3,"created_at_i":100},
            {"objectID":"not-a-number","title":"x"}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let items = resp
            .hits
            .into_iter()
            .filter_map(SearchHit::into_item)
            .collect::<Vec<_>>();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 123);
        assert_eq!(items[0].score, 10);
        assert_eq!(items[0].descendant_count, 3);
        assert!(items[0].is_live_story());
    }

    #[test]
    fn missing_user_is_absent() {
        let user: Option<User> = serde_json::from_str("null").unwrap();
        assert!(user.unwrap_or_default().is_absent());
    }
}
