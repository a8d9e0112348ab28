use crate::api::types::{Item, SearchHit, SearchResponse, User};
use crate::api::HnApi;
use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub search_url: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct HnClient {
    base_url: String,
    search_url: String,
    http: Client,
}

impl HnClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        anyhow::ensure!(config.timeout.as_millis() > 0, "timeout must be > 0");
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Appends `segments` to the API base, percent-encoding each one so a
    /// name cannot escape its path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("parse base url {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("base url {} cannot take a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        tracing::debug!(%url, "GET");
        self.http
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetch {what}"))?
            .error_for_status()
            .with_context(|| format!("{what} status"))?
            .json::<T>()
            .await
            .with_context(|| format!("decode {what}"))
    }
}

impl HnApi for HnClient {
    async fn fetch_item(&self, id: u64) -> Result<Item> {
        let url = self.endpoint(&["item", format!("{id}.json").as_str()])?;
        let item = self
            .get_json::<Option<Item>>(url, &format!("item id={id}"))
            .await?;
        Ok(item.unwrap_or_default())
    }

    async fn fetch_user(&self, name: &str) -> Result<User> {
        let url = self.endpoint(&["user", format!("{name}.json").as_str()])?;
        let user = self
            .get_json::<Option<User>>(url, &format!("user id={name}"))
            .await?;
        Ok(user.unwrap_or_default())
    }

    async fn fetch_list(&self, name: &str) -> Result<Vec<u64>> {
        let url = self.endpoint(&[format!("{name}.json").as_str()])?;
        let ids = self.get_json::<Option<Vec<u64>>>(url, name).await?;
        Ok(ids.unwrap_or_default())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Item>> {
        let url = Url::parse_with_params(
            &format!("{}/search", self.search_url),
            &[
                ("query", query),
                ("tags", "story"),
                ("hitsPerPage", &limit.to_string()),
            ],
        )
        .context("build search url")?;
        let resp = self.get_json::<SearchResponse>(url, "search").await?;
        Ok(resp
            .hits
            .into_iter()
            .filter_map(SearchHit::into_item)
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HnClient {
        HnClient::new(ClientConfig {
            base_url: base_url.to_string(),
            search_url: "https://hn.algolia.com/api/v1".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let api = client("https://hacker-news.firebaseio.com/v0/");
        let url = api.endpoint(&["item", "8863.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hacker-news.firebaseio.com/v0/item/8863.json"
        );
        let url = api.endpoint(&["topstories.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hacker-news.firebaseio.com/v0/topstories.json"
        );
    }

    #[test]
    fn user_names_stay_inside_their_segment() {
        let api = client("https://hacker-news.firebaseio.com/v0");
        let url = api.endpoint(&["user", "a?b#c.json"]).unwrap();
        assert_eq!(url.path(), "/v0/user/a%3Fb%23c.json");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let url = api.endpoint(&["user", "../topstories.json"]).unwrap();
        assert_eq!(url.path(), "/v0/user/..%2Ftopstories.json");
    }
}
