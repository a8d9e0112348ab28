pub mod batch;
pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod load;
pub mod types;

pub use batch::{fetch_many, BatchError};
pub use client::{ClientConfig, HnClient};
pub use types::{Feed, Item, User};

use anyhow::Result;
use std::future::Future;

/// The remote read-only feed service.
///
/// Unknown ids and usernames resolve to empty records rather than errors; see
/// [`Item::is_absent`] and [`User::is_absent`].
pub trait HnApi: Clone + Send + Sync + 'static {
    fn fetch_item(&self, id: u64) -> impl Future<Output = Result<Item>> + Send;

    fn fetch_user(&self, name: &str) -> impl Future<Output = Result<User>> + Send;

    fn fetch_list(&self, name: &str) -> impl Future<Output = Result<Vec<u64>>> + Send;

    fn search(&self, query: &str, limit: usize) -> impl Future<Output = Result<Vec<Item>>> + Send;
}
