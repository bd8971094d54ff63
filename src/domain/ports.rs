use crate::domain::model::{MovieResult, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the "Get Movies" action pulls its results from.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Top movies for the query's month, or the specific failure.
    async fn try_fetch(&self, query: &Query) -> Result<Vec<MovieResult>>;

    /// Same request with every failure collapsed to an empty list.
    async fn fetch(&self, query: &Query) -> Vec<MovieResult> {
        match self.try_fetch(query).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!(
                    "Fetch for {}-{:02} failed ({:?}): {}",
                    query.year,
                    query.month,
                    e.category(),
                    e
                );
                Vec::new()
            }
        }
    }
}
