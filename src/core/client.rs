use crate::domain::model::{DiscoverResponse, MovieResult, Query};
use crate::domain::ports::MovieSource;
use crate::utils::error::{MovieError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const POSTER_SIZE: &str = "w200";
pub const TOP_N: usize = 5;

const DISCOVER_PATH: &str = "/discover/movie";

pub struct MovieQueryClient {
    client: Client,
    api_base: String,
    image_base: String,
}

impl MovieQueryClient {
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_IMAGE_BASE)
    }

    pub fn with_base_urls(api_base: impl Into<String>, image_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            image_base: image_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn discover_url(&self) -> String {
        format!("{}{}", self.api_base, DISCOVER_PATH)
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}{}", self.image_base, POSTER_SIZE, poster_path)
    }

    /// Top movies for one month; empty on any failure.
    pub async fn fetch_top_movies(
        &self,
        year: i32,
        month: u32,
        api_key: &str,
    ) -> Vec<MovieResult> {
        match Query::new(year, month, api_key) {
            Ok(query) => self.fetch(&query).await,
            Err(e) => {
                tracing::warn!("Skipping request: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_top_movies(&self, query: &Query) -> Result<Vec<MovieResult>> {
        let range = query.date_range()?;
        let start_date = range.start_date();
        let end_date = range.end_date();

        tracing::debug!(
            "Requesting {} for {}..={}",
            self.discover_url(),
            start_date,
            end_date
        );

        let params = [
            ("api_key", query.api_key.as_str()),
            ("primary_release_date.gte", start_date.as_str()),
            ("primary_release_date.lte", end_date.as_str()),
            ("sort_by", "popularity.desc"),
            ("page", "1"),
        ];

        let response = self
            .client
            .get(self.discover_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("TMDb response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(MovieError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MovieError::RateLimited);
        }
        if !status.is_success() {
            return Err(MovieError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: DiscoverResponse = serde_json::from_slice(&body)?;
        let movies = parsed.top(TOP_N);

        tracing::debug!(
            "Keeping {} of {} movies",
            movies.len(),
            parsed.results.len()
        );
        Ok(movies)
    }
}

impl Default for MovieQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieSource for MovieQueryClient {
    async fn try_fetch(&self, query: &Query) -> Result<Vec<MovieResult>> {
        self.try_fetch_top_movies(query).await
    }
}
