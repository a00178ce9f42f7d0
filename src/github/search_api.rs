use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;

use crate::config::MinerConfig;
use crate::error::{Error, Result};
use crate::models::SearchResponse;
use crate::storage::OutputLayout;

/// Retrieval of one raw search API page, isolated so the pagination
/// logic can run against canned bodies.
#[async_trait]
pub trait SearchFetch: Send + Sync {
    async fn fetch_page(&self, query: &str, page: u32, per_page: u32) -> Result<String>;
}

pub struct HttpSearchFetch {
    client: Client,
    base_url: String,
}

impl HttpSearchFetch {
    pub fn new(config: &MinerConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("lfsminer/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }
}

#[async_trait]
impl SearchFetch for HttpSearchFetch {
    async fn fetch_page(&self, query: &str, page: u32, per_page: u32) -> Result<String> {
        let url = format!(
            "{}/search/repositories?q={}&per_page={}&page={}",
            self.base_url, query, per_page, page
        );
        tracing::info!("Querying {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SearchApi(format!(
                "page {} returned {}: {}",
                page, status, body
            )));
        }

        Ok(response.text().await?)
    }
}

/// Discovers repositories through the structured search API,
/// `q=<query>&per_page=100&page=<1..10>`.
pub struct SearchApiMiner<F> {
    fetch: F,
    layout: OutputLayout,
    page_limit: u32,
    per_page: u32,
}

impl<F: SearchFetch> SearchApiMiner<F> {
    pub fn new(fetch: F, layout: OutputLayout, config: &MinerConfig) -> Self {
        Self {
            fetch,
            layout,
            page_limit: config.api_page_limit,
            per_page: config.per_page,
        }
    }

    /// Returns the accumulated repository names in page/array order.
    /// Duplicates across pages are kept; the code search path is the one
    /// with set semantics.
    pub async fn search(&self, group: &str, query: &str) -> Result<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.layout.ensure_group_dirs(group)?;

        let mut repositories = Vec::new();
        for page in 1..=self.page_limit {
            let body = match self.fetch.fetch_page(query, page, self.per_page).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Error while retrieving search results: {}", e);
                    continue;
                }
            };

            // Save the raw page for audit, whether or not it parses.
            if let Err(e) = self.layout.dump_search_page(group, page, &body) {
                tracing::warn!("Could not save search page {}: {}", page, e);
            }

            match extract_repository_names(&body) {
                Ok(Some(names)) => repositories.extend(names),
                Ok(None) => {
                    tracing::info!("Less than {} search results.", self.page_limit * self.per_page);
                    break;
                }
                Err(e) => {
                    tracing::error!(
                        "Error while extracting repository names from page {}: {}",
                        page,
                        e
                    );
                }
            }
        }

        Ok(repositories)
    }
}

/// `Ok(None)` means the response was an empty object, the API's signal
/// that no results remain.
pub(crate) fn extract_repository_names(body: &str) -> Result<Option<Vec<String>>> {
    let value: Value = serde_json::from_str(body)?;
    if value.as_object().is_some_and(|obj| obj.is_empty()) {
        return Ok(None);
    }

    let response: SearchResponse = serde_json::from_value(value)?;
    Ok(Some(
        response.items.into_iter().map(|item| item.full_name).collect(),
    ))
}
