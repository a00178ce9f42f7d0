use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::MinerConfig;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::github::renderer::PageRenderer;
use crate::storage::OutputLayout;

/// Pause between successive page requests, injectable so crawl-loop
/// tests run without wall-clock waits.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Discovers repositories through the logged-in code search,
/// `q=<query>&type=Code&p=<1..100>`. Results are deduplicated because
/// the code search can return the same repository multiple times.
pub struct CodeSearchCrawler<R, P> {
    renderer: R,
    pacer: P,
    layout: OutputLayout,
    page_limit: u32,
}

impl<R: PageRenderer, P: Pacer> CodeSearchCrawler<R, P> {
    pub fn new(renderer: R, pacer: P, layout: OutputLayout, config: &MinerConfig) -> Self {
        Self {
            renderer,
            pacer,
            layout,
            page_limit: config.crawl_page_limit,
        }
    }

    /// A failed login is returned to the caller; a page failure mid-loop
    /// only aborts the remaining pages and keeps what was accumulated.
    pub async fn crawl(
        &self,
        group: &str,
        query: &str,
        credentials: &Credentials,
    ) -> Result<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.layout.ensure_group_dirs(group)?;
        self.renderer.login(credentials).await?;

        let mut repositories: HashSet<String> = HashSet::new();
        for page in 1..=self.page_limit {
            if page > 1 {
                // GitHub is quite restrictive with the amount of allowed
                // requests per minute to the search page.
                self.pacer.pause().await;
            }

            let rendered = match self.renderer.search_page(query, page).await {
                Ok(rendered) => rendered,
                Err(e) => {
                    tracing::error!("Error while crawling GitHub code search: {}", e);
                    break;
                }
            };

            if rendered.repositories.is_empty() {
                tracing::info!("No new search results found.");
                break;
            }

            repositories.extend(rendered.repositories);

            // Save the page for documentation.
            if let Err(e) = self.layout.dump_code_search_page(group, page, &rendered.html) {
                tracing::warn!("Could not save code search page {}: {}", page, e);
            }
        }

        tracing::info!(
            "{} repositories using GitHub code search found.",
            repositories.len()
        );
        Ok(repositories.into_iter().collect())
    }
}
