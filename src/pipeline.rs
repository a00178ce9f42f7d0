use crate::analysis::AttributesAnalyzer;
use crate::config::MinerConfig;
use crate::credentials::CredentialProvider;
use crate::error::Result;
use crate::github::{
    AttributeFetcher, CodeSearchCrawler, FixedDelay, HttpAttributeSource, HttpRenderer,
    HttpSearchFetch, SearchApiMiner,
};
use crate::models::{AnalysisSummary, MiningStrategy, QueryGroup};
use crate::storage::OutputLayout;

/// Composes miner, fetcher and analyzer per query group. Groups run
/// strictly sequentially; a failed group (a rejected login included) is
/// logged and the remaining groups still run.
pub struct MiningPipeline {
    config: MinerConfig,
    layout: OutputLayout,
    credentials: Box<dyn CredentialProvider>,
}

impl MiningPipeline {
    pub fn new(
        config: MinerConfig,
        layout: OutputLayout,
        credentials: Box<dyn CredentialProvider>,
    ) -> Self {
        Self {
            config,
            layout,
            credentials,
        }
    }

    pub async fn run(&self, groups: &[QueryGroup]) -> Result<()> {
        for group in groups {
            tracing::info!("Mining query group \"{}\"", group.name);
            match self.run_group(group).await {
                Ok(summary) => {
                    tracing::info!(
                        "\"{}\": {} repositories using Git LFS, {} unity usages",
                        group.name,
                        summary.lfs_count,
                        summary.unity_count
                    );
                }
                Err(e) => {
                    tracing::error!("Query group \"{}\" failed: {}", group.name, e);
                }
            }
        }
        Ok(())
    }

    async fn run_group(&self, group: &QueryGroup) -> Result<AnalysisSummary> {
        let repositories = match group.strategy {
            MiningStrategy::SearchApi => {
                let miner = SearchApiMiner::new(
                    HttpSearchFetch::new(&self.config)?,
                    self.layout.clone(),
                    &self.config,
                );
                miner.search(&group.name, &group.query).await?
            }
            MiningStrategy::CodeSearch => {
                let credentials = self.credentials.credentials()?;
                let crawler = CodeSearchCrawler::new(
                    HttpRenderer::new(&self.config)?,
                    FixedDelay::new(self.config.crawl_delay),
                    self.layout.clone(),
                    &self.config,
                );
                crawler.crawl(&group.name, &group.query, &credentials).await?
            }
        };
        tracing::info!(
            "Found {} candidate repositories for \"{}\"",
            repositories.len(),
            group.name
        );

        let fetcher = AttributeFetcher::new(
            HttpAttributeSource::new(&self.config)?,
            self.layout.clone(),
        );
        fetcher.fetch_all(&group.name, &repositories).await?;

        AttributesAnalyzer::new(self.layout.clone()).analyze(&group.name)
    }
}
