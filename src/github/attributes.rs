use std::fs;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::config::MinerConfig;
use crate::error::Result;
use crate::storage::OutputLayout;

/// Retrieval of one repository's attribute file. `Ok(None)` means the
/// repository has no such file, which is an expected, common outcome.
#[async_trait]
pub trait AttributeSource: Send + Sync {
    async fn fetch(&self, repository: &str) -> Result<Option<String>>;
}

pub struct HttpAttributeSource {
    client: Client,
    base_url: String,
}

impl HttpAttributeSource {
    pub fn new(config: &MinerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("lfsminer/0.1")
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.raw_base_url.clone(),
        })
    }
}

#[async_trait]
impl AttributeSource for HttpAttributeSource {
    async fn fetch(&self, repository: &str) -> Result<Option<String>> {
        let url = format!("{}/{}/master/.gitattributes", self.base_url, repository);
        let response = self.client.get(&url).send().await?;

        // Any non-success status (404 included) means "not present".
        if !response.status().is_success() {
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }
}

/// Downloads each candidate repository's .gitattributes file into the
/// query group's folder, tolerating absence. No retries.
pub struct AttributeFetcher<S> {
    source: S,
    layout: OutputLayout,
}

impl<S: AttributeSource> AttributeFetcher<S> {
    pub fn new(source: S, layout: OutputLayout) -> Self {
        Self { source, layout }
    }

    pub async fn fetch_all(&self, group: &str, repositories: &[String]) -> Result<()> {
        if repositories.is_empty() {
            return Ok(());
        }

        self.layout.ensure_group_dirs(group)?;

        let pb = ProgressBar::new(repositories.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
                .unwrap()
                .progress_chars("#>-"),
        );

        for repository in repositories {
            match self.source.fetch(repository).await {
                Ok(Some(content)) => {
                    let path = self.layout.attribute_file_path(group, repository);
                    if let Err(e) = fs::write(&path, content) {
                        tracing::warn!("Could not write {}: {}", path.display(), e);
                    }
                }
                Ok(None) => {
                    tracing::info!("No .gitattributes file found for {}.", repository);
                }
                Err(e) => {
                    tracing::info!("Could not retrieve .gitattributes for {}: {}", repository, e);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(())
    }
}
