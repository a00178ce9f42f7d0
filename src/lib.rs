pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod pipeline;
pub mod storage;

pub use analysis::AttributesAnalyzer;
pub use config::MinerConfig;
pub use credentials::{
    CredentialProvider, Credentials, EnvCredentials, PromptCredentials, StaticCredentials,
};
pub use error::{Error, Result};
pub use github::{AttributeFetcher, CodeSearchCrawler, SearchApiMiner};
pub use models::{MiningStrategy, QueryGroup};
pub use pipeline::MiningPipeline;
pub use storage::OutputLayout;
