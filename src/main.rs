use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lfsminer::{
    CredentialProvider, EnvCredentials, MinerConfig, MiningPipeline, MiningStrategy,
    OutputLayout, PromptCredentials, QueryGroup,
};

#[derive(Parser, Debug)]
#[command(name = "lfsminer")]
#[command(version = "0.1.0")]
#[command(about = "Mine GitHub for repositories using Git LFS and classify their .gitattributes files")]
struct Args {
    /// Output folder for mining data, fetched files, and the results report
    output: PathBuf,

    /// Delay between code search pages, in milliseconds
    #[arg(long)]
    crawl_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("lfsminer=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    if args.output.exists() && !args.output.is_dir() {
        anyhow::bail!(
            "The specified output folder \"{}\" is an already existing file.",
            args.output.display()
        );
    }
    std::fs::create_dir_all(&args.output)?;

    let mut config = MinerConfig::from_env();
    if let Some(delay_ms) = args.crawl_delay_ms {
        config.crawl_delay = Duration::from_millis(delay_ms);
    }

    // Prefer credentials from the environment; prompt otherwise.
    let credentials: Box<dyn CredentialProvider> = match EnvCredentials::from_env() {
        Some(provider) => Box::new(provider),
        None => Box::new(PromptCredentials),
    };

    let groups = vec![
        QueryGroup::new(
            "Best Code Match Repositories",
            "lfs+filter+diff+merge&in:file&filename:.gitattributes&path:/",
            MiningStrategy::CodeSearch,
        ),
        QueryGroup::new(
            "Top Repositories",
            "stars:>1000&sort=stars&order=desc",
            MiningStrategy::SearchApi,
        ),
        QueryGroup::new(
            "Top Java Repositories",
            "language:java&stars:>1000&sort=stars&order=desc",
            MiningStrategy::SearchApi,
        ),
    ];

    let layout = OutputLayout::new(&args.output);
    let pipeline = MiningPipeline::new(config, layout, credentials);
    pipeline.run(&groups).await?;

    tracing::info!(
        "The analysis has finished. Check \"{}\" for the results.",
        args.output.display()
    );

    Ok(())
}
