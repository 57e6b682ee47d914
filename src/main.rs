use anyhow::Result;
use blob_store::BlobStoreConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    blob_store::run(&BlobStoreConfig::default())?;
    Ok(())
}
