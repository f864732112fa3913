//! admitfit HTTP server binary

use admitfit::server::run_server;
use admitfit::{CollegeSource, CollegeStatsClient, MatchEngine, ServiceConfig, StaticCatalogSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("admitfit college matching service");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = ServiceConfig::from_env()?;

    let mut sources: Vec<Box<dyn CollegeSource>> = Vec::new();

    // Local catalog is consulted before the remote API
    if let Some(ref path) = config.catalog_path {
        let catalog = StaticCatalogSource::from_json_file(path)?;
        if catalog.is_empty() {
            eprintln!("⚠️  College catalog {} has no entries", path);
        } else {
            println!("✓ College catalog: {} ({} colleges)", path, catalog.len());
        }
        sources.push(Box::new(catalog));
    }

    if let Some(ref url) = config.stats_api_url {
        let client = CollegeStatsClient::new(url.clone(), config.stats_api_key.clone());
        match client.health_check().await {
            Ok(true) => println!("✓ College stats API is healthy: {}", url),
            Ok(false) => eprintln!("⚠️  College stats API unhealthy: {}", url),
            Err(e) => eprintln!("⚠️  College stats API unreachable ({}): {}", url, e),
        }
        sources.push(Box::new(client));
    }

    if sources.is_empty() {
        println!("✓ No college sources configured; scoring request data only");
    }

    println!(
        "✓ Limits: {} colleges per request, top {} by default",
        config.max_colleges, config.default_top_n
    );

    let engine = MatchEngine::new(sources, &config);

    println!("✓ Starting HTTP server on port {}...", config.port);
    println!();

    run_server(engine, config.port).await?;

    Ok(())
}
