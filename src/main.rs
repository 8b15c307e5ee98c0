use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use node_atlas::api::{run_server, AppState};
use node_atlas::cli::{Args, Task};
use node_atlas::dao::CrawlerDb;
use node_atlas::metrics::ExportMetrics;
use node_atlas::service::{export_nodes, load_nodes, write_site, GeoService};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Args::parse().merge_with_config()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if settings.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match settings.task {
        Task::Export {
            crawler_db,
            city_db,
            asn_db,
            out,
        } => {
            info!("Exporting nodes from {}", crawler_db.display());
            let db = CrawlerDb::open(&crawler_db)
                .with_context(|| format!("Failed to open {}", crawler_db.display()))?;
            let geo = GeoService::open(&city_db, &asn_db)?;
            let metrics = ExportMetrics::new();

            export_nodes(&db, &geo, &out, &metrics)?;
            metrics.print_summary();
        }
        Task::Build { nodes, out_dir } => {
            let features = load_nodes(&nodes).await?;
            let files = write_site(&features, &settings.map, &settings.chart, &out_dir)?;
            for file in files {
                info!("  {}", file.display());
            }
        }
        Task::Serve {
            nodes,
            host,
            port,
            static_dir,
        } => {
            let features = load_nodes(&nodes).await?;
            let state = AppState::new(features, settings.map, settings.chart, nodes.to_string());
            run_server(state, &host, port, static_dir).await?;
        }
    }

    Ok(())
}
