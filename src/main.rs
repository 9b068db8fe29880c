use anyhow::{Context, Result};
use chrono::Utc;
use review_report::config::{AppConfig, StoreBackend};
use review_report::export::ParquetExporter;
use review_report::models::Report;
use review_report::presentation::MarkdownRenderer;
use review_report::processor::ReportAssembler;
use review_report::storage::{
    DocumentStore, MemoryStore, MinioStore, StorageManager, insert_reviews, load_reviews,
};
use review_report::ReviewRecord;
use std::env;
use std::path::Path;
use tracing::{error, info, warn};

const DEFAULT_CONFIG_PATH: &str = "configs/report.toml";

struct CliArgs {
    from_storage: bool,
    config_path: String,
    input_path: Option<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = env::args().skip(1);
    let mut cli = CliArgs {
        from_storage: false,
        config_path: DEFAULT_CONFIG_PATH.to_string(),
        input_path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from-storage" | "-s" => cli.from_storage = true,
            "--config" | "-c" => {
                cli.config_path = args
                    .next()
                    .context("--config expects a path to a TOML file")?;
            }
            _ => cli.input_path = Some(arg),
        }
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenv::dotenv().ok();

    let cli = parse_args()?;
    let config = AppConfig::from_file(&cli.config_path)
        .context("Failed to load report configuration")?;

    info!(
        "🚀 Starting review report ({:?} store, collection '{}')",
        config.store.backend, config.store.collection
    );

    let minio = match config.store.backend {
        StoreBackend::Minio => {
            let minio_config = config.minio_config()?;
            info!(
                "Using MinIO store: {}@{}",
                minio_config.bucket_name, minio_config.endpoint
            );
            let store = MinioStore::from_config(&minio_config)
                .context("Failed to initialize MinIO storage")?;
            store.ensure_bucket().await?;
            Some(store)
        }
        StoreBackend::Memory => None,
    };
    let memory = MemoryStore::new();
    let store: &dyn DocumentStore = match &minio {
        Some(store) => store,
        None => &memory,
    };

    if cli.from_storage {
        info!("Reading existing reviews from storage");
    } else {
        match &cli.input_path {
            Some(path) => {
                let reviews = read_input(path)?;
                insert_reviews(store, &reviews, &config.store.collection).await?;
            }
            None => warn!("No input file given; reporting on stored reviews only"),
        }
    }

    let reviews = load_reviews(store, &config.store.collection).await?;
    if reviews.is_empty() {
        warn!("⚠️ Collection '{}' holds no reviews", config.store.collection);
    }

    let assembler = ReportAssembler::new(config.report.clone());
    let report = match assembler.assemble(&reviews) {
        Ok(report) => report,
        Err(e) => {
            error!("❌ Failed to build report: {:#}", e);
            return Err(e);
        }
    };

    info!(
        "📊 Report covers {} products{}",
        report.products.len(),
        if report.summary.is_some() { " with cross-product summary" } else { "" }
    );

    let artifacts = render_artifacts(&report, &config.output.currency_symbol)?;
    write_artifacts(&config.output.directory, &artifacts)?;

    if config.output.upload {
        match &minio {
            Some(store) => {
                let now = Utc::now();
                for (file_name, bytes) in &artifacts {
                    let key = StorageManager::report_key(&config.store.collection, now, file_name);
                    store.put_object(&key, bytes).await?;
                    info!("Uploaded {}", key);
                }
            }
            None => warn!("output.upload is set but the store backend is not minio; skipping upload"),
        }
    }

    info!("🎉 Review report written to {}", config.output.directory);
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<ReviewRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path))?;
    let reviews: Vec<ReviewRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Input file {} is not a JSON array of reviews", path))?;
    info!("Read {} reviews from {}", reviews.len(), path);
    Ok(reviews)
}

fn render_artifacts(report: &Report, currency_symbol: &str) -> Result<Vec<(&'static str, Vec<u8>)>> {
    let exporter = ParquetExporter;
    let mut statistics = exporter.statistics_frame(report)?;
    let mut rating_counts = exporter.rating_counts_frame(report)?;

    Ok(vec![
        ("report.json", serde_json::to_vec_pretty(report)?),
        (
            "report.md",
            MarkdownRenderer::new(currency_symbol).render(report).into_bytes(),
        ),
        ("statistics.parquet", exporter.to_parquet(&mut statistics)?),
        ("rating_counts.parquet", exporter.to_parquet(&mut rating_counts)?),
    ])
}

fn write_artifacts(directory: &str, artifacts: &[(&'static str, Vec<u8>)]) -> Result<()> {
    let dir = Path::new(directory);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", directory))?;

    for (file_name, bytes) in artifacts {
        let path = dir.join(file_name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
