use clap::{Parser, Subcommand};
use doc_rag_core::{
    discover_pdf_files, BlobHttpStore, CharacterNgramEmbedder, IngestOutcome, IngestionOptions,
    IngestionPipeline, ObjectStore, PipelineConfig, QueryService, SearchServiceClient,
    UploadGateway,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doc-rag", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Storage connection string (`Endpoint=...;Key=...`)
    #[arg(long, env = "RAG_STORAGE_CONNECTION_STRING", hide_env_values = true)]
    storage_connection: String,

    /// Search service base URL
    #[arg(long, env = "RAG_SEARCH_ENDPOINT")]
    search_endpoint: String,

    /// Search service API key
    #[arg(long, env = "RAG_SEARCH_KEY", hide_env_values = true)]
    search_key: String,
}

#[derive(Subcommand)]
enum Command {
    /// Upload one PDF into the documents container.
    Upload {
        /// Path to the PDF file.
        #[arg(long)]
        file: String,
    },
    /// Upload every PDF found under a folder, recursively.
    UploadDir {
        /// Folder to scan for PDFs.
        #[arg(long)]
        folder: String,
    },
    /// Run the ingestion pipeline for an object already in storage
    /// (plays the storage creation trigger).
    Ingest {
        /// Object name within the documents container.
        #[arg(long)]
        object: String,
    },
    /// Query the index and print the top matching chunks.
    Search {
        /// Free-text query.
        #[arg(long)]
        query: String,
        /// Number of results to return.
        #[arg(long, default_value = "3")]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    // Fatal before any operation if a setting is missing or malformed.
    let config = PipelineConfig::from_parts(
        &cli.storage_connection,
        &cli.search_endpoint,
        &cli.search_key,
    )?;

    info!(version = env!("CARGO_PKG_VERSION"), index = %config.index_name, "doc-rag boot");

    match cli.command {
        Command::Upload { file } => {
            let store = BlobHttpStore::new(&config.storage);
            let gateway = UploadGateway::new(store, config.container.clone());

            let receipt = gateway.upload_file(Path::new(&file)).await?;
            println!(
                "uploaded '{}' to container '{}'; ingestion runs asynchronously, results appear in the index shortly",
                receipt.object_name, receipt.container
            );
        }
        Command::UploadDir { folder } => {
            let store = BlobHttpStore::new(&config.storage);
            let gateway = UploadGateway::new(store, config.container.clone());

            let files = discover_pdf_files(Path::new(&folder));
            if files.is_empty() {
                println!("no pdf files found under {folder}");
                return Ok(());
            }

            let mut uploaded = 0usize;
            for path in &files {
                match gateway.upload_file(path).await {
                    Ok(receipt) => {
                        uploaded += 1;
                        info!(object = %receipt.object_name, "uploaded");
                    }
                    Err(error) => {
                        warn!(path = %path.display(), error = %error, "upload failed");
                    }
                }
            }
            println!(
                "{uploaded} of {} files uploaded; ingestion runs asynchronously",
                files.len()
            );
        }
        Command::Ingest { object } => {
            let store = BlobHttpStore::new(&config.storage);
            let bytes = store.get_object(&config.container, &object).await?;

            let index = SearchServiceClient::new(
                &config.search_endpoint,
                config.search_key.clone(),
                config.index_name.clone(),
            );
            let pipeline = IngestionPipeline::new(
                index,
                CharacterNgramEmbedder::default(),
                config.index_name.clone(),
                IngestionOptions::default(),
            );

            match pipeline.ingest_object(&object, &bytes).await? {
                IngestOutcome::Skipped { reason } => {
                    println!("skipped '{object}': {reason}");
                }
                IngestOutcome::Indexed(report) => {
                    println!(
                        "indexed '{}': {} pages, {} chunks, checksum {}",
                        report.object_name, report.page_count, report.chunk_count, report.checksum
                    );
                }
            }
        }
        Command::Search { query, top_k } => {
            let index = SearchServiceClient::new(
                &config.search_endpoint,
                config.search_key.clone(),
                config.index_name.clone(),
            );
            let service = QueryService::new(index);

            let hits = service.search(&query, top_k).await?;
            if hits.is_empty() {
                println!("no matching content found in the documents");
                return Ok(());
            }

            for hit in hits {
                println!(
                    "source={} page={} relevance={:.2}",
                    hit.source, hit.page, hit.score
                );
                println!("{}\n", hit.content);
            }
        }
    }

    Ok(())
}
