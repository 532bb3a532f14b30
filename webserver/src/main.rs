//! WebServer process entry point
//!
//! Opens the timetable stored in a JSON file and serves it over HTTP. Every
//! option can also come from the environment or a `.env` file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use engine::{EngineConfig, PlacementPolicy, RealJsonStore, StoreGateway, TimetableEngine};
use shared::{ProcessId, logging, process_info};
use webserver::WebServer;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "School timetable HTTP API")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "TIMETABLE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP server
    #[arg(long, env = "TIMETABLE_PORT", default_value = "3001")]
    port: u16,

    /// JSON document holding the school
    #[arg(long, env = "TIMETABLE_DATA_FILE", default_value = engine::DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TIMETABLE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Front-end bundle to serve, with `index.html` as fallback
    #[arg(long, env = "TIMETABLE_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Refuse lesson placements that fail validation instead of recording conflicts
    #[arg(long, env = "TIMETABLE_STRICT_PLACEMENT")]
    strict_placement: bool,

    /// Reload the data file every N seconds
    #[arg(long, env = "TIMETABLE_RELOAD_INTERVAL_SECS")]
    reload_interval_secs: Option<u64>,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        if self.strict_placement {
            EngineConfig::strict()
        } else {
            EngineConfig {
                placement_policy: PlacementPolicy::Permissive,
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    process_info!(
        ProcessId::current(),
        "🌐 WebServer starting on {} with data file {}",
        address,
        args.data_file.display()
    );

    let gateway = RealJsonStore::with_path(&args.data_file);
    logging::log_progress(ProcessId::current(), "Opening timetable", &gateway.describe());
    let engine = TimetableEngine::open(gateway, args.engine_config())
        .await
        .context("Failed to open the timetable")?;

    let mut server = WebServer::new(address, engine);
    if let Some(dir) = &args.static_dir {
        server = server.with_static_dir(dir);
    }
    if let Some(secs) = args.reload_interval_secs.filter(|secs| *secs > 0) {
        server = server.with_reload_interval(Duration::from_secs(secs));
    }

    server.run().await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
