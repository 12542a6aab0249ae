use clap::Parser;
use mercator_tiles::api::{create_router, ServerConfig};
use mercator_tiles::MAX_ZOOM;

/// HTTP server exposing the tile coordinate conversions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "MERCATOR_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Upload size limit for batch requests in megabytes
    #[arg(long, default_value_t = 100)]
    max_body_mb: usize,

    /// Deepest zoom level accepted by the endpoints
    #[arg(long, default_value_t = MAX_ZOOM)]
    max_zoom: i32,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind.clone(),
            max_body_bytes: self.max_body_mb * 1024 * 1024,
            max_zoom: self.max_zoom,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let config = args.config();
    let app = create_router(&config);

    let listener = tokio::net::TcpListener::bind(config.bind.as_str()).await?;

    log::info!("Mercator tile API listening on http://{}", config.bind);
    log::info!("  GET  /api/resolution?zoom=<z>");
    log::info!("  GET  /api/latlon/meters?lat=<lat>&lon=<lon>");
    log::info!("  GET  /api/tile/<z>/<x>/<y>");
    log::info!("  POST /api/batch?zoom=<z> (multipart/form-data: csv file)");

    axum::serve(listener, app).await
}
