use std::path::PathBuf;

use catalog::DatasetCatalog;
use clap::Parser;
use navigation::Explorer;
use reqwest::Client;
use streaming::Fetcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod camera;
mod fetchers;
mod output;
mod session;

use fetchers::{FsFetcher, HttpFetcher};
use session::{Session, Step};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Drill down Indonesian provinces, regencies and districts"
)]
struct Args {
    /// Regions to click, top down: province code, regency name, district name
    path: Vec<String>,

    /// Folder holding the boundary files (used unless a base URL is given)
    #[arg(long, env = "EXPLORER_DATA_ROOT", default_value = "data/indonesia-district-master 3")]
    data_root: PathBuf,

    /// Fetch boundary files over HTTP from this base URL instead
    #[arg(long, env = "EXPLORER_BASE_URL")]
    base_url: Option<String>,

    /// Dataset catalog JSON (defaults to the built-in Indonesian table)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the catalog in use as JSON and exit
    #[arg(long)]
    print_catalog: bool,

    /// Hover this region of the final layer
    #[arg(long)]
    hover: Option<String>,

    /// Levels to go back up after the drill-down
    #[arg(long, default_value_t = 0)]
    back: u32,

    /// Return to the province overview at the end
    #[arg(long)]
    reset: bool,

    /// Print the final layer as GeoJSON instead of a summary
    #[arg(long)]
    geojson: bool,

    /// Simulated frames per second for camera animation
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Give up if the view has not settled after this many frames
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => DatasetCatalog::from_json_slice(&tokio::fs::read(path).await?)?,
        None => DatasetCatalog::indonesia(),
    };

    let (catalog, fetcher): (DatasetCatalog, Box<dyn Fetcher>) = match &args.base_url {
        Some(base) => {
            info!(%base, "fetching boundary files over HTTP");
            (
                catalog.with_base_url(base.as_str()),
                Box::new(HttpFetcher::new(Client::new())),
            )
        }
        None => {
            info!(root = %args.data_root.display(), "reading boundary files from disk");
            (
                catalog.with_base_url(""),
                Box::new(FsFetcher::new(&args.data_root)),
            )
        }
    };

    if args.print_catalog {
        println!("{}", catalog.to_json_pretty()?);
        return Ok(());
    }

    let mut script: Vec<Step> = args.path.iter().cloned().map(Step::Click).collect();
    script.extend((0..args.back).map(|_| Step::Back));
    if args.reset {
        script.push(Step::Reset);
    }
    script.extend(args.hover.iter().cloned().map(Step::Hover));

    let mut session = Session::new(
        Explorer::new(catalog),
        fetcher.as_ref(),
        args.fps,
        args.max_frames,
    );
    session.run(script).await?;
    info!(frames = session.frames(), "view settled");

    if args.geojson {
        let layer = session
            .display()
            .regions
            .as_ref()
            .map(output::layer_geojson)
            .unwrap_or_else(|| serde_json::json!({"type": "FeatureCollection", "features": []}));
        println!("{}", serde_json::to_string_pretty(&layer)?);
    } else {
        let summary = output::summarize(session.explorer(), session.display(), session.frames());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
