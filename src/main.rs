use livability::cache::{FileCacheService, QueryCache};
use livability::config::Config;
use livability::models::{BoundingBox, Catalog, Coordinates};
use livability::services::{AmenityLoader, HeatmapRenderer, OverpassClient, RatingEngine};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "livability=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: livability <south> <west> <north> <east> <lat> <lng> <profile> \
             [heatmap.ppm [WxH]]"
        );
        std::process::exit(2);
    }

    let numbers: Vec<f64> = args[..6]
        .iter()
        .map(|a| a.parse())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid coordinate argument: {}", e))?;
    let bbox = BoundingBox::new(numbers[0], numbers[1], numbers[2], numbers[3])?;
    let point = Coordinates::new(numbers[4], numbers[5])?;
    let profile_name = &args[6];

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path);
            Catalog::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Catalog::default(),
    };

    let fetcher = Arc::new(OverpassClient::new(config.overpass_url.clone()));
    let cache: Arc<dyn QueryCache> = Arc::new(FileCacheService::new(&config.cache_path));
    let loader = AmenityLoader::new(fetcher, cache, catalog.clone())?
        .with_spatial_threshold(config.spatial_index_threshold);
    let engine = RatingEngine::new(catalog)?;

    tracing::info!(
        "Loading amenities for box ({}, {}, {}, {})",
        bbox.south,
        bbox.west,
        bbox.north,
        bbox.east
    );
    let index = loader.load(&bbox).await?;
    tracing::info!("Indexed {} categories", index.category_count());

    let rating = engine.average_rating(&index, profile_name, &point)?;
    println!("{:.3}", rating);

    if let Some(path) = args.get(7) {
        let (width, height) = parse_size(args.get(8).map(String::as_str).unwrap_or("256x256"))?;
        let profile = engine
            .catalog()
            .profile(profile_name)
            .ok_or_else(|| format!("Unknown rating profile: {}", profile_name))?;

        let data = HeatmapRenderer::default().render(&bbox, width, height, &index, profile)?;
        write_ppm(path, width, height, &data)?;
        tracing::info!("Heatmap written to {}", path);
    }

    Ok(())
}

fn parse_size(raw: &str) -> Result<(usize, usize), String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("Invalid size {} (expected WxH)", raw))?;
    let width = w.parse().map_err(|_| format!("Invalid width: {}", w))?;
    let height = h.parse().map_err(|_| format!("Invalid height: {}", h))?;
    Ok((width, height))
}

/// Dump the RGBA raster as a binary PPM, compositing alpha over white.
fn write_ppm(path: &str, width: usize, height: usize, rgba: &[u8]) -> std::io::Result<()> {
    let mut out = Vec::with_capacity(width * height * 3 + 32);
    out.extend_from_slice(format!("P6\n{} {}\n255\n", width, height).as_bytes());
    for pixel in rgba.chunks_exact(4) {
        let alpha = pixel[3] as u32;
        for &channel in &pixel[..3] {
            let value = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
            out.push(value as u8);
        }
    }
    std::fs::write(path, out)
}
