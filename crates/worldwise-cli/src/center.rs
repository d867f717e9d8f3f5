//! `center` command: runs the map-center task once against the given inputs.

use clap::Args;
use tokio::sync::watch;
use url::Url;
use worldwise_core::{AppConfig, Position};
use worldwise_position::{
    spawn_map_center, GeolocationSource, HttpGeolocationProvider, PositionResolver,
    UrlPositionSource,
};

/// App location used when no `--url` is given.
const APP_ROOT: &str = "http://localhost:5173/app";

#[derive(Debug, Args)]
pub struct CenterArgs {
    /// Current app URL; `lat`/`lng` query parameters take precedence
    #[arg(long)]
    pub url: Option<String>,
    /// Ask the configured location service for the device position first
    #[arg(long)]
    pub locate: bool,
    /// Simulate a map click at this latitude (requires --click-lng)
    #[arg(long, requires = "click_lng", allow_negative_numbers = true)]
    pub click_lat: Option<f64>,
    /// Simulate a map click at this longitude (requires --click-lat)
    #[arg(long, requires = "click_lat", allow_negative_numbers = true)]
    pub click_lng: Option<f64>,
}

impl CenterArgs {
    fn click(&self) -> Option<Position> {
        Position::from_parts(self.click_lat, self.click_lng)
    }
}

/// Print the resolved map center and, for a click, the navigation it asks for.
///
/// # Errors
///
/// Returns an error if `--url` does not parse or the location service is
/// misconfigured. A failed location lookup is reported but not fatal.
pub(crate) async fn run_center(config: &AppConfig, args: &CenterArgs) -> anyhow::Result<()> {
    let location = Url::parse(args.url.as_deref().unwrap_or(APP_ROOT))
        .map_err(|e| anyhow::anyhow!("invalid --url: {e}"))?;

    let geolocation = GeolocationSource::new(HttpGeolocationProvider::from_config(config)?, None);
    if args.locate {
        geolocation.get_position().await;
        if let Some(error) = geolocation.state().error {
            eprintln!("location unavailable: {error}");
        }
    }

    let (_navigate, url_rx) = watch::channel(location.clone());
    let mut map = spawn_map_center(
        PositionResolver::new(config.default_center),
        UrlPositionSource::new(url_rx),
        geolocation.subscribe(),
    );
    println!("center: {}", map.center());

    if let Some(at) = args.click() {
        map.click(at);
        if let Some(intent) = map.next_intent().await {
            println!("center: {}", map.center());
            println!("navigate: {}", intent.apply_to(&location));
        }
    }

    map.shutdown().await;
    Ok(())
}
