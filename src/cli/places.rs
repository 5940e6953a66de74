//! Places command handler
//!
//! Ranks and filters a place list against a reference point.

use crate::config::Config;
use crate::coord::distance::haversine_distance;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{get_ip_locator, Geocoder};
use crate::rank::{load_items, MapContext, RankingMode};
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

/// Places command arguments
#[derive(Args)]
pub struct PlacesArgs {
    /// JSON file with the place list
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Sort mode: distance, rating, or date
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Radius filter in kilometers (0 disables filtering)
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Reference latitude
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Reference longitude
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,

    /// Named reference location (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng", "here"])]
    pub location: Option<String>,

    /// Use current location (IP geolocation) as the reference
    #[arg(long, conflicts_with_all = ["lat", "lng", "location"])]
    pub here: bool,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the places command
pub async fn run(args: PlacesArgs) -> Result<()> {
    let config = Config::load()?;
    let items = load_items(&args.file)?;
    let mut context = MapContext::new(items);

    // Reference precedence: explicit coordinates, geocoded location,
    // IP location, configured default
    let reference = if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        coords
    } else if let Some(location_query) = &args.location {
        let geocoder = Geocoder::for_provider(config.api.provider);
        let results = geocoder.search(location_query, &config.api.key).await?;
        match results.first() {
            Some(result) => {
                eprintln!("Geocoded to: {}", result.address);
                result.coords()
            }
            None => {
                eprintln!("Error: No results found for \"{}\"", location_query);
                std::process::exit(1);
            }
        }
    } else if args.here {
        let location = get_ip_locator().locate().await?;
        eprintln!("Using IP location: {}", location.label);
        location.coords
    } else {
        config.default_reference()
    };
    context.set_reference(reference);

    let mode = match args.sort.as_deref() {
        None => Some(config.ranking.default_sort),
        Some(s) => match RankingMode::from_str(s) {
            Ok(mode) => Some(mode),
            Err(e) => {
                eprintln!("Warning: {} (keeping load order)", e);
                None
            }
        },
    };

    let radius_km = args.radius.unwrap_or(config.ranking.default_radius_km);
    let radius_km = (radius_km.is_finite() && radius_km > 0.0).then_some(radius_km);

    let view = context.view(mode, radius_km);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view).map_err(Error::from)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No places within range");
        return Ok(());
    }

    for (index, item) in view.iter().enumerate() {
        let distance_km = haversine_distance(reference, item.coords) / 1000.0;
        println!(
            "{}. {} ({:.1} km, rating {}, {})",
            index + 1,
            item.title,
            distance_km,
            item.rating,
            item.created
        );
    }

    Ok(())
}
