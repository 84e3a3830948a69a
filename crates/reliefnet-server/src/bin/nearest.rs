//! Find the nearest registered facility in each requested category.
//!
//! Coordinates come from `--lat`/`--lon` or are prompted for on stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};

use reliefnet_db::{Database, StoreError};
use reliefnet_server::config::Config;

const DEFAULT_CATEGORIES: &[&str] = &["police_stations", "hospitals"];

#[derive(Debug, Default, PartialEq)]
struct Args {
    lat: Option<f64>,
    lon: Option<f64>,
    categories: Vec<String>,
}

fn usage() -> &'static str {
    "Usage: reliefnet-nearest [--lat DEG] [--lon DEG] [--category TABLE]...\n\n\
     Categories default to police_stations and hospitals.\n\
     Missing coordinates are read from stdin.\n"
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "-h" | "--help" => {
                print!("{}", usage());
                std::process::exit(0);
            }
            "--lat" | "--lon" | "--category" => {
                i += 1;
                let v = args
                    .get(i)
                    .with_context(|| format!("{a} requires a value"))?;
                match a {
                    "--lat" => parsed.lat = Some(parse_coordinate(v, 90.0)?),
                    "--lon" => parsed.lon = Some(parse_coordinate(v, 180.0)?),
                    _ => parsed.categories.push(v.clone()),
                }
            }
            other => bail!("unexpected argument: {other}\n\n{}", usage()),
        }
        i += 1;
    }

    Ok(parsed)
}

fn parse_coordinate(raw: &str, limit: f64) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("not a coordinate: {raw}"))?;
    if !value.is_finite() || value.abs() > limit {
        bail!("coordinate out of range: {raw}");
    }
    Ok(value)
}

fn prompt(input: &mut impl BufRead, label: &str, limit: f64) -> Result<f64> {
    print!("Enter your {label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no {label} given");
    }
    parse_coordinate(&line, limit)
}

/// `police_stations` -> `Police Station`
fn category_label(category: &str) -> String {
    let singular = category.strip_suffix('s').unwrap_or(category);
    singular
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    reliefnet_server::init_tracing("reliefnet=warn", true);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    let config = Config::from_env()?;
    let db = Database::new(&config.db_path, config.db_timeout);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let user_lat = match args.lat {
        Some(lat) => lat,
        None => prompt(&mut input, "latitude", 90.0)?,
    };
    let user_lon = match args.lon {
        Some(lon) => lon,
        None => prompt(&mut input, "longitude", 180.0)?,
    };

    let categories: Vec<String> = if args.categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        args.categories
    };

    for category in &categories {
        let label = category_label(category);
        match db.find_nearest_facility(category, user_lat, user_lon) {
            Ok(nearest) => {
                println!(
                    "Nearest {}: {} ({:.2} km away)",
                    label, nearest.name, nearest.distance_km
                );
                println!("Address: {}", nearest.address);
            }
            Err(StoreError::NotFound(_)) => println!("No {label} registered"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
