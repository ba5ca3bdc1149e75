use clap::Parser;
use geoloader::export;
use geoloader::geocode::{BatchResolver, NominatimClient, RateLimited, DEFAULT_USER_AGENT};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Geoloader — batch geocoder backed by OpenStreetMap Nominatim.
///
/// Resolves free-text place names to coordinates plus a classification
/// tag and writes them as a CSV table (location, latitude, longitude,
/// type). Names that fail to resolve produce rows with empty data
/// fields; a single bad name never aborts the batch.
///
/// Examples:
///   geoloader "Museum of Modern Art" "Burj Khalifa"
///   geoloader --input places.txt --output geo_data.csv
///   geoloader --min-delay 1.5 --retries 3 Alaska
#[derive(Parser)]
#[command(name = "geoloader", version, about, long_about = None)]
struct Cli {
    /// Place names to geocode. With no names and no --input, a small
    /// demo list is used.
    places: Vec<String>,

    /// Read place names from a file, one per line (blank lines skipped).
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output CSV path. Use "-" for stdout.
    #[arg(long, short = 'o', default_value = "./geo_data.csv")]
    output: PathBuf,

    /// User-Agent sent to Nominatim (its usage policy requires one).
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    agent: String,

    /// Minimum delay between consecutive requests, in seconds.
    #[arg(long, default_value_t = 1.0)]
    min_delay: f64,

    /// Wait between retry attempts after a failed request, in seconds.
    #[arg(long, default_value_t = 5.0)]
    retry_wait: f64,

    /// Retry attempts after a failed request.
    #[arg(long, default_value_t = 2)]
    retries: u32,
}

const DEMO_PLACES: &[&str] = &[
    "Museum of Modern Art",
    "iuyt8765(*&)",
    "Alaska",
    "Franklin's Barbecue",
    "Burj Khalifa",
];

fn main() {
    let cli = Cli::parse();

    let places = gather_places(&cli);
    if places.is_empty() {
        eprintln!("Error: No place names to geocode.");
        std::process::exit(1);
    }

    let min_delay = seconds_flag(cli.min_delay).unwrap_or_else(|| {
        eprintln!("Error: --min-delay must be a non-negative number of seconds.");
        std::process::exit(1);
    });
    let retry_wait = seconds_flag(cli.retry_wait).unwrap_or_else(|| {
        eprintln!("Error: --retry-wait must be a non-negative number of seconds.");
        std::process::exit(1);
    });

    let client = NominatimClient::with_user_agent(&cli.agent);
    let throttled = RateLimited::new(client)
        .with_min_delay(min_delay)
        .with_retry(cli.retries, retry_wait);
    let mut resolver = BatchResolver::new(throttled);

    eprintln!("Geocoding {} place(s)...", places.len());
    let records = resolver.resolve_all(&places);

    let resolved = records.iter().filter(|r| r.latitude.is_some()).count();
    eprintln!("Resolved {} of {} place(s).", resolved, records.len());

    let result = if cli.output == Path::new("-") {
        export::write_csv(&records, std::io::stdout().lock())
    } else {
        export::write_csv_file(&records, &cli.output)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if cli.output != Path::new("-") {
        eprintln!("Wrote {}", cli.output.display());
    }
}

/// Priority: --input file > positional names > demo list.
fn gather_places(cli: &Cli) -> Vec<String> {
    if let Some(ref path) = cli.input {
        let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error: Cannot read {}: {}", path.display(), e);
            std::process::exit(1);
        });
        return contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
    }

    if !cli.places.is_empty() {
        return cli.places.clone();
    }

    DEMO_PLACES.iter().map(|s| s.to_string()).collect()
}

/// Convert a seconds flag to a Duration. None for negative, NaN,
/// infinite, or values too large to represent.
fn seconds_flag(value: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(value).ok()
}
