use core::time::Duration;
use std::{fs::File, io::BufReader, path::Path};

use crate::record::FetchTarget;

pub const DEFAULT_CSV: &str = "countries_info.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8000";

/// Per-request timeout of the page client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause after every fetch attempt.
pub const COURTESY_DELAY: Duration = Duration::from_secs(2);

pub const USER_AGENT: &str = concat!("country-atlas/", env!("CARGO_PKG_VERSION"));

#[rustfmt::skip]
const DEFAULT_TARGETS: [(&str, &str, &str); 2] = [
    ("Japon", "https://fr.wikipedia.org/wiki/Japon", "https://fr.wikipedia.org/wiki/Tokyo"),
    ("France", "https://fr.wikipedia.org/wiki/France", "https://fr.wikipedia.org/wiki/Paris"),
];

pub fn default_targets() -> Vec<FetchTarget> {
    DEFAULT_TARGETS
        .into_iter()
        .map(|(name, country, capital)| FetchTarget::new(name, country, capital))
        .collect()
}

/// Reads a JSON array of `{ "name", "country_url", "capital_url" }`.
pub fn load_targets(path: &Path) -> anyhow::Result<Vec<FetchTarget>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
