use core::time::Duration;
use std::path::Path;

use compact_str::CompactString;
use reqwest::Client;
use scraper::Html;

use crate::{
    config::USER_AGENT,
    extract::{extract_class, extract_value},
    record::{CountryRecord, FetchTarget},
    table::{CountryTable, TableError},
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Where pages come from.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

impl PageSource for Client {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let res = self.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(res.text().await?)
    }
}

pub fn basic(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Scrapes one country and its capital.
///
/// Fields that cannot be found are left unknown; a page that cannot be
/// fetched drops the whole record.
pub async fn fetch_country<S: PageSource>(source: &S, target: &FetchTarget) -> Option<CountryRecord> {
    let name = &target.name;

    let page = match source.fetch(&target.country_url).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(target: "fetch", "[{name}] {}: {e}", target.country_url);
            return None;
        }
    };
    let (population, area, capital) = {
        let doc = Html::parse_document(&page);
        (
            extract_value(&doc, "Population"),
            extract_value(&doc, "Superficie"),
            extract_value(&doc, "Capitale"),
        )
    };

    let page = match source.fetch(&target.capital_url).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(target: "fetch", "[{name}] {}: {e}", target.capital_url);
            return None;
        }
    };
    let doc = Html::parse_document(&page);

    let record = CountryRecord {
        name: name.clone(),
        population,
        area,
        capital,
        capital_population: extract_value(&doc, "Population"),
        latitude: extract_class(&doc, "latitude"),
        longitude: extract_class(&doc, "longitude"),
    };
    tracing::debug!(target: "fetch", "[{name}] {record:?}");

    Some(record)
}

/// Fetches every target in order, sleeping `delay` after each attempt.
///
/// Failed countries are skipped. A name seen earlier in the run (ignoring
/// case) is skipped as well.
pub async fn collect<S: PageSource>(
    source: &S,
    targets: &[FetchTarget],
    delay: Duration,
) -> Vec<CountryRecord> {
    let mut seen = hashbrown::HashSet::<CompactString>::new();
    let mut records = Vec::with_capacity(targets.len());

    for (i, target) in targets.iter().enumerate() {
        tracing::info!(target: "pipeline", "[{}/{}] {}", i + 1, targets.len(), target.name);

        if let Some(record) = fetch_country(source, target).await {
            if seen.insert(record.name.to_lowercase().into()) {
                records.push(record);
            } else {
                tracing::warn!(target: "pipeline", "duplicate country {:?}, keeping the first one", record.name);
            }
        }

        tokio::time::sleep(delay).await;
    }

    records
}

/// Runs a whole scrape and writes the result to `output`.
///
/// Nothing is written unless every target has been attempted.
pub async fn run_pipeline<S: PageSource>(
    source: &S,
    targets: &[FetchTarget],
    delay: Duration,
    output: &Path,
) -> Result<CountryTable, TableError> {
    let records = collect(source, targets, delay).await;
    let table = CountryTable::from_records(&records);
    table.write_csv(output)?;

    tracing::info!(
        target: "pipeline",
        "\x1b[36mwrote {}/{} countries to {}\x1b[0m",
        records.len(),
        targets.len(),
        output.display(),
    );

    Ok(table)
}
