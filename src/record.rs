use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Stand-in for any field that could not be determined.
pub const UNKNOWN: &str = "Inconnu";

pub mod columns {
    /// Name column as written by the scraper.
    pub const LEGACY_NAME: &str = "Nom du pays";
    /// Name column as seen by the lookup service.
    pub const NAME: &str = "Pays";
    pub const POPULATION: &str = "Population";
    pub const AREA: &str = "Superficie";
    pub const CAPITAL: &str = "Capitale";
    pub const CAPITAL_POPULATION: &str = "Population capitale";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";

    /// Header order of the file written at the end of a scrape.
    pub const WRITTEN: [&str; 7] = [
        LEGACY_NAME,
        POPULATION,
        AREA,
        CAPITAL,
        CAPITAL_POPULATION,
        LATITUDE,
        LONGITUDE,
    ];

    /// Columns guaranteed to exist once a table has been loaded.
    pub const REQUIRED: [&str; 6] = [NAME, CAPITAL, POPULATION, AREA, LATITUDE, LONGITUDE];
}

/// One scraped country. Every field is kept as the text found on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryRecord {
    pub name: CompactString,
    pub population: CompactString,
    pub area: CompactString,
    pub capital: CompactString,
    pub capital_population: CompactString,
    pub latitude: CompactString,
    pub longitude: CompactString,
}

impl CountryRecord {
    /// A record named `name` with every other field unknown.
    pub fn unknown(name: impl Into<CompactString>) -> Self {
        let unknown = CompactString::const_new(UNKNOWN);
        Self {
            name: name.into(),
            population: unknown.clone(),
            area: unknown.clone(),
            capital: unknown.clone(),
            capital_population: unknown.clone(),
            latitude: unknown.clone(),
            longitude: unknown,
        }
    }

    /// Cells in [`columns::WRITTEN`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.population.as_str(),
            self.area.as_str(),
            self.capital.as_str(),
            self.capital_population.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
        ]
    }
}

/// One (country, country page, capital page) input of a scrape run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTarget {
    pub name: CompactString,
    pub country_url: CompactString,
    pub capital_url: CompactString,
}

impl FetchTarget {
    pub fn new(
        name: impl Into<CompactString>,
        country_url: impl Into<CompactString>,
        capital_url: impl Into<CompactString>,
    ) -> Self {
        Self {
            name: name.into(),
            country_url: country_url.into(),
            capital_url: capital_url.into(),
        }
    }
}
