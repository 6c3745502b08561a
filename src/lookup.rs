use compact_str::CompactString;
use serde::Serialize;

use crate::{
    record::{UNKNOWN, columns},
    table::CountryTable,
};

pub const NOT_FOUND: &str = "country not found";

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub countries: Vec<CompactString>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub country: CompactString,
    pub capital: CompactString,
    pub population: CompactString,
    pub area: CompactString,
    pub capital_population: CompactString,
    pub latitude: CompactString,
    pub longitude: CompactString,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub message: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CountryView {
    Detail(DetailView),
    NotFound(NotFoundView),
}

/// Read-only lookups over a loaded table.
#[derive(Debug)]
pub struct Atlas {
    table: CountryTable,
}

impl Atlas {
    pub const fn new(table: CountryTable) -> Self {
        Self { table }
    }

    /// Every non-empty country name, in table order.
    pub fn list_names(&self) -> Vec<CompactString> {
        self.table
            .column(columns::NAME)
            .map(|names| names.filter(|n| !n.is_empty()).map(CompactString::new).collect())
            .unwrap_or_default()
    }

    pub fn listing_view(&self) -> ListingView {
        ListingView {
            countries: self.list_names(),
        }
    }

    /// First row whose name equals `name` once both are lower-cased.
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.table
            .column(columns::NAME)?
            .position(|n| n.to_lowercase() == wanted)
    }

    pub fn country_detail(&self, name: &str) -> CountryView {
        let Some(row) = self.find(name) else {
            tracing::debug!(target: "lookup", "no country named {name:?}");
            return CountryView::NotFound(NotFoundView { message: NOT_FOUND });
        };

        let cell = |column: &str| CompactString::new(self.table.get(row, column).unwrap_or(UNKNOWN));
        CountryView::Detail(DetailView {
            country: cell(columns::NAME),
            capital: cell(columns::CAPITAL),
            population: cell(columns::POPULATION),
            area: cell(columns::AREA),
            capital_population: cell(columns::CAPITAL_POPULATION),
            latitude: cell(columns::LATITUDE),
            longitude: cell(columns::LONGITUDE),
        })
    }
}
