use core::time::Duration;
use std::{fs, path::PathBuf};

use atlas::{
    lookup::{Atlas, CountryView},
    record::{FetchTarget, columns},
    scrape::{FetchError, PageSource, run_pipeline},
    table::load_table,
};

/// Serves two canned pages; every other URL is a network failure.
struct Wiki;

impl PageSource for Wiki {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match url {
            "https://fr.wikipedia.org/wiki/France" => Ok(r#"<table class="infobox_v2">
                <tr><th>Capitale</th><td><a href="/wiki/Paris">Paris</a></td></tr>
                <tr><th>Superficie</th><td>643&nbsp;801&nbsp;km<sup>2</sup></td></tr>
                <tr><th>Population</th><td>68&nbsp;373&nbsp;433&nbsp;hab.</td></tr>
                </table>"#
                .to_owned()),
            "https://fr.wikipedia.org/wiki/Paris" => Ok(r#"<table>
                <tr><th>Population</th><td>2&nbsp;102&nbsp;650&nbsp;hab.</td></tr>
                </table>
                <span class="geo"><span class="latitude">48°&nbsp;51′&nbsp;24″&nbsp;nord</span>,
                <span class="longitude">2°&nbsp;21′&nbsp;08″&nbsp;est</span></span>"#
                .to_owned()),
            _ => Err(FetchError::Status(503)),
        }
    }
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("atlas-it-{name}-{}.csv", std::process::id()))
}

#[tokio::test]
async fn failed_country_is_dropped() {
    let output = scratch("pipeline");
    let targets = [
        FetchTarget::new("Japon", "https://fr.wikipedia.org/wiki/Japon", "https://fr.wikipedia.org/wiki/Tokyo"),
        FetchTarget::new("France", "https://fr.wikipedia.org/wiki/France", "https://fr.wikipedia.org/wiki/Paris"),
    ];

    let written = run_pipeline(&Wiki, &targets, Duration::ZERO, &output).await.unwrap();
    let table = load_table(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0, columns::NAME), Some("France"));
    assert_eq!(table.get(0, columns::CAPITAL), Some("Paris"));
    assert_eq!(table.get(0, columns::AREA), Some("643801km2"));
    assert_eq!(table.get(0, columns::POPULATION), Some("68373433hab."));
    assert_eq!(table.get(0, columns::CAPITAL_POPULATION), Some("2102650hab."));
    assert_eq!(table.get(0, columns::LATITUDE), Some("48°51′24″nord"));
    assert_eq!(table.get(0, columns::LONGITUDE), Some("2°21′08″est"));

    let atlas = Atlas::new(table);
    assert_eq!(atlas.list_names(), ["France"]);
    assert!(matches!(atlas.country_detail("FRANCE"), CountryView::Detail(_)));
    assert!(matches!(atlas.country_detail("Japon"), CountryView::NotFound(_)));
}

#[tokio::test]
async fn all_failures_write_an_empty_table() {
    let output = scratch("all-fail");
    let targets = [FetchTarget::new("Japon", "https://fr.wikipedia.org/wiki/Japon", "https://fr.wikipedia.org/wiki/Tokyo")];

    run_pipeline(&Wiki, &targets, Duration::ZERO, &output).await.unwrap();
    let table = load_table(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert!(table.is_empty());
    for column in columns::REQUIRED {
        assert!(table.column_index(column).is_some(), "{column} missing");
    }
}

#[tokio::test]
async fn rerun_replaces_previous_table() {
    let output = scratch("rerun");
    fs::write(&output, "Nom du pays,Population\nAtlantide,0\n").unwrap();
    let targets = [FetchTarget::new("France", "https://fr.wikipedia.org/wiki/France", "https://fr.wikipedia.org/wiki/Paris")];

    run_pipeline(&Wiki, &targets, Duration::ZERO, &output).await.unwrap();
    let table = load_table(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert_eq!(Atlas::new(table).list_names(), ["France"]);
}
