use std::sync::LazyLock;

use compact_str::CompactString;
use scraper::{Html, Selector};

use crate::record::UNKNOWN;

static SEL_TH_TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th, td").unwrap());

/// Drops non-breaking spaces and trims surrounding whitespace.
pub fn clean_text(text: &str) -> CompactString {
    text.replace('\u{a0}', "").trim().into()
}

fn or_unknown(value: CompactString) -> CompactString {
    if value.is_empty() {
        CompactString::const_new(UNKNOWN)
    } else {
        value
    }
}

/// Value of the first `td` following a `th` whose text is exactly `label`.
///
/// A missing label and an empty cell both yield [`UNKNOWN`].
pub fn extract_value(document: &Html, label: &str) -> CompactString {
    let mut cells = document.select(&SEL_TH_TD);

    let found = cells
        .by_ref()
        .any(|e| e.value().name() == "th" && e.text().collect::<String>() == label);
    if !found {
        return CompactString::const_new(UNKNOWN);
    }

    cells
        .find(|e| e.value().name() == "td")
        .map_or_else(
            || CompactString::const_new(UNKNOWN),
            |td| or_unknown(clean_text(&td.text().collect::<String>())),
        )
}

/// Text of the first `span` carrying `class`, e.g. `latitude`.
pub fn extract_class(document: &Html, class: &str) -> CompactString {
    let Ok(selector) = Selector::parse(&format!("span.{class}")) else {
        tracing::warn!(target: "extract", "bad class marker {class:?}");
        return CompactString::const_new(UNKNOWN);
    };

    document
        .select(&selector)
        .next()
        .map_or_else(
            || CompactString::const_new(UNKNOWN),
            |span| or_unknown(clean_text(&span.text().collect::<String>())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFOBOX: &str = r#"<html><body><table class="infobox">
        <tr><th scope="row">Capitale</th><td><a href="/wiki/Paris">Paris</a></td></tr>
        <tr><th>Superficie</th><td>643&nbsp;801&nbsp;km<sup>2</sup></td></tr>
        <tr><th>Population</th><td>  </td></tr>
        <tr><th>Devise</th></tr>
        </table>
        <p><span class="latitude">48°&nbsp;51′</span><span class="longitude"></span></p>
        </body></html>"#;

    #[test]
    fn reads_cell_after_label() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_value(&doc, "Capitale"), "Paris");
        assert_eq!(extract_value(&doc, "Superficie"), "643801km2");
    }

    #[test]
    fn missing_label_is_unknown() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_value(&doc, "Monnaie"), UNKNOWN);
        assert_eq!(extract_value(&Html::parse_document(""), "Capitale"), UNKNOWN);
    }

    #[test]
    fn label_is_case_sensitive() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_value(&doc, "capitale"), UNKNOWN);
    }

    #[test]
    fn empty_cell_is_unknown() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_value(&doc, "Population"), UNKNOWN);
    }

    #[test]
    fn label_without_cell_is_unknown() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_value(&doc, "Devise"), UNKNOWN);
    }

    #[test]
    fn coordinates_by_class() {
        let doc = Html::parse_document(INFOBOX);
        assert_eq!(extract_class(&doc, "latitude"), "48°51′");
        assert_eq!(extract_class(&doc, "longitude"), UNKNOWN);
        assert_eq!(extract_class(&doc, "altitude"), UNKNOWN);
    }

    #[test]
    fn clean_text_strips_nbsp() {
        assert_eq!(clean_text("\u{a0} 125\u{a0}681\u{a0}593 hab. \n"), "125681593 hab.");
    }
}
