use crate::{
    lookup::{DetailView, ListingView, NotFoundView},
    record::columns,
};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{body}</body>\n</html>\n",
        escape(title),
    )
}

pub fn listing(view: &ListingView) -> String {
    let mut body = String::from("<h1>Pays</h1>\n<ul>\n");
    for name in &view.countries {
        body.push_str(&format!(
            "<li><a href=\"/country/{}\">{}</a></li>\n",
            urlencoding::encode(name),
            escape(name),
        ));
    }
    body.push_str("</ul>\n");
    page("Pays", &body)
}

pub fn detail(view: &DetailView) -> String {
    let rows = [
        (columns::CAPITAL, &view.capital),
        (columns::POPULATION, &view.population),
        (columns::AREA, &view.area),
        (columns::CAPITAL_POPULATION, &view.capital_population),
        (columns::LATITUDE, &view.latitude),
        (columns::LONGITUDE, &view.longitude),
    ];

    let mut body = format!("<h1>{}</h1>\n<table>\n", escape(&view.country));
    for (label, value) in rows {
        body.push_str(&format!("<tr><th>{label}</th><td>{}</td></tr>\n", escape(value)));
    }
    body.push_str("</table>\n<p><a href=\"/\">Retour</a></p>\n");
    page(&view.country, &body)
}

pub fn error(view: &NotFoundView) -> String {
    page(
        view.message,
        &format!("<p>{}</p>\n<p><a href=\"/\">Retour</a></p>\n", escape(view.message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn encodes_links() {
        let html = listing(&ListingView {
            countries: vec!["Côte d'Ivoire".into()],
        });
        assert!(html.contains("<a href=\"/country/C%C3%B4te%20d%27Ivoire\">Côte d&#39;Ivoire</a>"));
    }
}
