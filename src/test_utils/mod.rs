//! Helpers shared by unit tests.

use scraper::{ElementRef, Html, Selector};
pub(crate) use tempfile::TempDir;

/// A fresh temporary directory whose name starts with `prefix`.
///
/// The directory and its contents are deleted when the returned value is
/// dropped.
#[track_caller]
pub(crate) fn temp_dir(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("could not create temp dir")
}

pub(crate) async fn parse_html_fragment(response: axum::response::Response) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_fragment(&text)
}

pub(crate) async fn parse_html_document(response: axum::response::Response) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
pub(crate) fn must_select<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    html.select(&Selector::parse(selector).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No element found matching \"{selector}\""))
}

pub(crate) fn select_count(html: &Html, selector: &str) -> usize {
    html.select(&Selector::parse(selector).unwrap()).count()
}

pub(crate) fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let value = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        value, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {value:?}"
    );
}
