//! Integration tests for chart page rendering and PDF composition.
//!
//! Stores are built through the real aggregation engine with a canned
//! fetcher, then composed into PDF files under a temporary directory.

use chrono::NaiveDate;
use rategraph_charts::{ChartsPdfBuilder, DocumentMeta, PageRenderer, Palette};
use rategraph_common::test_utils::{init_test_logging, mock_date, StubRateFetcher};
use rategraph_common::{CurrencyCode, RateGraphError};
use rategraph_store::{RatesStorage, RatesStore};

fn d(day: u32) -> NaiveDate {
    mock_date(2022, 5, day)
}

fn c(code: &str) -> CurrencyCode {
    CurrencyCode::new(code)
}

async fn usd_eur_store() -> RatesStore {
    let fetcher = StubRateFetcher::new()
        .with_rate(d(16), "usd", "eur", 0.95)
        .with_rate(d(17), "usd", "eur", 0.96)
        .with_rate(d(18), "usd", "eur", 0.94);
    let mut storage = RatesStorage::new(fetcher);
    storage.update(&[d(16), d(17), d(18)], &[c("usd")]).await.unwrap();
    storage.rates().clone()
}

fn builder(bases: &[&str], quotes: &[&str]) -> ChartsPdfBuilder {
    ChartsPdfBuilder::new(
        "midnight",
        640,
        480,
        bases.iter().map(CurrencyCode::new).collect(),
        quotes.iter().map(CurrencyCode::new).collect(),
        DocumentMeta::default(),
    )
}

#[tokio::test]
async fn compose_writes_a_nonempty_pdf() {
    init_test_logging();
    let store = usd_eur_store().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.pdf");

    builder(&["usd"], &["eur"]).compose_pdf(&store, &path).unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[tokio::test]
async fn compose_fails_for_missing_base_currency() {
    let store = usd_eur_store().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.pdf");

    let error = builder(&["usd", "chf"], &["eur"])
        .compose_pdf(&store, &path)
        .unwrap_err();

    match error {
        RateGraphError::Render { message } => assert!(message.contains("chf")),
        other => panic!("expected Render error, got {:?}", other),
    }
}

#[tokio::test]
async fn compose_fails_for_missing_quote_column() {
    let store = usd_eur_store().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.pdf");

    let error = builder(&["usd"], &["jpy"])
        .compose_pdf(&store, &path)
        .unwrap_err();

    assert!(matches!(error, RateGraphError::Render { .. }));
    // All-or-fail: no document was produced
    assert!(!path.exists());
}

#[tokio::test]
async fn rendering_is_deterministic() {
    let store = usd_eur_store().await;
    let series = store.series(&c("usd")).unwrap();
    let renderer = PageRenderer::new(Palette::midnight(), 640, 480);

    let first = renderer.render_pair(series, &c("usd"), &c("eur")).unwrap();
    let second = renderer.render_pair(series, &c("usd"), &c("eur")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn trend_color_depends_on_endpoints() {
    // 0.95 -> 0.94 is a downtrend, 0.94 -> 0.96 an uptrend; the line color
    // differs, so the rendered pages must differ
    let down = usd_eur_store().await;

    let fetcher = StubRateFetcher::new()
        .with_rate(d(16), "usd", "eur", 0.94)
        .with_rate(d(17), "usd", "eur", 0.95)
        .with_rate(d(18), "usd", "eur", 0.96);
    let mut storage = RatesStorage::new(fetcher);
    storage.update(&[d(16), d(17), d(18)], &[c("usd")]).await.unwrap();

    let renderer = PageRenderer::new(Palette::midnight(), 640, 480);
    let down_page = renderer
        .render_pair(down.series(&c("usd")).unwrap(), &c("usd"), &c("eur"))
        .unwrap();
    let up_page = renderer
        .render_pair(storage.rates().series(&c("usd")).unwrap(), &c("usd"), &c("eur"))
        .unwrap();

    assert_ne!(down_page, up_page);
}

#[tokio::test]
async fn single_point_series_still_renders() {
    let fetcher = StubRateFetcher::new().with_rate(d(16), "usd", "eur", 0.95);
    let mut storage = RatesStorage::new(fetcher);
    storage.update(&[d(16)], &[c("usd")]).await.unwrap();

    let renderer = PageRenderer::new(Palette::midnight(), 640, 480);
    let page = renderer
        .render_pair(storage.rates().series(&c("usd")).unwrap(), &c("usd"), &c("eur"))
        .unwrap();

    assert_eq!(page.len(), 640 * 480 * 3);
}

#[test]
fn title_page_has_expected_dimensions() {
    let renderer = PageRenderer::new(Palette::light(), 320, 240);
    let page = renderer
        .render_title_page(
            "Exchange Rates Charts",
            &[c("usd"), c("gbp")],
            &[c("eur")],
            "rategraph",
        )
        .unwrap();

    assert_eq!(page.len(), 320 * 240 * 3);
}
