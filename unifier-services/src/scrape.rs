//! Scrape orchestration across platform clients.

use futures::future;
use tracing::{debug, info, instrument, warn};
use unifier_core::{ProductRecord, Site, UnifierError, UnifierResult};
use unifier_kalshi::KalshiClient;
use unifier_polymarket::PolymarketClient;
use unifier_web::{MarketSiteClient, PageTextClient};

/// One source to scrape.
///
/// Catalog sites fetch from the endpoint their client was built with;
/// `url` names the page for the browser harvester, which has no default
/// and requires one.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub site: Site,
    pub url: Option<String>,
}

impl SourceSpec {
    pub fn new(site: Site) -> Self {
        Self { site, url: None }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Service dispatching scrapes to the per-platform clients.
#[derive(Clone)]
pub struct ScrapeService {
    polymarket: PolymarketClient,
    kalshi: KalshiClient,
    market_site: MarketSiteClient,
    page_text: PageTextClient,
}

impl ScrapeService {
    pub fn new(
        polymarket: PolymarketClient,
        kalshi: KalshiClient,
        market_site: MarketSiteClient,
        page_text: PageTextClient,
    ) -> Self {
        Self {
            polymarket,
            kalshi,
            market_site,
            page_text,
        }
    }

    /// Builds the service from optional catalog URL overrides, falling
    /// back to each client's default endpoint. Clients are constructed
    /// once here and reused across every fetch.
    pub fn from_overrides(
        polymarket_url: Option<String>,
        kalshi_url: Option<String>,
        market_url: Option<String>,
    ) -> Self {
        let polymarket = match polymarket_url {
            Some(url) => PolymarketClient::with_catalog_url(url),
            None => PolymarketClient::new(),
        };
        let kalshi = match kalshi_url {
            Some(url) => KalshiClient::with_catalog_url(url),
            None => KalshiClient::new(),
        };
        let market_site = match market_url {
            Some(url) => MarketSiteClient::with_catalog_url(url),
            None => MarketSiteClient::new(),
        };
        Self::new(polymarket, kalshi, market_site, PageTextClient::new())
    }

    /// Fetches product records for one source.
    ///
    /// Failures coming back from a client are tagged with the source's
    /// site so callers aggregating several sources keep the attribution.
    #[instrument(skip(self))]
    pub async fn fetch_records(&self, source: &SourceSpec) -> UnifierResult<Vec<ProductRecord>> {
        let records = match source.site {
            Site::Polymarket => self.polymarket.fetch_catalog().await,
            Site::Kalshi => self.kalshi.fetch_catalog().await,
            Site::PredictionMarket => self.market_site.fetch_catalog().await,
            Site::Browser => {
                let url = source.url.as_deref().ok_or_else(|| {
                    UnifierError::config("Browser source requires a page URL")
                })?;
                self.page_text.harvest_page(url).await
            }
        };
        records.map_err(|e| UnifierError::site(source.site.as_str(), e.to_string()))
    }

    /// Fetches all sources concurrently, keeping source order in the
    /// combined output. A failed source is logged and skipped so one
    /// unreachable site never sinks the run.
    #[instrument(skip(self, sources))]
    pub async fn fetch_all(&self, sources: &[SourceSpec]) -> Vec<ProductRecord> {
        info!("Scraping {} sources", sources.len());

        let results =
            future::join_all(sources.iter().map(|source| self.fetch_records(source))).await;

        let mut records = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(batch) => {
                    debug!("Got {} records from {}", batch.len(), source.site);
                    records.extend(batch);
                }
                Err(e) => {
                    warn!("Skipping source: {}", e);
                }
            }
        }

        info!("Collected {} product records", records.len());
        records
    }
}

impl Default for ScrapeService {
    fn default() -> Self {
        Self::new(
            PolymarketClient::new(),
            KalshiClient::new(),
            MarketSiteClient::new(),
            PageTextClient::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_spec_builder_pins_url() {
        let source = SourceSpec::new(Site::Kalshi).with_url("https://example.com/markets");
        assert_eq!(source.site, Site::Kalshi);
        assert_eq!(source.url.as_deref(), Some("https://example.com/markets"));
    }

    #[tokio::test]
    async fn test_browser_source_without_url_is_a_config_error() {
        let service = ScrapeService::default();
        let err = service
            .fetch_records(&SourceSpec::new(Site::Browser))
            .await
            .expect_err("browser source must demand a URL");
        assert!(matches!(err, UnifierError::Config(_)));
    }

    #[test]
    fn test_overrides_configure_the_held_clients() {
        let service = ScrapeService::from_overrides(
            Some("https://mirror.example/polymarket".to_string()),
            None,
            Some("https://mirror.example/markets".to_string()),
        );
        assert_eq!(
            service.polymarket.catalog_url(),
            "https://mirror.example/polymarket"
        );
        assert_eq!(
            service.kalshi.catalog_url(),
            "https://api.elections.kalshi.com/trade-api/v2/markets",
            "sites without an override keep their default endpoint"
        );
        assert_eq!(
            service.market_site.catalog_url(),
            "https://mirror.example/markets"
        );
    }

    #[tokio::test]
    async fn test_fetch_failures_carry_the_site() {
        // port 9 refuses connections, so the fetch fails without leaving the host
        let service = ScrapeService::from_overrides(
            Some("http://127.0.0.1:9/markets".to_string()),
            None,
            None,
        );
        let err = service
            .fetch_records(&SourceSpec::new(Site::Polymarket))
            .await
            .expect_err("nothing is listening on port 9");
        match err {
            UnifierError::Site { site, .. } => assert_eq!(site, "polymarket"),
            other => panic!("expected a site-tagged error, got {}", other),
        }
    }
}
