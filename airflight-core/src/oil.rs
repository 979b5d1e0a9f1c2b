use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::config::OilSettings;

#[derive(Deserialize, Debug)]
struct OilQuote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

/// Where the crude barrel price used for fuel costs comes from.
#[derive(Debug, Clone)]
pub struct OilPriceSource {
    fallback: f64,
    quote_url: Option<String>,
}

impl OilPriceSource {
    pub fn new(settings: &OilSettings) -> Self {
        Self {
            fallback: settings.barrel_price_dollar,
            quote_url: settings.quote_url.clone(),
        }
    }

    /// Live quote when a URL is configured, the configured price otherwise or on failure.
    #[instrument(skip(self))]
    pub async fn current(&self) -> f64 {
        let Some(url) = self.quote_url.as_deref() else {
            return self.fallback;
        };

        match fetch_quote(url).await {
            Ok(price) if price.is_finite() && price > 0.0 => {
                info!(price = %price, "Fetched barrel price");
                price
            }
            Ok(price) => {
                warn!(price = %price, fallback = %self.fallback, "Ignoring nonsensical barrel price");
                self.fallback
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "Failed to fetch barrel price");
                self.fallback
            }
        }
    }
}

async fn fetch_quote(url: &str) -> Result<f64, reqwest::Error> {
    let quote = reqwest::get(url)
        .await?
        .error_for_status()?
        .json::<OilQuote>()
        .await?;
    Ok(quote.regular_market_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_url_uses_configured_price() {
        let source = OilPriceSource::new(&OilSettings {
            barrel_price_dollar: 77.5,
            quote_url: None,
        });
        assert_eq!(source.current().await, 77.5);
    }

    #[tokio::test]
    async fn unreachable_quote_falls_back() {
        let source = OilPriceSource::new(&OilSettings {
            barrel_price_dollar: 80.0,
            quote_url: Some("http://127.0.0.1:9/quote".to_string()),
        });
        assert_eq!(source.current().await, 80.0);
    }

    #[test]
    fn quote_shape() {
        let quote: OilQuote =
            serde_json::from_str(r#"{"regularMarketPrice": 73.12, "currency": "USD"}"#).unwrap();
        assert_eq!(quote.regular_market_price, 73.12);
    }
}
