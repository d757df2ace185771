// ============================================================================
// API Client : backend des cotations
// ============================================================================
// Récupère la liste des titres depuis GET /api/stocks/
//
// Trois issues possibles :
// - statut non-2xx        -> FetchError::Http (le corps est ignoré)
// - pas de réponse / JSON -> FetchError::Transport (message d'origine)
//   illisible
// - JSON hors schéma      -> FetchError::Schema
// ============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use crate::api::error::FetchError;
use crate::models::Stock;

/// Chemin fixe de l'endpoint
pub const STOCKS_PATH: &str = "/api/stocks/";

// ============================================================================
// Trait : StockSource
// ============================================================================
// CONCEPT RUST : trait object + async
// - Le contrôleur ne connaît que ce trait
// - BackendClient en est l'implémentation HTTP, les tests fournissent
//   leurs propres sources en mémoire
// ============================================================================

/// Source de la liste des titres
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Récupère la liste complète, dans l'ordre du serveur
    async fn fetch_stocks(&self) -> Result<Vec<Stock>, FetchError>;
}

/// Client HTTP vers le backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    url: String,
}

impl BackendClient {
    /// Crée un client pour `base_url` (ex: "http://127.0.0.1:8000")
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            client,
            url: stocks_url(base_url),
        })
    }

    /// URL complète interrogée par fetch_stocks()
    pub fn endpoint(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StockSource for BackendClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_stocks(&self) -> Result<Vec<Stock>, FetchError> {
        debug!("Sending HTTP request to backend");
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!(error = %e, "HTTP request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "Backend returned error status");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let stocks = parse_stocks(&body)?;

        info!(stocks = stocks.len(), "Successfully fetched stocks");
        Ok(stocks)
    }
}

/// Construit l'URL de l'endpoint à partir de l'URL de base
fn stocks_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), STOCKS_PATH)
}

/// Décode le corps d'une réponse 2xx
///
/// Un corps qui n'est pas du JSON est une erreur de transport ; un JSON
/// valide mais qui ne correspond pas au schéma est une erreur de schéma.
pub fn parse_stocks(body: &[u8]) -> Result<Vec<Stock>, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "Response body is not JSON");
        FetchError::Transport(e.to_string())
    })?;

    let stocks: Vec<Stock> = serde_json::from_value(value).map_err(|e| {
        error!(error = %e, "Response body does not match stock schema");
        FetchError::Schema(e.to_string())
    })?;

    for (index, stock) in stocks.iter().enumerate() {
        stock.validate().map_err(|detail| {
            error!(index, detail = %detail, "Invalid stock record");
            FetchError::Schema(detail)
        })?;
    }

    let duplicates = count_duplicate_tickers(&stocks);
    if duplicates > 0 {
        warn!(duplicates, "Response contains duplicate tickers");
    }

    Ok(stocks)
}

fn count_duplicate_tickers(stocks: &[Stock]) -> usize {
    let mut seen = std::collections::HashSet::new();
    stocks.iter().filter(|s| !seen.insert(s.ticker.as_str())).count()
}

// ============================================================================
// Tests unitaires
// ============================================================================
