// ============================================================================
// Module : api
// ============================================================================
// Client du backend et taxonomie des erreurs de fetch
// ============================================================================

pub mod backend; // Client HTTP GET /api/stocks/
pub mod error;   // FetchError

// Re-export des éléments principaux
pub use backend::{parse_stocks, BackendClient, StockSource, STOCKS_PATH};
pub use error::{FetchError, HTTP_FAILURE_MESSAGE};
