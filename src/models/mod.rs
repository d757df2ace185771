// ============================================================================
// Module : models
// ============================================================================
// Structures de données reçues du backend
// ============================================================================

pub mod stock; // Déclaration du module stock (fichier stock.rs)

pub use stock::{parse_timestamp, parse_timestamp_in, Stock};
