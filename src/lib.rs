// ============================================================================
// StockGrid - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod api;     // Client du backend /api/stocks/
pub mod app;     // Contrôleur de la vue (ViewState)
pub mod config;  // Arguments CLI et configuration
pub mod logging; // Logs vers fichier
pub mod models;  // Structures de données
pub mod ui;      // Interface utilisateur
pub mod worker;  // Tâche de fetch et jeton de vie
