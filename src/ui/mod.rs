// ============================================================================
// Module : ui
// ============================================================================
// Interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod card;   // Formatage d'une carte (prix, variation, date)
pub mod events; // Gestion des événements clavier
pub mod grid;   // Rendu ratatui de la vue
pub mod view;   // View : fonction pure de ViewState

// Re-exports pour simplifier les imports
pub use events::{Action, Event, EventHandler};
pub use grid::render;
pub use view::{view, View};
