//! Rendu pur d'un `ViewState`.
//!
//! `view()` décide *quoi* afficher ; `grid::render` décide seulement *où*.

use chrono::{Local, Locale, TimeZone};
use std::fmt::Display;

use crate::app::{Phase, ViewState};
use crate::ui::card::StockCard;

/// Texte de l'indicateur de chargement
pub const LOADING_TEXT: &str = "Loading...";

/// Titre au-dessus de la grille
pub const GRID_TITLE: &str = "S&P 500 Stocks";

/// Affiché quand le backend renvoie une liste vide
pub const EMPTY_TEXT: &str = "No stocks";

/// Tout ce que l'écran montre pour un état donné
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Indicateur seul, centré, sans données
    Loading,
    /// Ligne seule, centrée, déjà préfixée par `Error: `
    Error(String),
    /// Une carte par titre, dans l'ordre de la liste
    Cards(Vec<StockCard>),
}

/// Ligne affichée pour un message d'erreur
pub fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// Dérive la vue, dates dans le fuseau local
pub fn view(state: &ViewState, locale: Locale) -> View {
    view_in(state, &Local, locale)
}

/// Dérive la vue avec un fuseau explicite pour les dates
pub fn view_in<Tz>(state: &ViewState, tz: &Tz, locale: Locale) -> View
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match state.phase() {
        Phase::Loading => View::Loading,
        Phase::Errored(message) => View::Error(error_text(message)),
        Phase::Loaded(stocks) => View::Cards(
            stocks
                .iter()
                .map(|stock| StockCard::from_stock_in(stock, tz, locale))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use chrono::Utc;

    #[test]
    fn test_loading_view() {
        assert_eq!(view_in(&ViewState::new(), &Utc, Locale::en_US), View::Loading);
    }

    #[test]
    fn test_error_views() {
        let mut state = ViewState::new();
        state.settle(Err(FetchError::Http { status: 500 }));
        assert_eq!(
            view_in(&state, &Utc, Locale::en_US),
            View::Error("Error: Failed to fetch stocks".to_string())
        );

        let mut state = ViewState::new();
        state.settle(Err(FetchError::Transport("Network down".to_string())));
        assert_eq!(
            view_in(&state, &Utc, Locale::en_US),
            View::Error("Error: Network down".to_string())
        );
    }

    #[test]
    fn test_empty_list_is_loaded_not_error() {
        let mut state = ViewState::new();
        state.settle(Ok(Vec::new()));
        assert_eq!(view_in(&state, &Utc, Locale::en_US), View::Cards(Vec::new()));
    }
}
