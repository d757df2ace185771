//! Échecs du fetch, tels que vus par l'utilisateur.
//!
//! `Display` donne le message affiché : la vue le rend sous la forme
//! `Error: <message>`.

use thiserror::Error;

/// Message affiché pour toute réponse non-2xx
pub const HTTP_FAILURE_MESSAGE: &str = "Failed to fetch stocks";

/// Façons dont le fetch de la liste peut échouer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Réponse reçue avec un statut non-2xx (corps ignoré)
    #[error("{}", HTTP_FAILURE_MESSAGE)]
    Http { status: u16 },

    /// Pas de réponse, ou corps qui n'est pas du JSON : message d'origine tel quel
    #[error("{0}")]
    Transport(String),

    /// JSON valide mais hors schéma
    #[error("Invalid stock data: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FetchError::Http { status: 500 }.to_string(), HTTP_FAILURE_MESSAGE);
        assert_eq!(FetchError::Transport("Network down".into()).to_string(), "Network down");
        assert_eq!(
            FetchError::Schema("missing field `sector`".into()).to_string(),
            "Invalid stock data: missing field `sector`"
        );
    }
}
