// ============================================================================
// Structure : App
// ============================================================================
// Contrôleur de la vue : possède l'état, lance l'unique fetch au montage et
// applique son résultat.
//
// PATTERN : "Application State"
// - Le rendu lit l'état via &App
// - Toutes les écritures de ViewState passent par ViewState::settle()
// - settle() n'accepte qu'un seul résultat : loading passe de true à false
//   une seule fois, sans retour possible
// ============================================================================

use std::sync::Arc;

use chrono::Locale;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::api::StockSource;
use crate::models::Stock;
use crate::worker::{spawn_fetch, FetchOutcome, Liveness};

// ============================================================================
// ViewState : stocks / loading / error
// ============================================================================

/// Phase de la vue, dérivée de ViewState
///
/// CONCEPT RUST : Enum pour state machine
/// - Loading : état initial
/// - Errored / Loaded : états terminaux, atteints une seule fois
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a> {
    Loading,
    Errored(&'a str),
    Loaded(&'a [Stock]),
}

/// État qui détermine entièrement le rendu
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    stocks: Vec<Stock>,
    loading: bool,
    error: Option<String>,
}

impl ViewState {
    /// État initial : chargement en cours, aucune donnée
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Phase courante, dans l'ordre de priorité du rendu
    pub fn phase(&self) -> Phase<'_> {
        if self.loading {
            Phase::Loading
        } else if let Some(error) = &self.error {
            Phase::Errored(error)
        } else {
            Phase::Loaded(&self.stocks)
        }
    }

    /// Applique le résultat du fetch
    ///
    /// Seul chemin d'écriture de l'état. Retourne false (et ne touche à
    /// rien) si un résultat a déjà été appliqué.
    pub fn settle(&mut self, outcome: FetchOutcome) -> bool {
        if !self.loading {
            warn!("Fetch outcome received after terminal state, ignoring");
            return false;
        }

        match outcome {
            Ok(stocks) => {
                debug!(stocks = stocks.len(), "View loaded");
                self.stocks = stocks;
            }
            Err(e) => {
                debug!(error = %e, "View errored");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// App : contrôleur monté
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    running: bool,

    /// État de la vue (seul App y écrit)
    state: ViewState,

    /// Première rangée de cartes affichée
    scroll_row: usize,

    /// Locale utilisée pour les dates
    locale: Locale,

    /// Jeton de vie partagé avec la tâche de fetch
    liveness: Liveness,

    /// Résultat du fetch, livré par le worker
    outcomes: UnboundedReceiver<FetchOutcome>,
}

impl App {
    /// Monte la vue : état initial puis un seul fetch
    ///
    /// Doit être appelé dans un contexte tokio (Runtime::enter ou async).
    pub fn mount(source: Arc<dyn StockSource>, locale: Locale) -> Self {
        let liveness = Liveness::new();
        let (outcome_tx, outcomes) = mpsc::unbounded_channel();

        info!("Mounting stock view, issuing fetch");
        spawn_fetch(source, liveness.clone(), outcome_tx);

        Self {
            running: true,
            state: ViewState::new(),
            scroll_row: 0,
            locale,
            liveness,
            outcomes,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Récupère le résultat du worker sans bloquer
    ///
    /// Appelé à chaque itération de la boucle. Retourne true si l'état a changé.
    pub fn poll(&mut self) -> bool {
        match self.outcomes.try_recv() {
            Ok(outcome) => self.apply(outcome),
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Attend le résultat du fetch puis l'applique
    pub async fn wait_settled(&mut self) -> bool {
        match self.outcomes.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if !self.liveness.is_alive() {
            warn!("Outcome reached an unmounted view, ignoring");
            return false;
        }
        self.state.settle(outcome)
    }

    /// Démonte la vue : tout résultat tardif sera ignoré
    pub fn unmount(&mut self) {
        if self.liveness.is_alive() {
            info!(loading = self.state.is_loading(), "Unmounting stock view");
            self.liveness.release();
        }
    }

    /// Quitte l'application (et démonte la vue)
    pub fn quit(&mut self) {
        self.running = false;
        self.unmount();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Défilement de la grille
    // ========================================================================
    // Ne touche jamais à ViewState. La borne haute dépend de la taille du
    // terminal : main::run appelle clamp_scroll() avant chaque dessin.
    // ========================================================================

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_add(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_row = 0;
    }

    /// Ramène le défilement dans [0, max_row] et le retourne
    pub fn clamp_scroll(&mut self, max_row: usize) -> usize {
        self.scroll_row = self.scroll_row.min(max_row);
        self.scroll_row
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
