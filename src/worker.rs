// ============================================================================
// Worker : tâche de fetch en arrière-plan
// ============================================================================
// La boucle d'événements ne doit jamais attendre le réseau :
// - le fetch tourne dans une tâche tokio
// - son résultat revient par un channel
// - seule la boucle UI écrit dans l'état (via App::poll)
//
// Le jeton Liveness marque la vue comme montée. Il est vérifié avant de
// livrer le résultat : une vue démontée ne reçoit plus rien.
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{FetchError, StockSource};
use crate::models::Stock;

/// Résultat d'un fetch, tel que livré à la vue
pub type FetchOutcome = Result<Vec<Stock>, FetchError>;

/// Jeton de vie d'une vue montée
///
/// Clonable : toutes les copies partagent le même drapeau.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// Crée un jeton actif
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// True tant que la vue n'a pas été démontée
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marque la vue comme démontée (définitif)
    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Lance l'unique fetch d'une vue
///
/// Doit être appelé dans un contexte tokio. La tâche renvoie true si le
/// résultat a été livré, false si la vue avait disparu entre-temps.
pub fn spawn_fetch(
    source: Arc<dyn StockSource>,
    liveness: Liveness,
    outcome_tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        debug!("Fetch task started");
        let outcome = source.fetch_stocks().await;

        if !liveness.is_alive() {
            warn!(ok = outcome.is_ok(), "View torn down before fetch settled, dropping outcome");
            return false;
        }

        match &outcome {
            Ok(stocks) => info!(stocks = stocks.len(), "Fetch settled"),
            Err(e) => info!(error = %e, "Fetch failed"),
        }

        // Le récepteur peut avoir été lâché juste après le test de vie
        outcome_tx.send(outcome).is_ok()
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::{mpsc, Mutex};
    use tokio::sync::oneshot;

    /// Source bloquée jusqu'à ce que le test ouvre la porte
    struct GatedSource {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl StockSource for GatedSource {
        async fn fetch_stocks(&self) -> Result<Vec<Stock>, FetchError> {
            let gate = self.gate.lock().await.take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Err(FetchError::Transport("late".to_string()))
        }
    }

    #[test]
    fn test_liveness_release_is_shared() {
        let token = Liveness::new();
        let copy = token.clone();
        assert!(copy.is_alive());

        token.release();
        assert!(!copy.is_alive());
    }

    #[tokio::test]
    async fn test_outcome_delivered_while_alive() {
        let (open, gate) = oneshot::channel();
        let source = Arc::new(GatedSource { gate: Mutex::new(Some(gate)) });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn_fetch(source, Liveness::new(), tx);
        open.send(()).unwrap();

        assert!(handle.await.unwrap());
        assert_eq!(rx.recv().await, Some(Err(FetchError::Transport("late".to_string()))));
    }

    #[tokio::test]
    async fn test_outcome_dropped_after_teardown() {
        let (open, gate) = oneshot::channel();
        let source = Arc::new(GatedSource { gate: Mutex::new(Some(gate)) });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let liveness = Liveness::new();

        let handle = spawn_fetch(source, liveness.clone(), tx);
        liveness.release();
        open.send(()).unwrap();

        assert!(!handle.await.unwrap());
        // Le sender a été lâché par la tâche, sans rien envoyer
        assert_eq!(rx.recv().await, None);
    }
}
