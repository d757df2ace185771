// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne sont plus visibles une fois le TUI lancé : les logs vont
// dans un fichier avec rotation quotidienne.
//
// # Utilisation
// ```bash
// tail -f ~/.local/share/stockgrid/logs/stockgrid.log.*
// RUST_LOG=stockgrid=trace stockgrid
// ```
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filtre utilisé quand RUST_LOG n'est pas défini
pub const DEFAULT_FILTER: &str = "stockgrid=debug,info";

/// Nom de base des fichiers de logs (suffixé par la date)
pub const LOG_FILE_PREFIX: &str = "stockgrid.log";

/// Initialise le système de logging vers `log_dir`
pub fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile : le fetch tourne sur un worker tokio
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .try_init()
        .context("Échec de l'installation du subscriber tracing")?;

    info!(log_dir = %log_dir.display(), "Logging initialisé");
    Ok(())
}
