//! Configuration du binaire.
//!
//! Les options viennent de `clap`, avec repli sur l'environnement. La vue
//! elle-même n'a aucune configuration : seuls l'adresse du backend, le
//! timeout, la locale des dates et le répertoire de logs sont résolus ici.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Locale;
use clap::Parser;

/// Locale utilisée quand rien d'exploitable n'est configuré
pub const DEFAULT_LOCALE: Locale = Locale::en_US;

/// Arguments de la ligne de commande
#[derive(Debug, Parser)]
#[command(version, about = "Terminal card grid of stock quotes", long_about = None)]
pub struct Args {
    /// Backend base URL; the grid is loaded from `<base-url>/api/stocks/`.
    #[arg(long, env = "STOCKGRID_BASE_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Locale for dates (e.g. `fr_FR`). Defaults to LC_ALL / LC_TIME / LANG.
    #[arg(long, env = "STOCKGRID_LOCALE")]
    pub locale: Option<String>,

    /// Directory for the rolling log files.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Configuration résolue
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub locale: Locale,
    pub log_dir: PathBuf,
}

impl Config {
    /// Résout `args` avec l'environnement du processus
    pub fn from_args(args: Args) -> Result<Self> {
        let system_locale = ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty());

        Self::resolve(args, system_locale.as_deref())
    }

    fn resolve(args: Args, system_locale: Option<&str>) -> Result<Self> {
        let base_url = args.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("base URL must start with http:// or https://, got {:?}", base_url);
        }

        if args.timeout_secs == 0 {
            bail!("timeout must be at least one second");
        }

        let locale = args
            .locale
            .as_deref()
            .or(system_locale)
            .and_then(parse_locale)
            .unwrap_or(DEFAULT_LOCALE);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            locale,
            log_dir: args.log_dir.unwrap_or_else(default_log_dir),
        })
    }
}

/// Parse un nom de locale POSIX (`fr_FR.UTF-8`, `de_DE@euro`)
pub fn parse_locale(name: &str) -> Option<Locale> {
    let name = name.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Locale::try_from(name).ok()
}

/// `<data_local_dir>/stockgrid/logs`, ou `./logs` si inconnu
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("stockgrid").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
