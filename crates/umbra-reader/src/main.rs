//! Planet reader binary for Umbra.
//!
//! Resolves planets from a ledger dump as of a single second and prints one
//! JSON object per planet on stdout. Logs go to stderr.
//!
//! ```text
//! umbra-reader [--at <unix-seconds>] [<location-id>...]
//! ```
//!
//! Without ids, every planet in the dump is resolved. Without `--at`, the
//! host clock is read once at startup so that every planet is resolved as
//! of the same second.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `UMBRA_CONFIG` (default `umbra-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the ledger dump and, for a configured viewer, the chunk dump
//! 4. Fetch and validate world constants
//! 5. Resolve the requested planets concurrently
//! 6. Print the newest resolution of each planet

mod error;

use std::io::Write as _;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use umbra_core::{
    ChunkStore, Clock as _, FixedClock, LoggingConfig, MemoryLedger, PlanetReader, ReaderConfig,
    ResolvedCache, SystemClock, Viewer,
};
use umbra_types::LocationId;

use crate::error::ReaderError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "umbra-config.yaml";

/// Application entry point for the reader.
///
/// # Errors
///
/// Returns an error if configuration, a dump, or the world constants
/// cannot be loaded, or if output cannot be written. Planets that fail to
/// resolve are logged and skipped.
#[tokio::main]
async fn main() -> Result<(), ReaderError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("umbra-reader starting");

    let invocation = Invocation::parse(std::env::args().skip(1))?;

    // 3. Load collaborators.
    let ledger = MemoryLedger::load(&config.sources.ledger_dump)?;
    info!(
        path = %config.sources.ledger_dump.display(),
        planets = ledger.planet_count(),
        "Ledger dump loaded"
    );

    let viewer = match (config.viewer, &config.sources.chunk_dump) {
        (Some(address), Some(path)) => {
            let knowledge = ChunkStore::load(path)?;
            info!(%address, chunks = knowledge.len(), "Viewer chunks loaded");
            Some(Viewer { address, knowledge })
        }
        (Some(address), None) => {
            warn!(%address, "viewer configured without a chunk dump, planets resolve unlocated");
            Some(Viewer {
                address,
                knowledge: ChunkStore::new(),
            })
        }
        (None, _) => None,
    };

    let ids = if invocation.ids.is_empty() {
        ledger.planet_ids()
    } else {
        invocation.ids
    };

    // 4. Create the reader, pinning "now" for the whole run.
    let now = invocation.at.unwrap_or_else(|| SystemClock.now());
    let reader = PlanetReader::create(ledger, viewer, FixedClock::new(now)).await?;

    // 5. Resolve.
    let mut cache = ResolvedCache::new();
    let mut failed: usize = 0;
    for (id, result) in reader.load_planets(&ids).await {
        match result {
            Ok(resolved) => {
                cache.offer(resolved);
            }
            Err(error) => {
                warn!(planet = %id, %error, "could not resolve planet");
                failed = failed.saturating_add(1);
            }
        }
    }

    // 6. Print.
    let mut stdout = std::io::stdout().lock();
    for resolved in cache.iter() {
        serde_json::to_writer(&mut stdout, resolved)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;

    info!(now, resolved = cache.len(), failed, "umbra-reader done");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the reader configuration.
///
/// A missing file means defaults; environment overrides still apply.
fn load_config() -> Result<ReaderConfig, ReaderError> {
    let config_path = std::env::var("UMBRA_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        Ok(ReaderConfig::from_file(&config_path)?)
    } else {
        let mut config = ReaderConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Invocation {
    /// Resolve as of this second instead of the host clock.
    at: Option<u64>,
    /// Planets to resolve; empty means all.
    ids: Vec<LocationId>,
}

impl Invocation {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ReaderError> {
        let mut invocation = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--at" {
                let value = args.next().ok_or_else(|| ReaderError::Argument {
                    argument: arg.clone(),
                    message: "expected a unix timestamp".to_owned(),
                })?;
                let at = value.parse().map_err(|e| ReaderError::Argument {
                    argument: value.clone(),
                    message: format!("{e}"),
                })?;
                invocation.at = Some(at);
            } else {
                let id = arg.parse().map_err(|source| ReaderError::PlanetId {
                    argument: arg.clone(),
                    source,
                })?;
                invocation.ids.push(id);
            }
        }
        Ok(invocation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn no_arguments_means_all_planets_now() {
        assert_eq!(Invocation::parse(args(&[])).unwrap(), Invocation::default());
    }

    #[test]
    fn ids_and_pinned_time() {
        let id = "ab".repeat(32);
        let invocation = Invocation::parse(args(&["--at", "1700000000", &id])).unwrap();
        assert_eq!(invocation.at, Some(1_700_000_000));
        assert_eq!(invocation.ids, vec![LocationId::from_bytes([0xab; 32])]);
    }

    #[test]
    fn prefixed_ids_are_accepted() {
        let id = format!("0x{}", "01".repeat(32));
        let invocation = Invocation::parse(args(&[&id])).unwrap();
        assert_eq!(invocation.ids, vec![LocationId::from_bytes([1; 32])]);
    }

    #[test]
    fn missing_timestamp_is_rejected() {
        assert!(matches!(
            Invocation::parse(args(&["--at"])),
            Err(ReaderError::Argument { .. })
        ));
    }

    #[test]
    fn malformed_id_is_rejected() {
        assert!(matches!(
            Invocation::parse(args(&["zz"])),
            Err(ReaderError::PlanetId { .. })
        ));
    }
}
