//! Cache-use simulation
//!
//! Fills the on-disk cache location a handler would use, so later
//! invocations see a cache directory already under pressure. The write is
//! durable and outlives the call; the file system I/O is synchronous, so
//! its elapsed time counts against total harness latency.

use rand::Rng;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::config::CacheUseConfig;
use crate::error::Result;
use crate::payload::{self, MEGABYTE};

/// Fixed name of the cache file inside the configured directory.
///
/// Concurrent harness runs targeting the same directory race on this file.
pub const CACHE_FILE_NAME: &str = "tempfile";

/// Write `size_mb` megabytes of filler to the cache file, truncating any
/// previous run's file first.
pub fn simulate_cache_use<R: Rng>(config: &CacheUseConfig, rng: &mut R) -> Result<()> {
    let path = config.dir.join(CACHE_FILE_NAME);

    info!(
        size_mb = config.size_mb,
        path = %path.display(),
        "filling disk cache"
    );

    if path.exists() {
        fs::remove_file(&path)?;
    }

    // Filler content is immaterial, so one megabyte is generated once and
    // appended repeatedly.
    let filler = payload::filler(MEGABYTE, rng);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    for _ in 0..config.size_mb {
        file.write_all(&filler)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(size_mb: u64, dir: &std::path::Path) -> CacheUseConfig {
        CacheUseConfig {
            size_mb,
            dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn writes_exactly_size_megabytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        simulate_cache_use(&config(2, dir.path()), &mut rng).unwrap();

        let written = fs::metadata(dir.path().join(CACHE_FILE_NAME)).unwrap().len();
        assert_eq!(written, 2_000_000);
    }

    #[test]
    fn previous_file_is_replaced_not_appended_to() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        simulate_cache_use(&config(3, dir.path()), &mut rng).unwrap();
        simulate_cache_use(&config(1, dir.path()), &mut rng).unwrap();

        let written = fs::metadata(dir.path().join(CACHE_FILE_NAME)).unwrap().len();
        assert_eq!(written, 1_000_000);
    }

    #[test]
    fn zero_size_creates_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        simulate_cache_use(&config(0, dir.path()), &mut rng).unwrap();

        let written = fs::metadata(dir.path().join(CACHE_FILE_NAME)).unwrap().len();
        assert_eq!(written, 0);
    }

    #[test]
    fn missing_directory_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        let err = simulate_cache_use(&config(1, &missing), &mut rng).unwrap_err();
        assert!(matches!(err, crate::error::HarnessError::Io(_)));
    }
}
