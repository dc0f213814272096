//! Output file naming for extracted frames.
//!
//! Frames are written to `{output_dir}/frame_{batch_id}_{index}.{format}`.
//! The batch identifier combines a second-granularity wall-clock stamp, which
//! keeps files sortable, with a random suffix so that batches started in the
//! same second never share a name.

use crate::error::{CoreError, CoreResult};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use std::fmt;
use std::path::{Path, PathBuf};

/// Length of the random part of a batch identifier
const BATCH_SUFFIX_LEN: usize = 8;

/// Longest accepted output format / extension
const MAX_FORMAT_LEN: usize = 10;

/// Identifier shared by all frames of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl BatchId {
    /// Generates a new identifier, e.g. `20241014_101500_a8Zk3Qp1`.
    pub fn generate() -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(BATCH_SUFFIX_LEN)
            .map(char::from)
            .collect();
        Self(format!("{stamp}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BatchId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Builds the output path for the `index`-th frame of a batch.
pub fn frame_output_path(output_dir: &Path, batch_id: &BatchId, index: usize, format: &str) -> PathBuf {
    output_dir.join(format!("frame_{batch_id}_{index}.{format}"))
}

/// Checks that an output format is safe to use as a file extension.
///
/// Only short ASCII alphanumeric names are accepted, so a format can never
/// introduce a path separator or a `..` component.
pub fn validate_output_format(format: &str) -> CoreResult<()> {
    if format.is_empty() {
        return Err(CoreError::InvalidRequest(
            "output_format must not be empty".to_string(),
        ));
    }
    if format.len() > MAX_FORMAT_LEN || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::InvalidRequest(format!(
            "output_format '{format}' must be 1-{MAX_FORMAT_LEN} ASCII letters or digits"
        )));
    }
    Ok(())
}
