use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::composite::EdgeClamp;
use crate::foundation::error::{PulpError, PulpResult};

/// Construction-time options for [`Graphics`](super::Graphics).
///
/// `bilinear` and `edge_clamp` are the values `reset()` restores. Unknown JSON fields are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphicsOpts {
    /// Report and skip invalid image source rectangles instead of clamping them.
    pub checked_draws: bool,
    pub bilinear: bool,
    pub edge_clamp: EdgeClamp,
}

impl Default for GraphicsOpts {
    fn default() -> Self {
        Self {
            checked_draws: cfg!(debug_assertions),
            bilinear: true,
            edge_clamp: EdgeClamp::NONE,
        }
    }
}

impl GraphicsOpts {
    /// Parse options from a JSON reader. Missing fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> PulpResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PulpError::validation(format!("parse graphics options JSON: {e}")))
    }

    pub fn from_json(s: &str) -> PulpResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PulpResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open graphics options '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn with_checked_draws(mut self, checked: bool) -> Self {
        self.checked_draws = checked;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/opts.rs"]
mod tests;
