//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Cap on the candidate set size.
    pub max_listings: usize,

    /// Bounded worker pool size for the evaluation fan-out.
    pub max_workers: usize,

    /// How many ranked entries to keep after the merge.
    pub shown_listings: usize,

    /// Weight of the description score in the composite.
    ///
    /// The image weight is always `1.0 - description_weight`.
    pub description_weight: f64,

    /// Wall-clock budget for one fan-out unit (render + summarize).
    ///
    /// The collaborators impose no timeout of their own; without this
    /// a single hung render would stall the whole run.
    #[serde(with = "duration_secs")]
    pub unit_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_listings: 10,
            max_workers: 4,
            shown_listings: 5,
            description_weight: 0.8,
            unit_timeout: Duration::from_secs(30),
        }
    }
}

impl SearchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate cap.
    pub fn with_max_listings(mut self, max_listings: usize) -> Self {
        self.max_listings = max_listings;
        self
    }

    /// Set the worker pool size.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Set the shortlist length.
    pub fn with_shown_listings(mut self, shown_listings: usize) -> Self {
        self.shown_listings = shown_listings;
        self
    }

    /// Set the description weight (clamped to [0, 1]).
    pub fn with_description_weight(mut self, weight: f64) -> Self {
        self.description_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Set the per-unit timeout.
    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.unit_timeout = timeout;
        self
    }

    /// Weight of the image score in the composite.
    pub fn image_weight(&self) -> f64 {
        1.0 - self.description_weight
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
