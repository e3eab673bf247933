use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for the refinement engine.
///
/// `max_iter` bounds the number of *corrections*; the residual is
/// evaluated once more than that, so a solve produces at most
/// `max_iter + 1` trace entries.  `max_iter = 0` performs the initial
/// solve and a single residual evaluation only.
#[derive(Builder, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefinementSettings {
    /// maximum number of correction iterations
    #[builder(default = "20")]
    pub max_iter: u32,
}

impl Default for RefinementSettings {
    fn default() -> RefinementSettings {
        RefinementSettingsBuilder::default().build().unwrap()
    }
}
