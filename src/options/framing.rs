use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::framing::solver::SolverSettings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Framing", inline)]
#[serde(default)]
/// Auto-framing move parameters.
pub struct FramingOptions {
    /// Length of the camera move in seconds.
    #[schemars(title = "Move Duration", range(min = 1.0, max = 10.0), extend("step" = 0.5))]
    pub duration_secs: f32,
    /// Easing curve applied to the move.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Extra retreat for orthographic cameras, in world units.
    #[schemars(title = "Orthographic Margin", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub orthographic_margin: f32,
    /// Center the camera on the targets before retreating.
    #[schemars(title = "Center On Targets")]
    pub center_on_targets: bool,
    /// Scene tag that marks framing targets.
    #[schemars(skip)]
    pub target_tag: String,
}

impl FramingOptions {
    /// Solver tuning derived from these options.
    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            center_on_targets: self.center_on_targets,
            orthographic_margin: self.orthographic_margin,
        }
    }
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            duration_secs: 4.0,
            easing: EasingFunction::Linear,
            orthographic_margin: 1.0,
            center_on_targets: true,
            target_tag: String::from("focusMesh"),
        }
    }
}
