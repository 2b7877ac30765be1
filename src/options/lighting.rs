use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Lighting parameters for the Blinn-Phong scene shading.
pub struct LightingOptions {
    /// Key light intensity.
    pub light1_intensity: f32,
    /// Fill light intensity.
    pub light2_intensity: f32,
    /// Ambient light intensity.
    pub ambient: f32,
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light1_intensity: 1.0,
            light2_intensity: 0.5,
            ambient: 0.5,
            specular_intensity: 0.35,
            shininess: 38.0,
        }
    }
}
