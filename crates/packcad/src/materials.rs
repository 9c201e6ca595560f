//! Material table for the external renderer.
//!
//! The snapshot tags every mesh group with a material key; this table
//! resolves keys to display properties. Purely presentational — nothing
//! in geometry generation or export reads it.

use std::collections::HashMap;

/// Display properties for one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, linear RGB in `[0, 1]`.
    pub base_color: [f32; 3],
    /// Metallic factor.
    pub metallic: f32,
    /// Roughness factor.
    pub roughness: f32,
}

/// Named material database.
#[derive(Debug, Clone)]
pub struct Materials {
    map: HashMap<String, Material>,
}

impl Materials {
    /// The standard pack material set.
    pub fn standard() -> Self {
        let mut map = HashMap::new();
        map.insert(
            "default".to_string(),
            Material {
                base_color: [0.7, 0.7, 0.7],
                metallic: 0.0,
                roughness: 0.8,
            },
        );
        map.insert(
            "cell".to_string(),
            Material {
                base_color: [0.16, 0.5, 0.72],
                metallic: 0.1,
                roughness: 0.4,
            },
        );
        map.insert(
            "holder".to_string(),
            Material {
                base_color: [0.15, 0.15, 0.17],
                metallic: 0.0,
                roughness: 0.9,
            },
        );
        map.insert(
            "nickel".to_string(),
            Material {
                base_color: [0.8, 0.8, 0.78],
                metallic: 0.9,
                roughness: 0.3,
            },
        );
        map.insert(
            "terminal".to_string(),
            Material {
                base_color: [0.85, 0.25, 0.2],
                metallic: 0.6,
                roughness: 0.4,
            },
        );
        map.insert(
            "enclosure".to_string(),
            Material {
                base_color: [0.55, 0.58, 0.6],
                metallic: 0.0,
                roughness: 0.7,
            },
        );
        Self { map }
    }

    /// Resolve a material key, falling back to `"default"`.
    pub fn get(&self, key: &str) -> &Material {
        self.map.get(key).unwrap_or(&self.map["default"])
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::standard()
    }
}
