//! Scene variants: three design iterations of the same core, selectable
//! at startup (fixed ship, pointer parallax, full flight dynamics).

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("unknown scene variant '{0}' (expected fixed|parallax|flight)")]
    Unknown(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    /// Ship pinned at a static screen offset; pointer is ignored.
    Fixed,
    /// Pointer-driven camera parallax and ship shear, no flight dynamics.
    Parallax,
    /// Spring-damper flight with a volumetric, normal-lit hull.
    #[default]
    Flight,
}

/// Per-variant shader gains, uploaded as one uniform vector.
/// A zero gain disables the corresponding effect in the shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantGains {
    /// Camera-space parallax offset per unit of eased pointer.
    pub parallax: f32,
    /// Pointer hue/intensity modulation on the canyon walls.
    pub hue: f32,
    /// Pointer shear on the fixed-position ship (x += z * pointer.x * shear).
    pub shear: f32,
    /// Rock-noise texture amount.
    pub noise: f32,
}

impl SceneVariant {
    pub fn gains(self) -> VariantGains {
        match self {
            SceneVariant::Fixed => VariantGains {
                parallax: 0.0,
                hue: 0.0,
                shear: 0.0,
                noise: 0.0,
            },
            SceneVariant::Parallax => VariantGains {
                parallax: 0.4,
                hue: 1.0,
                shear: 0.3,
                noise: 1.0,
            },
            SceneVariant::Flight => VariantGains {
                parallax: 0.25,
                hue: 1.0,
                shear: 0.0,
                noise: 1.0,
            },
        }
    }

    /// Whether the eased pointer feeds the canyon shader.
    #[inline]
    pub fn has_parallax(self) -> bool {
        !matches!(self, SceneVariant::Fixed)
    }

    /// Whether the flight model runs each tick.
    #[inline]
    pub fn has_flight_dynamics(self) -> bool {
        matches!(self, SceneVariant::Flight)
    }
}

impl VariantGains {
    /// Layout matches the `gains` vec4 in the WGSL `Globals` block.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.parallax, self.hue, self.shear, self.noise]
    }
}

impl FromStr for SceneVariant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(SceneVariant::Fixed),
            "parallax" => Ok(SceneVariant::Parallax),
            "flight" => Ok(SceneVariant::Flight),
            other => Err(VariantError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_variants() {
        assert_eq!("fixed".parse::<SceneVariant>().unwrap(), SceneVariant::Fixed);
        assert_eq!(
            "PARALLAX".parse::<SceneVariant>().unwrap(),
            SceneVariant::Parallax
        );
        assert_eq!(
            "flight".parse::<SceneVariant>().unwrap(),
            SceneVariant::Flight
        );
        assert!("freeflight".parse::<SceneVariant>().is_err());
    }

    #[test]
    fn fixed_variant_disables_all_pointer_effects() {
        let g = SceneVariant::Fixed.gains();
        assert_eq!(g.to_array(), [0.0; 4]);
        assert!(!SceneVariant::Fixed.has_parallax());
        assert!(!SceneVariant::Fixed.has_flight_dynamics());
    }

    #[test]
    fn only_flight_runs_dynamics() {
        assert!(!SceneVariant::Parallax.has_flight_dynamics());
        assert!(SceneVariant::Flight.has_flight_dynamics());
        assert!(SceneVariant::Parallax.has_parallax());
    }
}
