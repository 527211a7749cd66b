// params.rs — 环境参数、全景模式与参数标识

use crate::error::{EnvironmentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the panorama image is laid over the three panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PanoramaMode {
    /// Each panel shows an exact horizontal third of the image.
    #[default]
    Thirds,
    /// The image wraps 360° around the viewer, anchored to the world axes.
    Full360,
}

impl PanoramaMode {
    pub fn name(self) -> &'static str {
        match self {
            PanoramaMode::Thirds => "Thirds",
            PanoramaMode::Full360 => "360",
        }
    }
}

impl fmt::Display for PanoramaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PanoramaMode {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Thirds" => Ok(PanoramaMode::Thirds),
            "360" => Ok(PanoramaMode::Full360),
            other => Err(EnvironmentError::UnsupportedPanoramaMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for PanoramaMode {
    type Error = EnvironmentError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PanoramaMode> for String {
    fn from(mode: PanoramaMode) -> Self {
        mode.name().to_string()
    }
}

/// The three textured meshes of the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Panorama,
    Sky,
    Ground,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Panorama, TextureSlot::Sky, TextureSlot::Ground];
}

/// Identity of a changed parameter, as delivered by the parameter store's change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Radius,
    Length,
    Height,
    SkyOverlap,
    Rotation,
    ZOffset,
    PanoramaMode,
    Texture(TextureSlot),
}

impl Parameter {
    pub const ALL: [Parameter; 10] = [
        Parameter::Radius,
        Parameter::Length,
        Parameter::Height,
        Parameter::SkyOverlap,
        Parameter::Rotation,
        Parameter::ZOffset,
        Parameter::PanoramaMode,
        Parameter::Texture(TextureSlot::Panorama),
        Parameter::Texture(TextureSlot::Sky),
        Parameter::Texture(TextureSlot::Ground),
    ];

    /// Property name used by the parameter store.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Radius => "Radius",
            Parameter::Length => "Length",
            Parameter::Height => "Height",
            Parameter::SkyOverlap => "SkyOverlap",
            Parameter::Rotation => "Rotation",
            Parameter::ZOffset => "ZOffset",
            Parameter::PanoramaMode => "PanoramaType",
            Parameter::Texture(TextureSlot::Panorama) => "PanoramaImage",
            Parameter::Texture(TextureSlot::Sky) => "SkyImage",
            Parameter::Texture(TextureSlot::Ground) => "GroundImage",
        }
    }

    /// Lenient lookup: names outside the table map to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Parameter::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl FromStr for Parameter {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self> {
        Parameter::from_name(s).ok_or_else(|| EnvironmentError::UnknownParameter(s.to_string()))
    }
}

/// Read accessors of the external parameter store.
pub trait ParameterStore {
    fn radius(&self) -> f64;
    fn length(&self) -> f64;
    fn height(&self) -> f64;
    fn sky_overlap(&self) -> f64;
    /// Degrees, any range.
    fn rotation(&self) -> f64;
    fn z_offset(&self) -> f64;
    fn panorama_mode(&self) -> PanoramaMode;
    /// `None` when the reference is unset or empty.
    fn texture(&self, slot: TextureSlot) -> Option<&Path>;
}

/// Plain parameter set, usable directly as a store and loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParameters {
    #[serde(rename = "Radius")]
    pub radius: f64,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "SkyOverlap")]
    pub sky_overlap: f64,
    #[serde(rename = "Rotation")]
    pub rotation: f64,
    #[serde(rename = "ZOffset")]
    pub z_offset: f64,
    #[serde(rename = "PanoramaType")]
    pub panorama_mode: PanoramaMode,
    #[serde(rename = "PanoramaImage")]
    pub panorama_image: Option<PathBuf>,
    #[serde(rename = "SkyImage")]
    pub sky_image: Option<PathBuf>,
    #[serde(rename = "GroundImage")]
    pub ground_image: Option<PathBuf>,
}

impl Default for EnvironmentParameters {
    fn default() -> Self {
        Self {
            radius: 50000.0,
            length: 150000.0,
            height: 50000.0,
            sky_overlap: 25000.0,
            rotation: 0.0,
            z_offset: -1.0,
            panorama_mode: PanoramaMode::Thirds,
            panorama_image: None,
            sky_image: None,
            ground_image: None,
        }
    }
}

impl EnvironmentParameters {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl ParameterStore for EnvironmentParameters {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn sky_overlap(&self) -> f64 {
        self.sky_overlap
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn z_offset(&self) -> f64 {
        self.z_offset
    }

    fn panorama_mode(&self) -> PanoramaMode {
        self.panorama_mode
    }

    fn texture(&self, slot: TextureSlot) -> Option<&Path> {
        let path = match slot {
            TextureSlot::Panorama => &self.panorama_image,
            TextureSlot::Sky => &self.sky_image,
            TextureSlot::Ground => &self.ground_image,
        };
        path.as_deref().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Check the scalar ranges the mesh builders rely on.
/// Angles and offsets only need to be finite.
pub fn validate<S: ParameterStore + ?Sized>(store: &S) -> Result<()> {
    fn check(name: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<()> {
        if !value.is_finite() {
            return Err(EnvironmentError::InvalidParameter {
                name,
                value,
                reason: "must be finite",
            });
        }
        if !ok {
            return Err(EnvironmentError::InvalidParameter { name, value, reason });
        }
        Ok(())
    }

    let radius = store.radius();
    let length = store.length();
    let height = store.height();
    let sky_overlap = store.sky_overlap();

    check("Radius", radius, radius > 0.0, "must be greater than zero")?;
    check("Length", length, length > 0.0, "must be greater than zero")?;
    check("Height", height, height >= 0.0, "must not be negative")?;
    check("SkyOverlap", sky_overlap, sky_overlap >= 0.0, "must not be negative")?;
    check("Rotation", store.rotation(), true, "")?;
    check("ZOffset", store.z_offset(), true, "")
}
