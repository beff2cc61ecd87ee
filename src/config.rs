use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::dial::{Dial, ScaleKind, TickTier};
use crate::error::{check_length, Result};
use crate::scene::{Color, DocumentSize};

/// Dark grey used for arcs, ticks and cut-out markings (10%, 10%, 16%).
pub const INK: Color = Color::new(26, 26, 41);

/// Stroke widths for each tick tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyle {
    pub color: Color,
    pub large_width: f64,
    pub medium_width: f64,
    /// Medium ticks on a logarithmic scale sit between dense minor ticks, so
    /// they get their own width.
    pub log_medium_width: f64,
    pub small_width: f64,
}

impl TickStyle {
    pub fn width(&self, tier: TickTier, scale: ScaleKind) -> f64 {
        match (tier, scale) {
            (TickTier::Large, _) => self.large_width,
            (TickTier::Medium, ScaleKind::Linear) => self.medium_width,
            (TickTier::Medium, ScaleKind::Logarithmic) => self.log_medium_width,
            (TickTier::Small, _) => self.small_width,
        }
    }
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            color: INK,
            large_width: 2.0,
            medium_width: 1.5,
            log_medium_width: 1.0,
            small_width: 1.0,
        }
    }
}

/// Colors and stroke widths shared by every gauge on the face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceStyle {
    pub arc_color: Color,
    pub arc_width: f64,
    pub ticks: TickStyle,
    /// Crosshair and other cut-out markings.
    pub docu_color: Color,
    pub docu_width: f64,
    pub label_color: Color,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            arc_color: INK,
            arc_width: 1.5,
            ticks: TickStyle::default(),
            docu_color: INK,
            docu_width: 0.5,
            label_color: Color::new(0xff, 0x00, 0x00),
        }
    }
}

/// Protrusion of each tick tier beyond the tick base radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickLengths {
    pub large: f64,
    pub medium: f64,
    pub small: f64,
}

impl TickLengths {
    pub fn new(large: f64, medium: f64, small: f64) -> Result<Self> {
        check_length("len_major", large)?;
        check_length("len_medium", medium)?;
        check_length("len_minor", small)?;
        Ok(Self {
            large,
            medium,
            small,
        })
    }

    pub fn length(&self, tier: TickTier) -> f64 {
        match tier {
            TickTier::Large => self.large,
            TickTier::Medium => self.medium,
            TickTier::Small => self.small,
        }
    }
}

/// One drawing step of a gauge. Radii are offsets from the gauge radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Feature {
    Arc {
        #[serde(default)]
        radius_offset: f64,
        point_count: usize,
    },
    /// Arc pieces over the listed slices, handy for adornment.
    PartialArcs {
        #[serde(default)]
        radius_offset: f64,
        point_count: usize,
        total_segments: f64,
        indices: Vec<usize>,
    },
    LinearTicks {
        #[serde(default)]
        radius_offset: f64,
        point_count: usize,
        lengths: TickLengths,
        interval_major: usize,
        interval_medium: usize,
    },
    LogTicks {
        #[serde(default)]
        radius_offset: f64,
        decade_count: usize,
        lengths: TickLengths,
    },
    Labels {
        #[serde(default)]
        radius_offset: f64,
        count: usize,
        #[serde(default)]
        texts: Vec<String>,
    },
    /// Bands over the listed slices; `total_segments` may be fractional.
    Sectors {
        #[serde(default)]
        radius_offset: f64,
        point_count: usize,
        thickness: f64,
        total_segments: f64,
        indices: Vec<usize>,
    },
}

/// A single gauge: one radius band on the shared span
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct GaugeConfig {
    #[builder(into)]
    pub name: String,
    pub radius: f64,
    #[builder(default)]
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Main configuration struct containing the whole face.
///
/// `FaceConfig::default()` is the reference four-gauge face; the builder starts
/// from an empty face with the same span and styling.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Total mechanical sweep of the needle.
    #[builder(default = 80.0)]
    pub span_degrees: f64,
    /// Sizing factor between drawing units and the printed face.
    #[builder(default = 5.64)]
    pub units_per_mm: f64,
    #[builder(default = 10.0)]
    pub margin: f64,
    /// Half-length of the pivot crosshair, 0 leaves it out.
    #[builder(default = 1.0)]
    pub crosshair: f64,
    #[builder(default = "x".to_string())]
    pub label_placeholder: String,
    #[builder(default)]
    pub style: FaceStyle,
    /// A file without `[[gauges]]` describes an empty face.
    #[builder(default)]
    #[serde(default)]
    pub gauges: Vec<GaugeConfig>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::builder().gauges(reference_gauges()).build()
    }
}

impl FaceConfig {
    /// Omitted settings take the reference face's values, except `gauges`,
    /// which defaults to none.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn dial(&self) -> Result<Dial> {
        Ok(Dial::from_degrees(self.span_degrees)?
            .with_style(self.style.clone())
            .with_placeholder(self.label_placeholder.clone()))
    }

    pub fn document_size(&self) -> DocumentSize {
        DocumentSize {
            units_per_mm: self.units_per_mm,
            margin: self.margin,
        }
    }
}

fn texts<T: ToString>(values: impl IntoIterator<Item = T>) -> Vec<String> {
    values.into_iter().map(|v| v.to_string()).collect()
}

fn reference_gauges() -> Vec<GaugeConfig> {
    let log_lengths = TickLengths {
        large: 10.0,
        medium: 4.0,
        small: 4.0,
    };

    vec![
        // 15-30 degC, a tick per half degree, large every 5 degC, medium every 1 degC.
        // 265 units is roughly 47mm.
        GaugeConfig::builder()
            .name("temperature")
            .radius(265.0)
            .features(vec![
                Feature::Arc {
                    radius_offset: 0.0,
                    point_count: 31,
                },
                Feature::LinearTicks {
                    radius_offset: 0.0,
                    point_count: 31,
                    lengths: TickLengths {
                        large: 10.0,
                        medium: 5.0,
                        small: 4.0,
                    },
                    interval_major: 10,
                    interval_medium: 2,
                },
                Feature::Labels {
                    radius_offset: 12.0,
                    count: 16,
                    texts: texts(15..=30),
                },
                // comfortable band, 18-24 degC
                Feature::Sectors {
                    radius_offset: 0.0,
                    point_count: 10,
                    thickness: 6.0,
                    total_segments: 15.0,
                    indices: (3..9).collect(),
                },
            ])
            .build(),
        // 20-90 %RH in seven sectors, half-sectors mark the comfortable range.
        GaugeConfig::builder()
            .name("humidity")
            .radius(225.0)
            .features(vec![
                Feature::Sectors {
                    radius_offset: 0.0,
                    point_count: 10,
                    thickness: 6.0,
                    total_segments: 7.0,
                    indices: (0..7).collect(),
                },
                Feature::Labels {
                    radius_offset: 12.0,
                    count: 8,
                    texts: texts((20..=90).step_by(10)),
                },
                Feature::Sectors {
                    radius_offset: 0.0,
                    point_count: 10,
                    thickness: 6.0,
                    total_segments: 14.0,
                    indices: vec![5, 8],
                },
            ])
            .build(),
        // VOC over five decades from 1 ppb; the sector covers up to ~27 ppb.
        GaugeConfig::builder()
            .name("voc")
            .radius(185.0)
            .features(vec![
                Feature::Arc {
                    radius_offset: 0.0,
                    point_count: 51,
                },
                Feature::LogTicks {
                    radius_offset: 0.0,
                    decade_count: 5,
                    lengths: log_lengths,
                },
                Feature::Labels {
                    radius_offset: 12.0,
                    count: 6,
                    texts: texts(["1", "10", "100", "1k", "10k", "100k"]),
                },
                Feature::Sectors {
                    radius_offset: 0.0,
                    point_count: 10,
                    thickness: 6.0,
                    total_segments: 3.5,
                    indices: vec![0],
                },
            ])
            .build(),
        // CO2 over three decades from 100 ppm; the sector covers ~300-1000 ppm.
        GaugeConfig::builder()
            .name("co2")
            .radius(145.0)
            .features(vec![
                Feature::Arc {
                    radius_offset: 0.0,
                    point_count: 61,
                },
                Feature::LogTicks {
                    radius_offset: 0.0,
                    decade_count: 3,
                    lengths: log_lengths,
                },
                Feature::Labels {
                    radius_offset: 12.0,
                    count: 4,
                    texts: texts(["100", "1k", "10k", "100k"]),
                },
                Feature::Sectors {
                    radius_offset: 0.0,
                    point_count: 10,
                    thickness: 6.0,
                    total_segments: 6.0,
                    indices: vec![1],
                },
            ])
            .build(),
    ]
}
