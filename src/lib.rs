// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

mod config;
mod dial;
mod error;
mod scene;

use std::path::Path;

use log::{debug, info};

pub use config::{FaceConfig, FaceStyle, Feature, GaugeConfig, TickLengths, TickStyle, INK};
pub use dial::{linear_tier, log_deflection, log_tier, Dial, ScaleKind, TickTier};
pub use error::{DialError, Result};
pub use scene::{BoundingBox, Color, DocumentSize, DrawCommand, Point, Scene, Stroke};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// A multi-gauge meter face - the primary public interface
#[derive(Debug, Clone)]
pub struct MeterFace {
    config: FaceConfig,
    dial: Dial,
}

impl MeterFace {
    pub fn new(config: FaceConfig) -> Result<Self> {
        let dial = config.dial()?;
        Ok(Self { config, dial })
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    /// Build the whole face: crosshair first, then every gauge's features in
    /// configured order.
    ///
    /// Nothing is published unless every feature generates cleanly, so an invalid
    /// parameter anywhere never yields a partial scene.
    pub fn compose(&self) -> Result<Scene> {
        let mut staged = Vec::new();

        if self.config.crosshair > 0.0 {
            staged.extend(self.dial.draw_crosshair(self.config.crosshair)?);
        }

        for gauge in &self.config.gauges {
            let before = staged.len();
            for feature in &gauge.features {
                staged.extend(self.draw_feature(gauge.radius, feature)?);
            }
            debug!(
                "gauge `{}` at r={}: {} commands",
                gauge.name,
                gauge.radius,
                staged.len() - before
            );
        }

        let mut scene = Scene::new();
        scene.extend(staged);
        info!(
            "composed {} gauges into {} commands",
            self.config.gauges.len(),
            scene.len()
        );
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.compose()?.save(path, self.config.document_size())
    }

    fn draw_feature(&self, radius: f64, feature: &Feature) -> Result<Vec<DrawCommand>> {
        let dial = &self.dial;
        match feature {
            Feature::Arc {
                radius_offset,
                point_count,
            } => Ok(vec![dial.draw_full_arc(radius + radius_offset, *point_count)?]),
            Feature::PartialArcs {
                radius_offset,
                point_count,
                total_segments,
                indices,
            } => indices
                .iter()
                .map(|&n| {
                    dial.draw_partial_arc(radius + radius_offset, *point_count, n, *total_segments)
                })
                .collect(),
            Feature::LinearTicks {
                radius_offset,
                point_count,
                lengths,
                interval_major,
                interval_medium,
            } => dial.draw_linear_ticks(
                radius + radius_offset,
                *point_count,
                lengths.large,
                lengths.medium,
                lengths.small,
                *interval_major,
                *interval_medium,
            ),
            Feature::LogTicks {
                radius_offset,
                decade_count,
                lengths,
            } => dial.draw_log_ticks(
                radius + radius_offset,
                *decade_count,
                lengths.large,
                lengths.medium,
                lengths.small,
            ),
            Feature::Labels {
                radius_offset,
                count,
                texts,
            } => dial.draw_labels(radius + radius_offset, *count, texts),
            Feature::Sectors {
                radius_offset,
                point_count,
                thickness,
                total_segments,
                indices,
            } => indices
                .iter()
                .map(|&n| {
                    dial.draw_sector(
                        radius + radius_offset,
                        *point_count,
                        *thickness,
                        n,
                        *total_segments,
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(scene: &Scene, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        scene.commands().iter().filter(|c| predicate(c)).count()
    }

    #[test]
    fn test_reference_face_counts() {
        // given
        let face = MeterFace::new(FaceConfig::default()).unwrap();

        // when
        let scene = face.compose().unwrap();

        // then
        let ticks = count(&scene, |c| matches!(c, DrawCommand::Tick { .. }));
        let labels = count(&scene, |c| matches!(c, DrawCommand::Label { .. }));
        let arcs = count(&scene, |c| matches!(c, DrawCommand::Polyline { .. }));
        let sectors = count(&scene, |c| matches!(c, DrawCommand::Polygon { .. }));
        assert_eq!(ticks, 31 + 50 + 30);
        assert_eq!(labels, 16 + 8 + 6 + 4);
        assert_eq!(arcs, 3);
        assert_eq!(sectors, 6 + 7 + 2 + 1 + 1);
    }

    #[test]
    fn test_crosshair_is_painted_first() {
        let scene = MeterFace::new(FaceConfig::default())
            .unwrap()
            .compose()
            .unwrap();

        assert!(matches!(scene.commands()[0], DrawCommand::Line { .. }));
        assert!(matches!(scene.commands()[1], DrawCommand::Line { .. }));
        assert!(matches!(scene.commands()[2], DrawCommand::Polyline { .. }));
    }

    #[test]
    fn test_feature_order_is_paint_order() {
        // given
        let config = FaceConfig::builder()
            .crosshair(0.0)
            .gauges(vec![GaugeConfig::builder()
                .name("order")
                .radius(100.0)
                .features(vec![
                    Feature::Labels {
                        radius_offset: 12.0,
                        count: 2,
                        texts: vec![],
                    },
                    Feature::Arc {
                        radius_offset: 0.0,
                        point_count: 5,
                    },
                    Feature::PartialArcs {
                        radius_offset: 5.0,
                        point_count: 4,
                        total_segments: 3.0,
                        indices: vec![0, 2],
                    },
                ])
                .build()])
            .build();

        // when
        let scene = MeterFace::new(config).unwrap().compose().unwrap();

        // then
        let kinds = scene
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Label { .. } => "label",
                DrawCommand::Polyline { .. } => "polyline",
                _ => "other",
            })
            .collect::<Vec<_>>();
        assert_eq!(kinds, ["label", "label", "polyline", "polyline", "polyline"]);
    }

    #[test]
    fn test_invalid_feature_yields_no_scene() {
        // given
        let config = FaceConfig::builder()
            .gauges(vec![GaugeConfig::builder()
                .name("broken")
                .radius(100.0)
                .features(vec![
                    Feature::Arc {
                        radius_offset: 0.0,
                        point_count: 11,
                    },
                    Feature::Sectors {
                        radius_offset: 0.0,
                        point_count: 10,
                        thickness: 6.0,
                        total_segments: 0.0,
                        indices: vec![0],
                    },
                ])
                .build()])
            .build();

        // when
        let result = MeterFace::new(config).unwrap().compose();

        // then
        assert!(result.unwrap_err().is_invalid_geometry());
    }

    #[test]
    fn test_rejects_zero_span() {
        let config = FaceConfig::builder().span_degrees(0.0).build();
        assert!(MeterFace::new(config).is_err());
    }

    #[test]
    fn test_compose_twice_is_identical() {
        let face = MeterFace::new(FaceConfig::default()).unwrap();
        assert_eq!(face.compose().unwrap().commands(), face.compose().unwrap().commands());
    }
}
