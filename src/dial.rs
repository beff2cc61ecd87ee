// ============================================================================
// DIAL GEOMETRY
// ============================================================================
//
// Every position on the face goes through `Dial::transform`. The generators
// below never compute trigonometry themselves.

use log::debug;

use crate::config::{FaceStyle, TickLengths};
use crate::error::{
    check_length, check_nonzero, check_point_count, check_radius, check_segments, DialError,
    Result,
};
use crate::scene::{DrawCommand, Point, Stroke};

/// Visual weight class of a graduation mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickTier {
    Large,
    Medium,
    Small,
}

/// Graduation kind of a tick set, used to pick tier widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Logarithmic,
}

/// Tier of linear tick `index`. The major interval is checked first, so an index
/// matching both intervals is `Large`.
pub fn linear_tier(index: usize, interval_major: usize, interval_medium: usize) -> TickTier {
    if index % interval_major == 0 {
        TickTier::Large
    } else if index % interval_medium == 0 {
        TickTier::Medium
    } else {
        TickTier::Small
    }
}

/// Tier of logarithmic tick `index` out of `tick_count`.
///
/// Decade starts and the closing tick of the last decade are `Large`, the
/// remaining indices divisible by 5 are `Medium`.
pub fn log_tier(index: usize, tick_count: usize) -> TickTier {
    if index % 10 == 0 || index + 1 == tick_count {
        TickTier::Large
    } else if index % 5 == 0 {
        TickTier::Medium
    } else {
        TickTier::Small
    }
}

/// Step within the decade, 1..=10.
fn log_step(index: usize) -> usize {
    index % 10 + 1
}

/// Deflection of logarithmic tick `index` on a scale of `decade_count` decades.
pub fn log_deflection(index: usize, decade_count: usize) -> f64 {
    let decades = decade_count as f64;
    let decade = (index / 10) as f64;
    decade / decades + (log_step(index) as f64).log10() / decades
}

/// Deflection of sample `i` of `point_count` inside slice `n` of `t`.
fn slice_deflection(segment_index: usize, total_segments: f64, i: usize, point_count: usize) -> f64 {
    segment_index as f64 / total_segments
        + i as f64 / (total_segments * (point_count as f64 - 1.0))
}

/// The shared angular layout of a meter face: one pivot, one mechanical span.
#[derive(Debug, Clone)]
pub struct Dial {
    span: f64,
    style: FaceStyle,
    placeholder: String,
}

impl Dial {
    /// `span` is the total needle sweep, in radians.
    pub fn new(span: f64) -> Result<Self> {
        if !span.is_finite() || span <= 0.0 {
            return Err(DialError::invalid("span", span, "must be positive and finite"));
        }
        Ok(Self {
            span,
            style: FaceStyle::default(),
            placeholder: "x".to_string(),
        })
    }

    pub fn from_degrees(degrees: f64) -> Result<Self> {
        Self::new(degrees.to_radians())
    }

    pub fn with_style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Text used for labels that have no caller-supplied string.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Needle angle from the vertical for `deflection`, in radians.
    pub fn angle(&self, deflection: f64) -> f64 {
        deflection * self.span - self.span / 2.0
    }

    /// Polar to cartesian. Deflection 0.5 is straight up from the pivot; values
    /// outside [0, 1] extrapolate.
    pub fn transform(&self, radius: f64, deflection: f64) -> Point {
        let (sin, cos) = self.angle(deflection).sin_cos();
        Point::new(sin * radius, -cos * radius)
    }

    fn arc_stroke(&self) -> Stroke {
        Stroke::new(self.style.arc_color, self.style.arc_width)
    }

    /// Pivot crosshair, drawn with the documentation stroke.
    pub fn draw_crosshair(&self, half_length: f64) -> Result<Vec<DrawCommand>> {
        check_radius("half_length", half_length)?;
        let stroke = Stroke::new(self.style.docu_color, self.style.docu_width).square();
        Ok(vec![
            DrawCommand::Line {
                from: Point::new(-half_length, 0.0),
                to: Point::new(half_length, 0.0),
                stroke,
            },
            DrawCommand::Line {
                from: Point::new(0.0, -half_length),
                to: Point::new(0.0, half_length),
                stroke,
            },
        ])
    }

    /// Open polyline from deflection 0 to 1 inclusive.
    pub fn draw_full_arc(&self, radius: f64, point_count: usize) -> Result<DrawCommand> {
        check_radius("radius", radius)?;
        check_point_count("point_count", point_count)?;

        let points = (0..point_count)
            .map(|i| self.transform(radius, i as f64 / (point_count as f64 - 1.0)))
            .collect();
        debug!("full arc r={radius} p={point_count}");
        Ok(DrawCommand::Polyline {
            points,
            stroke: self.arc_stroke(),
        })
    }

    /// Open polyline over slice `segment_index` of `total_segments` equal slices.
    pub fn draw_partial_arc(
        &self,
        radius: f64,
        point_count: usize,
        segment_index: usize,
        total_segments: f64,
    ) -> Result<DrawCommand> {
        check_radius("radius", radius)?;
        check_point_count("point_count", point_count)?;
        check_segments(total_segments)?;

        let points = (0..point_count)
            .map(|i| {
                let d = slice_deflection(segment_index, total_segments, i, point_count);
                self.transform(radius, d)
            })
            .collect();
        debug!("partial arc r={radius} slice {segment_index}/{total_segments}");
        Ok(DrawCommand::Polyline {
            points,
            stroke: self.arc_stroke(),
        })
    }

    /// Closed band between `inner_radius` and `inner_radius + thickness` over
    /// slice `segment_index` of `total_segments`.
    ///
    /// The loop runs inner arc forward, out at the far edge, outer arc backward,
    /// then back in to the inner start, giving `2 * point_count + 2` vertices.
    /// The closing vertex is the inner start point itself, so the first and last
    /// vertices coincide. `total_segments` may be fractional; it is never rounded.
    pub fn draw_sector(
        &self,
        inner_radius: f64,
        point_count: usize,
        thickness: f64,
        segment_index: usize,
        total_segments: f64,
    ) -> Result<DrawCommand> {
        check_radius("inner_radius", inner_radius)?;
        check_point_count("point_count", point_count)?;
        check_length("thickness", thickness)?;
        check_segments(total_segments)?;

        let outer_radius = inner_radius + thickness;
        let d = |i| slice_deflection(segment_index, total_segments, i, point_count);
        let last = point_count - 1;

        let mut points = Vec::with_capacity(2 * point_count + 2);
        points.extend((0..point_count).map(|i| self.transform(inner_radius, d(i))));
        points.push(self.transform(outer_radius, d(last)));
        points.extend((0..point_count).map(|i| self.transform(outer_radius, d(last - i))));
        points.push(self.transform(inner_radius, segment_index as f64 / total_segments));

        debug!("sector r={inner_radius}+{thickness} slice {segment_index}/{total_segments}");
        Ok(DrawCommand::Polygon {
            points,
            stroke: self.arc_stroke(),
        })
    }

    fn tick(
        &self,
        radius: f64,
        deflection: f64,
        tier: TickTier,
        lengths: &TickLengths,
        scale: ScaleKind,
    ) -> DrawCommand {
        DrawCommand::Tick {
            base: self.transform(radius, deflection),
            tip: self.transform(radius + lengths.length(tier), deflection),
            tier,
            stroke: Stroke::new(self.style.ticks.color, self.style.ticks.width(tier, scale)),
        }
    }

    /// Uniformly spaced ticks with three tiers chosen by index intervals.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_linear_ticks(
        &self,
        radius: f64,
        point_count: usize,
        len_major: f64,
        len_medium: f64,
        len_minor: f64,
        interval_major: usize,
        interval_medium: usize,
    ) -> Result<Vec<DrawCommand>> {
        check_radius("radius", radius)?;
        check_point_count("point_count", point_count)?;
        check_nonzero("interval_major", interval_major)?;
        check_nonzero("interval_medium", interval_medium)?;
        let lengths = TickLengths::new(len_major, len_medium, len_minor)?;

        let ticks = (0..point_count)
            .map(|i| {
                let deflection = i as f64 / (point_count as f64 - 1.0);
                let tier = linear_tier(i, interval_major, interval_medium);
                self.tick(radius, deflection, tier, &lengths, ScaleKind::Linear)
            })
            .collect::<Vec<_>>();
        debug!("{} linear ticks at r={radius}", ticks.len());
        Ok(ticks)
    }

    /// Ten ticks per decade, spaced logarithmically within each decade.
    pub fn draw_log_ticks(
        &self,
        radius: f64,
        decade_count: usize,
        len_major: f64,
        len_medium: f64,
        len_minor: f64,
    ) -> Result<Vec<DrawCommand>> {
        check_radius("radius", radius)?;
        check_nonzero("decade_count", decade_count)?;
        let lengths = TickLengths::new(len_major, len_medium, len_minor)?;

        let tick_count = 10 * decade_count;
        let ticks = (0..tick_count)
            .map(|i| {
                let deflection = log_deflection(i, decade_count);
                let tier = log_tier(i, tick_count);
                self.tick(radius, deflection, tier, &lengths, ScaleKind::Logarithmic)
            })
            .collect::<Vec<_>>();
        debug!("{decade_count} decades of log ticks at r={radius}");
        Ok(ticks)
    }

    /// Evenly spaced, radially rotated labels. Missing texts fall back to the
    /// placeholder.
    pub fn draw_labels(
        &self,
        radius: f64,
        label_count: usize,
        texts: &[String],
    ) -> Result<Vec<DrawCommand>> {
        check_radius("radius", radius)?;
        check_point_count("label_count", label_count)?;

        let labels = (0..label_count)
            .map(|i| {
                let deflection = i as f64 / (label_count as f64 - 1.0);
                DrawCommand::Label {
                    anchor: self.transform(radius, deflection),
                    rotation_degrees: self.angle(deflection).to_degrees(),
                    text: texts.get(i).unwrap_or(&self.placeholder).clone(),
                    fill: self.style.label_color,
                }
            })
            .collect();
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use rand::Rng;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn dial() -> Dial {
        Dial::from_degrees(80.0).unwrap()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < EPSILON, "{a:?} != {b:?}");
    }

    fn tiers(commands: &[DrawCommand]) -> Vec<TickTier> {
        commands
            .iter()
            .map(|c| match c {
                DrawCommand::Tick { tier, .. } => *tier,
                other => panic!("expected tick, got {other:?}"),
            })
            .collect()
    }

    fn vertices(command: DrawCommand) -> Vec<Point> {
        match command {
            DrawCommand::Polyline { points, .. } | DrawCommand::Polygon { points, .. } => points,
            other => panic!("expected a point list, got {other:?}"),
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-PI)]
    #[case(f64::NAN)]
    fn test_rejects_bad_span(#[case] span: f64) {
        assert!(Dial::new(span).unwrap_err().is_invalid_geometry());
    }

    #[test]
    fn test_midpoint_is_vertical() {
        let dial = dial();
        let mut rng = rand::rng();
        for _ in 0..100 {
            let radius = rng.random_range(0.1..1000.0);
            let p = dial.transform(radius, 0.5);
            assert!(p.x.abs() < EPSILON);
            assert!((p.y + radius).abs() < EPSILON);
        }
    }

    #[test]
    fn test_extremes_are_symmetric() {
        let dial = dial();
        let mut rng = rand::rng();
        for _ in 0..100 {
            let radius = rng.random_range(0.1..1000.0);
            let left = dial.transform(radius, 0.0);
            let right = dial.transform(radius, 1.0);
            assert!(left.x < 0.0);
            assert!((left.x + right.x).abs() < EPSILON);
            assert!((left.y - right.y).abs() < EPSILON);
        }
    }

    #[test]
    fn test_extremes_sit_at_half_span() {
        // given
        let dial = dial();

        // when
        let right = dial.transform(100.0, 1.0);

        // then
        let half = 40.0_f64.to_radians();
        assert_close(right, Point::new(100.0 * half.sin(), -100.0 * half.cos()));
    }

    #[test]
    fn test_overshoot_extrapolates() {
        let dial = dial();
        assert!((dial.angle(1.25) - 60.0_f64.to_radians()).abs() < EPSILON);
        assert!(dial.transform(10.0, 1.25).x > dial.transform(10.0, 1.0).x);
    }

    #[rstest]
    #[case(2)]
    #[case(31)]
    #[case(61)]
    fn test_full_arc_points(#[case] point_count: usize) {
        // given
        let dial = dial();

        // when
        let points = vertices(dial.draw_full_arc(265.0, point_count).unwrap());

        // then
        assert_eq!(points.len(), point_count);
        assert_close(points[0], dial.transform(265.0, 0.0));
        assert_close(points[point_count - 1], dial.transform(265.0, 1.0));
    }

    #[test]
    fn test_arc_needs_two_points() {
        let err = dial().draw_full_arc(100.0, 1).unwrap_err();
        assert!(err.is_invalid_geometry());
    }

    #[rstest]
    #[case(0, 15.0)]
    #[case(4, 15.0)]
    #[case(14, 15.0)]
    fn test_partial_arc_covers_one_slice(#[case] index: usize, #[case] total: f64) {
        // given
        let dial = dial();

        // when
        let points = vertices(dial.draw_partial_arc(270.0, 10, index, total).unwrap());

        // then
        assert_eq!(points.len(), 10);
        assert_close(points[0], dial.transform(270.0, index as f64 / total));
        assert_close(points[9], dial.transform(270.0, (index as f64 + 1.0) / total));
    }

    #[test]
    fn test_partial_arc_rejects_zero_segments() {
        assert!(dial().draw_partial_arc(270.0, 10, 0, 0.0).is_err());
    }

    #[test]
    fn test_linear_tiers() {
        // given
        let dial = dial();

        // when
        let ticks = dial.draw_linear_ticks(265.0, 31, 10.0, 5.0, 4.0, 10, 2).unwrap();

        // then
        let tiers = tiers(&ticks);
        assert_eq!(tiers.len(), 31);
        for (i, tier) in tiers.iter().enumerate() {
            let expected = match i {
                0 | 10 | 20 | 30 => TickTier::Large,
                i if i % 2 == 0 => TickTier::Medium,
                _ => TickTier::Small,
            };
            assert_eq!(*tier, expected, "tick {i}");
        }
        assert_eq!(tiers.iter().filter(|t| **t == TickTier::Large).count(), 4);
        assert_eq!(tiers.iter().filter(|t| **t == TickTier::Medium).count(), 12);
    }

    #[rstest]
    #[case(8, 4, 2, TickTier::Large)]
    #[case(6, 4, 2, TickTier::Medium)]
    #[case(6, 4, 3, TickTier::Medium)]
    #[case(7, 4, 2, TickTier::Small)]
    fn test_linear_tier_priority(
        #[case] index: usize,
        #[case] major: usize,
        #[case] medium: usize,
        #[case] expected: TickTier,
    ) {
        assert_eq!(linear_tier(index, major, medium), expected);
    }

    #[test]
    fn test_linear_tick_lengths_follow_tier() {
        let dial = dial();
        let ticks = dial.draw_linear_ticks(100.0, 5, 10.0, 5.0, 4.0, 4, 2).unwrap();

        for tick in ticks {
            let DrawCommand::Tick { base, tip, tier, .. } = tick else {
                panic!("expected tick");
            };
            let expected = match tier {
                TickTier::Large => 10.0,
                TickTier::Medium => 5.0,
                TickTier::Small => 4.0,
            };
            assert!((base.distance(tip) - expected).abs() < EPSILON);
            assert!((base.distance(Point::default()) - 100.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_linear_ticks_reject_zero_interval() {
        let dial = dial();
        assert!(dial.draw_linear_ticks(100.0, 31, 10.0, 5.0, 4.0, 0, 2).is_err());
        assert!(dial.draw_linear_ticks(100.0, 31, 10.0, 5.0, 4.0, 10, 0).is_err());
    }

    #[test]
    fn test_single_decade_log_tiers() {
        // given
        let dial = dial();

        // when
        let ticks = dial.draw_log_ticks(185.0, 1, 10.0, 4.0, 4.0).unwrap();

        // then
        let tiers = tiers(&ticks);
        assert_eq!(tiers.len(), 10);
        for (i, tier) in tiers.iter().enumerate() {
            let expected = match i {
                0 | 9 => TickTier::Large,
                5 => TickTier::Medium,
                _ => TickTier::Small,
            };
            assert_eq!(*tier, expected, "tick {i}");
        }
    }

    #[test]
    fn test_log_positions() {
        // given
        let decades = 3;

        // when
        let positions = (0..10 * decades)
            .map(|i| log_deflection(i, decades))
            .collect::<Vec<_>>();

        // then
        assert_eq!(positions[0], 0.0);
        assert!((positions[10] - 1.0 / 3.0).abs() < EPSILON);
        assert!((positions[4] - 5.0_f64.log10() / 3.0).abs() < EPSILON);
        assert!((positions[29] - 1.0).abs() < EPSILON);
        assert!(positions.windows(2).all(|w| w[0] <= w[1] + EPSILON));
        // denser towards the end of each decade
        assert!(positions[1] - positions[0] > positions[8] - positions[7]);
    }

    #[test]
    fn test_multi_decade_log_tiers() {
        let tiers = tiers(&dial().draw_log_ticks(145.0, 3, 10.0, 4.0, 4.0).unwrap());

        assert_eq!(tiers.len(), 30);
        assert_eq!(tiers[10], TickTier::Large);
        assert_eq!(tiers[20], TickTier::Large);
        assert_eq!(tiers[29], TickTier::Large);
        assert_eq!(tiers[9], TickTier::Small);
        for i in [5, 15, 25] {
            assert_eq!(tiers[i], TickTier::Medium, "tick {i}");
        }
        for i in [4, 14, 24] {
            assert_eq!(tiers[i], TickTier::Small, "tick {i}");
        }
    }

    #[rstest]
    #[case(5, 50, TickTier::Medium)]
    #[case(45, 50, TickTier::Medium)]
    #[case(40, 50, TickTier::Large)]
    #[case(49, 50, TickTier::Large)]
    #[case(44, 50, TickTier::Small)]
    #[case(19, 50, TickTier::Small)]
    fn test_log_tier_classification(
        #[case] index: usize,
        #[case] tick_count: usize,
        #[case] expected: TickTier,
    ) {
        assert_eq!(log_tier(index, tick_count), expected);
    }

    #[test]
    fn test_log_ticks_reject_zero_decades() {
        assert!(dial().draw_log_ticks(145.0, 0, 10.0, 4.0, 4.0).is_err());
    }

    #[test]
    fn test_log_medium_is_thinner() {
        let style = FaceStyle::default();
        assert!(
            style.ticks.width(TickTier::Medium, ScaleKind::Logarithmic)
                < style.ticks.width(TickTier::Medium, ScaleKind::Linear)
        );
    }

    #[rstest]
    #[case(10, 0, 15.0)]
    #[case(10, 5, 14.0)]
    #[case(3, 1, 6.0)]
    fn test_sector_loop(#[case] point_count: usize, #[case] index: usize, #[case] total: f64) {
        // given
        let dial = dial();
        let start = index as f64 / total;
        let end = (index as f64 + 1.0) / total;

        // when
        let points = vertices(dial.draw_sector(225.0, point_count, 6.0, index, total).unwrap());

        // then
        assert_eq!(points.len(), 2 * point_count + 2);
        assert_close(points[0], dial.transform(225.0, start));
        assert_close(points[point_count - 1], dial.transform(225.0, end));
        assert_close(points[point_count], dial.transform(231.0, end));
        assert_close(points[2 * point_count], dial.transform(231.0, start));
        // back to where the loop started
        assert_close(points[2 * point_count + 1], points[0]);
    }

    #[test]
    fn test_fractional_segments() {
        // given
        let dial = dial();

        // when
        let points = vertices(dial.draw_sector(185.0, 10, 6.0, 0, 3.5).unwrap());

        // then
        let width = 1.0 / 3.5;
        assert_close(points[9], dial.transform(185.0, width));
        let chord = points[0].distance(points[9]);
        assert!(chord > 1.0);
        assert!(points.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_generators_are_idempotent() {
        let dial = dial();
        assert_eq!(
            dial.draw_sector(185.0, 10, 6.0, 0, 3.5).unwrap(),
            dial.draw_sector(185.0, 10, 6.0, 0, 3.5).unwrap()
        );
        assert_eq!(
            dial.draw_log_ticks(185.0, 5, 10.0, 4.0, 4.0).unwrap(),
            dial.draw_log_ticks(185.0, 5, 10.0, 4.0, 4.0).unwrap()
        );
        assert_eq!(
            dial.draw_labels(197.0, 6, &[]).unwrap(),
            dial.draw_labels(197.0, 6, &[]).unwrap()
        );
    }

    #[test]
    fn test_labels_rotate_radially() {
        // given
        let dial = dial();
        let texts = vec!["15".to_string(), "20".to_string()];

        // when
        let labels = dial.draw_labels(277.0, 3, &texts).unwrap();

        // then
        let expected = [("15", -40.0), ("20", 0.0), ("x", 40.0)];
        for (label, (text, degrees)) in labels.iter().zip(expected) {
            let DrawCommand::Label {
                rotation_degrees,
                text: actual,
                ..
            } = label
            else {
                panic!("expected label");
            };
            assert_eq!(actual, text);
            assert!((rotation_degrees - degrees).abs() < EPSILON);
        }
    }

    #[test]
    fn test_labels_need_two_anchors() {
        assert!(dial().draw_labels(277.0, 1, &[]).is_err());
    }

    #[test]
    fn test_crosshair() {
        let lines = dial().draw_crosshair(1.0).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(matches!(lines[0], DrawCommand::Line { stroke, .. } if !stroke.rounded));
    }
}
