use meter_dial::{FaceConfig, Feature, GaugeConfig, MeterFace, TickLengths};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A two-gauge face on a wider 90 degree movement, built with the bon-generated builders
    let config = FaceConfig::builder()
        .span_degrees(90.0)
        .gauges(vec![
            GaugeConfig::builder()
                .name("voltage")
                .radius(200.0)
                .features(vec![
                    Feature::Arc {
                        radius_offset: 0.0,
                        point_count: 41,
                    },
                    Feature::LinearTicks {
                        radius_offset: 0.0,
                        point_count: 41,
                        lengths: TickLengths::new(10.0, 6.0, 3.0)?,
                        interval_major: 10,
                        interval_medium: 5,
                    },
                    Feature::Labels {
                        radius_offset: 12.0,
                        count: 5,
                        texts: ["0", "5", "10", "15", "20"].map(String::from).to_vec(),
                    },
                    // Adornment along the top of the scale
                    Feature::PartialArcs {
                        radius_offset: 20.0,
                        point_count: 8,
                        total_segments: 8.0,
                        indices: vec![0, 2, 4, 6],
                    },
                ])
                .build(),
            GaugeConfig::builder()
                .name("current")
                .radius(150.0)
                .features(vec![
                    Feature::Arc {
                        radius_offset: 0.0,
                        point_count: 41,
                    },
                    Feature::LogTicks {
                        radius_offset: 0.0,
                        decade_count: 2,
                        lengths: TickLengths::new(10.0, 4.0, 4.0)?,
                    },
                    Feature::Sectors {
                        radius_offset: 0.0,
                        point_count: 10,
                        thickness: 6.0,
                        total_segments: 4.0,
                        indices: vec![3],
                    },
                ])
                .build(),
        ])
        .build();

    let face = MeterFace::new(config)?;
    let scene = face.compose()?;
    println!("Composed {} drawing commands", scene.len());

    scene.save("custom_face.svg", face.config().document_size())?;
    println!("Wrote custom_face.svg");
    Ok(())
}
