use motoloop::models::{GeoPoint, RideMetadata, RouteTemplate, TemplateCatalog};
use motoloop::services::gpx;
use motoloop::services::route_generator::geometric_loop;
use motoloop::AppError;

fn template(scenic_factor: f64, waypoint_factor: f64) -> RouteTemplate {
    RouteTemplate::with_factors("Synthetic", scenic_factor, waypoint_factor)
}

#[test]
fn test_reference_loop() {
    let start = GeoPoint::new(42.3889, -71.1294).unwrap();
    let template = template(1.0, 1.0);

    assert_eq!(geometric_loop::loop_radius_km(&template, 3.0), 75.0);
    assert_eq!(geometric_loop::loop_waypoint_count(&template), 8);

    let ring = geometric_loop::generate(start, &template, 3.0).unwrap();
    assert_eq!(ring.len(), 10);
    assert_eq!(ring.points()[0], start);
    assert_eq!(ring.points()[9], start);
}

#[test]
fn test_ring_shape_for_all_builtin_templates() {
    let start = GeoPoint::new(46.5197, 6.6323).unwrap();
    let catalog = TemplateCatalog::default();

    for template in catalog.all() {
        for duration in [0.5, 1.0, 2.5, 6.0] {
            let ring = geometric_loop::generate(start, template, duration).unwrap();
            let expected = geometric_loop::loop_waypoint_count(template) + 2;

            assert_eq!(ring.len(), expected, "{} at {}h", template.name, duration);
            assert_eq!(ring.points().first(), ring.points().last());
            assert_eq!(ring.start(), start);

            // Every waypoint lies between 0.1x and 1.3x the nominal radius
            let radius = geometric_loop::loop_radius_km(template, duration);
            for waypoint in &ring.points()[1..ring.len() - 1] {
                let d = start.distance_to(waypoint);
                assert!(
                    d > 0.05 * radius && d < 1.4 * radius,
                    "{}: waypoint {:.1}km from start, radius {:.1}km",
                    template.name,
                    d,
                    radius
                );
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let start = GeoPoint::new(-33.8688, 151.2093).unwrap();
    let template = template(1.3, 1.7);

    let first = geometric_loop::generate(start, &template, 4.25).unwrap();
    let second = geometric_loop::generate(start, &template, 4.25).unwrap();

    let bits = |ring: &motoloop::models::CoordinateRing| -> Vec<(u64, u64)> {
        ring.points()
            .iter()
            .map(|p| (p.lat.to_bits(), p.lon.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_longer_rides_make_bigger_loops() {
    let start = GeoPoint::new(42.3889, -71.1294).unwrap();
    let template = template(1.0, 1.0);

    let short = geometric_loop::generate(start, &template, 1.0).unwrap();
    let long = geometric_loop::generate(start, &template, 3.0).unwrap();

    let ratio = long.length_km() / short.length_km();
    assert!((ratio - 3.0).abs() < 0.1, "ratio was {}", ratio);
}

#[test]
fn test_invalid_inputs_are_configuration_errors() {
    let start = GeoPoint::new(42.3889, -71.1294).unwrap();

    let cases = [
        (template(1.0, 1.0), 0.0),
        (template(1.0, 1.0), -2.0),
        (template(1.0, 1.0), f64::NAN),
        // floor(8 * 0.3) = 2 waypoints
        (template(1.0, 0.3), 2.0),
    ];

    for (template, duration) in cases {
        let result = geometric_loop::generate(start, &template, duration);
        assert!(
            matches!(result, Err(AppError::InvalidConfiguration(_))),
            "waypoint_factor {} at {}h should fail",
            template.waypoint_factor,
            duration
        );
    }
}

#[test]
fn test_ring_round_trips_through_gpx_scanner() {
    // A directions response echoing the ring as track points
    let start = GeoPoint::new(42.3889, -71.1294).unwrap();
    let ring = geometric_loop::generate(start, &template(1.0, 1.0), 2.0).unwrap();

    let mut text = String::from("<gpx><metadata></metadata><trk><trkseg>\n");
    for point in ring.points() {
        text.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\"><ele>0</ele></trkpt>\n",
            point.lat, point.lon
        ));
    }
    text.push_str("</trkseg></trk></gpx>");

    let track = gpx::extract_track_points(&text).unwrap();
    assert_eq!(track, ring.points());

    let metadata = RideMetadata {
        ride_name: "Loop1".to_string(),
        bike_model: "R 1250 GS".to_string(),
        ..Default::default()
    };
    let enhanced = gpx::inject_metadata(&text, &metadata).unwrap();

    // Injection leaves the track points untouched
    assert_eq!(gpx::extract_track_points(&enhanced).unwrap(), track);
    assert!(enhanced.contains("Loop1"));
    assert!(enhanced.contains("</metadata>\n<metadata></metadata>"));
}
