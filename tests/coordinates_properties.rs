use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use starhop::conversion::{normalize_catalog_name, parse_ra_hours, RaUnit};
use starhop::coordinates::{angular_separation, bearing, CompassPoint, EquatorialCoord};

fn random_coord(rng: &mut StdRng) -> EquatorialCoord {
    EquatorialCoord::new(rng.random_range(0.0..24.0), rng.random_range(-90.0..=90.0))
}

#[test]
fn test_separation_properties() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10_000 {
        let a = random_coord(&mut rng);
        let b = random_coord(&mut rng);

        let ab = angular_separation(&a, &b);
        let ba = angular_separation(&b, &a);
        assert!(!ab.is_nan());
        assert!((0.0..=180.0).contains(&ab), "separation {ab} out of range");
        assert_abs_diff_eq!(ab, ba, epsilon = 1e-9);
        assert_eq!(angular_separation(&a, &a), 0.0);
    }
}

#[test]
fn test_antipodes_never_nan() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1_000 {
        let a = random_coord(&mut rng);
        let antipode = EquatorialCoord::new((a.ra_hours + 12.0) % 24.0, -a.dec_degrees);
        let sep = angular_separation(&a, &antipode);
        assert!(!sep.is_nan());
        assert_abs_diff_eq!(sep, 180.0, epsilon = 1e-5);
    }
}

#[test]
fn test_bearing_range_and_bucket() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..10_000 {
        let a = random_coord(&mut rng);
        let b = random_coord(&mut rng);
        let course = bearing(&a, &b);
        assert!((0.0..360.0).contains(&course), "bearing {course} out of range");

        // the bucket is the compass point nearest to the bearing
        let point = CompassPoint::from_bearing(course);
        let index = CompassPoint::ALL.iter().position(|p| *p == point).unwrap();
        let centre = index as f64 * 22.5;
        let offset = (course - centre + 180.0).rem_euclid(360.0) - 180.0;
        assert!(offset.abs() <= 11.25 + 1e-6, "{course} bucketed to {point}");
    }
}

#[test]
fn test_sexagesimal_right_ascension() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5_000 {
        let h: u32 = rng.random_range(0..24);
        let m: u32 = rng.random_range(0..60);
        let millis: u32 = rng.random_range(0..60_000);
        let text = format!("{h:02}:{m:02}:{:02}.{:03}", millis / 1000, millis % 1000);
        let parsed = parse_ra_hours(&text, RaUnit::Hours).unwrap();
        let expected = h as f64 + m as f64 / 60.0 + millis as f64 / 3_600_000.0;
        assert_abs_diff_eq!(parsed, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_catalog_name_normalization() {
    assert_eq!(normalize_catalog_name("NGC0031"), "NGC31");
    assert_eq!(normalize_catalog_name("IC0010"), "IC10");
    assert_eq!(normalize_catalog_name("Vega"), "Vega");
}
