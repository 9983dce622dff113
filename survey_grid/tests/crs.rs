use survey_grid::crs::{CoordinateTransform, Crs, SphericalMercator};
use survey_grid::geometry::Point;

#[test]
fn transform_identity_for_same_crs() {
    let crs = Crs::from_epsg(4326);
    let p = SphericalMercator
        .transform(Point::new(1.0, 2.0), &crs, &crs)
        .unwrap();
    assert!((p.x - 1.0).abs() < 1e-6);
    assert!((p.y - 2.0).abs() < 1e-6);
}

#[test]
fn web_mercator_round_trip_through_wgs84() {
    let webm = Crs::web_mercator();
    let wgs = Crs::wgs84();
    for &(x, y) in &[(0.0, 0.0), (-12_634_000.0, 7_084_000.0), (1_500_000.0, -4_200_000.0)] {
        let geo = SphericalMercator.transform(Point::new(x, y), &webm, &wgs).unwrap();
        let back = SphericalMercator.transform(geo, &wgs, &webm).unwrap();
        assert!((back.x - x).abs() < 1e-6);
        assert!((back.y - y).abs() < 1e-6);
    }
}

#[cfg(feature = "proj")]
#[test]
fn proj_transform_agrees_with_spherical_mercator() {
    use survey_grid::crs::ProjTransform;

    let webm = Crs::web_mercator();
    let wgs = Crs::wgs84();
    for &(lon, lat) in &[(0.0, 0.0), (-113.49, 53.54), (151.2, -33.9)] {
        let geo = Point::new(lon, lat);
        let expected = SphericalMercator::forward(geo);
        let p = ProjTransform.transform(geo, &wgs, &webm).unwrap();
        assert!((p.x - expected.x).abs() < 1e-3);
        assert!((p.y - expected.y).abs() < 1e-3);
    }
}

#[cfg(feature = "proj")]
#[test]
fn proj_services_describe_utm_grid() {
    use survey_grid::grid::build_grid_description;
    use survey_grid::MapServices;

    let utm = Crs::from_epsg(32612);
    let origin = Point::new(500_000.0, 5_900_000.0);
    let d = build_grid_description(Some(origin), None, 10.0, 10.0, &utm, &MapServices::proj())
        .unwrap()
        .unwrap();
    assert!(d.rise_factor.abs() < 1e-3);
    assert!((d.run_factor - 1.0).abs() < 1e-3);
}
