use ::geojson::{Geometry, Value};

use crate::{
    Circle, Error, Exclude, GeoJson, GeometryType, Point, Polygon, ToGeoJson,
    geojson::format::FixedFormatter, to_string, to_string_pretty,
};

fn p(lon: f64, lat: f64) -> Point {
    Point::new(lon, lat).unwrap()
}

#[test]
fn point_renders_as_geojson_point() {
    let geojson = p(37.57351, 55.715084).to_geojson().unwrap();
    assert_eq!(geojson.as_type(), GeometryType::Point);
    assert_eq!(geojson.to_point(), Some(p(37.57351, 55.715084)));
    assert!(geojson.to_polygon().is_none());
    assert_eq!(
        geojson.as_geometry().value,
        Value::Point(vec![37.57351, 55.715084])
    );
}

#[test]
fn polygon_renders_as_geometry_rings() {
    let polygon = Polygon::new([p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
    let geometry = Geometry::from(polygon.to_geojson().unwrap());

    assert_eq!(
        geometry.value,
        Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 0.0],
        ]])
    );
    assert!(geometry.bbox.is_none());
}

///原点も未設定ではなく正当な点として出力される
#[test]
fn origin_point_is_rendered() {
    let geojson = p(0.0, 0.0).to_geojson().unwrap();
    assert_eq!(
        to_string(&geojson).unwrap(),
        r#"{"type":"Point","coordinates":[0.000000,0.000000]}"#
    );
}

#[test]
fn unset_values_render_as_null() {
    let point: Option<Point> = None;
    let polygon: Option<Polygon> = None;
    assert!(point.to_geojson().is_none());
    assert!(polygon.to_geojson().is_none());

    assert_eq!(to_string(&point).unwrap(), "null");
    assert_eq!(to_string(&point.to_geojson()).unwrap(), "null");
}

#[test]
fn polygon_text_matches_document_format() {
    let mut polygon = Polygon::new([p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
    polygon
        .exclude([p(0.0, 0.0), p(0.5, 0.5), p(0.5, 0.0)])
        .unwrap();

    let text = to_string(&polygon.to_geojson()).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"type":"Polygon","coordinates":["#,
            "[[0.000000,0.000000],[1.000000,1.000000],[1.000000,0.000000],[0.000000,0.000000]],",
            "[[0.000000,0.000000],[0.500000,0.500000],[0.500000,0.000000],[0.000000,0.000000]]",
            "]}"
        )
    );
}

///円には2種類の出力があり、互いに独立している
#[test]
fn circle_has_two_renderings() {
    let circle = Circle::new(37.57351, 55.715084, 500.639843).unwrap();

    let compact = circle.to_compact_json().unwrap();
    assert_eq!(compact, r#"{"center":[37.573510,55.715084],"radius":501}"#);

    let geojson = circle.to_geojson().unwrap();
    assert_eq!(geojson.as_type(), GeometryType::Polygon);
    assert!(to_string(&geojson).unwrap().starts_with(r#"{"type":"Polygon","coordinates":[[["#));
}

#[test]
fn pretty_output_keeps_fixed_precision() {
    let text = to_string_pretty(&p(1.5, -2.25)).unwrap();
    assert_eq!(text, "[\n  1.500000,\n  -2.250000\n]");
}

#[test]
fn precision_is_adjustable() {
    let mut buffer = Vec::new();
    let formatter = FixedFormatter::new().with_precision(2);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    serde::Serialize::serialize(&p(37.57351, 55.715084), &mut serializer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "[37.57,55.72]");
}

#[test]
fn non_finite_numbers_become_null() {
    assert_eq!(to_string(&[1.0, f64::NAN]).unwrap(), "[1.000000,null]");
}

#[test]
fn geojson_can_be_read_back() {
    let text = r#"{"type":"Polygon","coordinates":[[[0,0],[1,1],[1,0]]]}"#;
    let geojson: GeoJson = serde_json::from_str(text).unwrap();
    assert_eq!(geojson.as_type(), GeometryType::Polygon);
    assert_eq!(geojson.to_polygon().unwrap().exterior().unwrap().len(), 4);

    let point: GeoJson =
        serde_json::from_str(r#"{"type":"Point","coordinates":[37.57351,55.715084]}"#).unwrap();
    assert_eq!(point, GeoJson::point(p(37.57351, 55.715084)));
}

#[test]
fn mismatched_type_is_rejected() {
    let text = r#"{"type":"Polygon","coordinates":[37.57351,55.715084]}"#;
    assert!(serde_json::from_str::<GeoJson>(text).is_err());
}

///点と多角形以外のジオメトリは読み込めない
#[test]
fn unsupported_geometry_is_rejected() {
    let text = r#"{"type":"LineString","coordinates":[[0,0],[1,1]]}"#;
    let error = serde_json::from_str::<GeoJson>(text).unwrap_err();
    assert!(error.to_string().contains("LineString"));

    let geometry = Geometry::new(Value::MultiPoint(vec![vec![0.0, 0.0]]));
    assert!(matches!(
        GeoJson::try_from(geometry),
        Err(Error::UnsupportedGeometry {
            found: "MultiPoint"
        })
    ));
}

#[test]
fn positions_are_validated_on_read() {
    let altitude = Geometry::new(Value::Point(vec![37.57351, 55.715084, 120.0]));
    assert!(matches!(
        GeoJson::try_from(altitude),
        Err(Error::InvalidPosition { len: 3 })
    ));

    let out_of_range = Geometry::new(Value::Polygon(vec![vec![
        vec![0.0, 0.0],
        vec![0.0, 91.0],
        vec![1.0, 0.0],
    ]]));
    assert!(matches!(
        GeoJson::try_from(out_of_range),
        Err(Error::InvalidLatitude { .. })
    ));
}

///読み込んだ多角形のリングは閉じられ、bbox は保持されない
#[test]
fn read_geometry_is_normalized() {
    let text = r#"{"type":"Polygon","bbox":[0,0,1,1],"coordinates":[[[0,0],[1,1],[1,0]]]}"#;
    let geojson: GeoJson = serde_json::from_str(text).unwrap();
    assert!(geojson.as_geometry().bbox.is_none());
    assert_eq!(
        to_string(&geojson).unwrap(),
        concat!(
            r#"{"type":"Polygon","coordinates":"#,
            "[[[0.000000,0.000000],[1.000000,1.000000],[1.000000,0.000000],[0.000000,0.000000]]]}"
        )
    );
}

#[test]
fn round_trip_through_text() {
    let circle = Circle::new(-73.985656, 40.748433, 1200.0).unwrap();
    let geojson = circle.to_geojson().unwrap();

    let parsed: GeoJson = serde_json::from_str(&to_string(&geojson).unwrap()).unwrap();
    let original = geojson.to_polygon().unwrap();
    let parsed = parsed.to_polygon().unwrap();

    assert_eq!(original.rings().len(), parsed.rings().len());
    for (a, b) in original.rings()[0].iter().zip(&parsed.rings()[0]) {
        assert!((a.as_longitude() - b.as_longitude()).abs() < 1e-6);
        assert!((a.as_latitude() - b.as_latitude()).abs() < 1e-6);
    }
}

#[test]
fn json_errors_are_wrapped() {
    struct Broken;

    impl serde::Serialize for Broken {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("broken"))
        }
    }

    assert!(matches!(to_string(&Broken), Err(Error::Json(_))));
}

///出力は UTF-8 のまま返される
#[test]
fn text_keeps_non_ascii_characters() {
    assert_eq!(to_string("東京").unwrap(), "\"東京\"");
    assert_eq!(to_string_pretty(&["東京"]).unwrap(), "[\n  \"東京\"\n]");
}
