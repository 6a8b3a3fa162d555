use super::*;
use crate::geojson::TriangleCollection;

fn polygon_fc(rings: &[&[[f64; 2]]]) -> Document {
    let coords: Vec<Vec<Vec<f64>>> = rings
        .iter()
        .map(|r| r.iter().map(|p| p.to_vec()).collect())
        .collect();
    let doc = serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Polygon", "coordinates": coords}}
        ]
    });
    Document::from_value(doc).unwrap()
}

fn total_area(tris: &[Triangle]) -> f64 {
    tris.iter().map(|t| t.signed_area2() * 0.5).sum()
}

fn assert_normalized(tris: &[Triangle]) {
    for t in tris {
        assert!(t.signed_area2() >= 0.0, "clockwise triangle {:?}", t);
        let ring = t.ring();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }
}

const QUAD: [[f64; 2]; 5] = [[0.0, 0.0], [4.0, 0.0], [5.0, 3.0], [1.0, 4.0], [0.0, 0.0]];

/// 0.01° square near (10°E, 50°N).
const GEO_SQUARE: [[f64; 2]; 5] = [
    [10.0, 50.0],
    [10.01, 50.0],
    [10.01, 50.01],
    [10.0, 50.01],
    [10.0, 50.0],
];

const GEO_HOLE: [[f64; 2]; 5] = [
    [10.003, 50.003],
    [10.003, 50.007],
    [10.007, 50.007],
    [10.007, 50.003],
    [10.003, 50.003],
];

#[test]
fn method_names_round_trip() {
    assert_eq!("earcut".parse::<Method>().unwrap(), Method::Earcut);
    assert_eq!("cesium".parse::<Method>().unwrap(), Method::Cesium);
    assert_eq!(Method::default(), Method::Cesium);
    for m in Method::ALL {
        assert_eq!(m.to_string().parse::<Method>().unwrap(), m);
    }
}

#[test]
fn unknown_method_is_rejected() {
    let err = "foo".parse::<Method>().unwrap_err();
    assert!(matches!(err, TriError::UnknownMethod(ref name) if name == "foo"));
    // names are case-sensitive
    assert!("Earcut".parse::<Method>().is_err());
    assert!("".parse::<Method>().is_err());
}

#[test]
fn earcut_convex_quad_gives_two_triangles() {
    let doc = polygon_fc(&[&QUAD]);
    let tris = Method::Earcut.triangulate(&doc).unwrap();
    assert_eq!(tris.len(), 2);
    assert_normalized(&tris);
    assert!((total_area(&tris) - 14.5).abs() < 1e-12);
}

#[test]
fn earcut_clockwise_ring_comes_out_counter_clockwise() {
    let mut cw = QUAD;
    cw.reverse();
    let tris = FlatMesh.triangulate(&polygon_fc(&[&cw])).unwrap();
    assert_eq!(tris.len(), 2);
    assert_normalized(&tris);
    assert!((total_area(&tris) - 14.5).abs() < 1e-12);
}

#[test]
fn earcut_ignores_holes() {
    let outer = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]];
    let hole = [[2.0, 2.0], [2.0, 8.0], [8.0, 8.0], [8.0, 2.0], [2.0, 2.0]];
    let tris = FlatMesh.triangulate(&polygon_fc(&[&outer, &hole])).unwrap();
    assert_eq!(tris.len(), 2);
    assert!((total_area(&tris) - 100.0).abs() < 1e-9);
}

#[test]
fn earcut_needs_polygon_in_first_feature() {
    let doc: Document = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}},
        {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
            "coordinates": [[[0,0],[1,0],[0,1],[0,0]]]}}
    ]}"#
    .parse()
    .unwrap();
    let err = FlatMesh.triangulate(&doc).unwrap_err();
    assert!(matches!(err, TriError::MissingPolygon(_)));

    let bare: Document = r#"{"type": "Polygon", "coordinates": [[[0,0],[1,0],[0,1],[0,0]]]}"#
        .parse()
        .unwrap();
    assert!(FlatMesh.triangulate(&bare).is_err());

    let empty: Document = r#"{"type": "FeatureCollection", "features": []}"#.parse().unwrap();
    assert!(FlatMesh.triangulate(&empty).is_err());
}

#[test]
fn earcut_accepts_lone_feature() {
    let doc: Document = r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
        "coordinates": [[[0,0],[2,0],[0,2],[0,0]]]}}"#
        .parse()
        .unwrap();
    let tris = FlatMesh.triangulate(&doc).unwrap();
    assert_eq!(tris.len(), 1);
    assert!((total_area(&tris) - 2.0).abs() < 1e-12);
}

#[test]
fn geographic_square_returns_input_vertices() {
    let doc = polygon_fc(&[&GEO_SQUARE]);
    let tris = Method::Cesium.triangulate(&doc).unwrap();
    assert_eq!(tris.len(), 2);
    assert_normalized(&tris);
    for t in &tris {
        for v in t.vertices {
            let near = GEO_SQUARE
                .iter()
                .any(|p| (p[0] - v[0]).abs() < 1e-9 && (p[1] - v[1]).abs() < 1e-9);
            assert!(near, "vertex {:?} not in input", v);
        }
    }
    assert!((total_area(&tris) - 1e-4).abs() < 1e-10);
}

#[test]
fn geographic_clockwise_input_is_handled() {
    let mut cw = GEO_SQUARE;
    cw.reverse();
    let tris = Geographic::default()
        .triangulate(&polygon_fc(&[&cw]))
        .unwrap();
    assert_eq!(tris.len(), 2);
    assert_normalized(&tris);
}

#[test]
fn geographic_respects_holes() {
    let doc = polygon_fc(&[&GEO_SQUARE, &GEO_HOLE]);
    let tris = Geographic::default().triangulate(&doc).unwrap();
    // 8 vertices, 1 hole: n + 2h - 2 triangles
    assert_eq!(tris.len(), 8);
    assert_normalized(&tris);
    let expected = 1e-4 - 0.004 * 0.004;
    assert!((total_area(&tris) - expected).abs() < 1e-10);
}

#[test]
fn geographic_mesh_is_earth_centred() {
    let doc = polygon_fc(&[&GEO_SQUARE]);
    let poly = doc.polygons()[0];
    let mesh = Geographic::default().mesh(poly).unwrap();
    // closing position dropped
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    for p in &mesh.positions {
        let r = p.norm();
        assert!(r > 6.35e6 && r < 6.38e6, "radius {r}");
    }
}

#[test]
fn geographic_uses_first_polygon_anywhere_in_document() {
    let doc: Document = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {}, "geometry": null},
        {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]}},
        {"type": "Feature", "properties": {}, "geometry": {"type": "MultiPolygon", "coordinates": [
            [[[20,10],[20.5,10],[20.5,10.5],[20,10.5],[20,10]]],
            [[[30,10],[31,10],[30,11],[30,10]]]
        ]}}
    ]}"#
    .parse()
    .unwrap();
    let tris = Method::Cesium.triangulate(&doc).unwrap();
    assert_eq!(tris.len(), 2);
    assert!(tris
        .iter()
        .all(|t| t.vertices.iter().all(|v| v[0] < 21.0)));
}

#[test]
fn geographic_without_polygon_fails() {
    let doc: Document = r#"{"type": "Point", "coordinates": [1, 2]}"#.parse().unwrap();
    let err = Method::Cesium.triangulate(&doc).unwrap_err();
    assert!(matches!(err, TriError::MissingPolygon(_)));
}

#[test]
fn geographic_rejects_collapsed_outer_ring() {
    let ring = [[5.0, 5.0], [6.0, 5.0], [6.0, 5.0], [5.0, 5.0]];
    let err = Method::Cesium.triangulate(&polygon_fc(&[&ring])).unwrap_err();
    assert!(matches!(err, TriError::Degenerate(_)));
}

#[test]
fn geographic_collinear_ring_passes_degenerate_triangle_through() {
    let ring = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 0.0]];
    let tris = Method::Cesium.triangulate(&polygon_fc(&[&ring])).unwrap();
    assert_eq!(tris.len(), 1);
    assert!(tris[0].signed_area2() >= 0.0);
    assert!(tris[0].signed_area2().abs() < 1e-9);
}

#[test]
fn output_is_deterministic() {
    let doc = polygon_fc(&[&GEO_SQUARE, &GEO_HOLE]);
    for m in Method::ALL {
        let a = TriangleCollection::from_triangles(&m.triangulate(&doc).unwrap());
        let b = TriangleCollection::from_triangles(&m.triangulate(&doc).unwrap());
        assert_eq!(a.to_pretty_json().unwrap(), b.to_pretty_json().unwrap());
    }
}
