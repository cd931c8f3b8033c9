use garment_tryon::homography::{check_quad, project, solve_four_point};
use garment_tryon::types::Point2D;

fn quad(pts: [[f32; 2]; 4]) -> [Point2D; 4] {
    pts.map(Point2D::from)
}

fn assert_round_trip(src: [Point2D; 4], dst: [Point2D; 4]) {
    assert!(check_quad(&src, 1.0, 1e-4).is_ok(), "src {src:?}");
    assert!(check_quad(&dst, 1.0, 1e-4).is_ok(), "dst {dst:?}");
    let h = solve_four_point(&src, &dst).expect("well-posed correspondence");
    for (s, d) in src.iter().zip(dst.iter()) {
        let p = project(&h, *s).expect("finite projection");
        assert!(
            (p.x - d.x).abs() < 1e-3 && (p.y - d.y).abs() < 1e-3,
            "{s:?} -> {p:?}, expected {d:?}"
        );
    }
}

#[test]
fn four_point_solve_is_exact_on_its_correspondences() {
    let garment = quad([[240.8, 288.0], [218.0, 324.0], [194.0, 364.8], [410.0, 240.0]]);
    let bodies = [
        quad([[250.0, 150.0], [250.0, 400.0], [390.0, 400.0], [390.0, 150.0]]),
        quad([[200.0, 120.0], [230.0, 410.0], [420.0, 380.0], [400.0, 100.0]]),
        quad([[5.0, 5.0], [8.0, 30.0], [40.0, 33.0], [37.0, 2.0]]),
        // Mirrored: the body faces away from the camera.
        quad([[390.0, 150.0], [390.0, 400.0], [250.0, 400.0], [250.0, 150.0]]),
        quad([[1200.0, 800.0], [1100.0, 1900.0], [2100.0, 1950.0], [2000.0, 700.0]]),
    ];
    for body in bodies {
        assert_round_trip(garment, body);
        assert_round_trip(body, garment);
    }
}

#[test]
fn unit_square_to_trapezoid() {
    let src = quad([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
    let dst = quad([[100.0, 100.0], [50.0, 300.0], [350.0, 300.0], [300.0, 100.0]]);
    assert_round_trip(src, dst);
}
