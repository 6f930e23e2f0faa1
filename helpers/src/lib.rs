pub mod general;
pub mod geometry;


#[cfg(test)]
mod geometry_tests {
    use crate::geometry::{bounding_box, rotate, Point2d, Vector2d};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_vector2d_sub() {
        let v1: Vector2d = Vector2d { dx: 5.0, dy: 5.0 };
        let v2: Vector2d = Vector2d { dx: 2.0, dy: -1.0 };
        assert_eq!(v1.sub(&v2), Vector2d { dx: 3.0, dy: 6.0 });
    }
    #[test]
    fn test_vector2d_abs() {
        let v1: Vector2d = Vector2d { dx: 3.0, dy: 4.0 };
        assert_abs_diff_eq!(v1.abs(), 5.0);
    }
    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate(&[Point2d { x: 1.0, y: 0.0 }], FRAC_PI_2);
        assert_abs_diff_eq!(p[0].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0].y, 1.0, epsilon = 1e-12);
    }
    #[test]
    fn test_rotate_zero_is_identity() {
        let pts = vec![Point2d { x: 1.5, y: -2.0 }, Point2d { x: -3.0, y: 0.25 }];
        assert_eq!(rotate(&pts, 0.0), pts);
    }
    #[test]
    fn test_bounding_box() {
        let pts = vec![
            Point2d { x: 1.0, y: -2.0 },
            Point2d { x: -3.0, y: 4.0 },
            Point2d { x: 0.0, y: 0.0 },
        ];
        assert_eq!(bounding_box(&pts), Some([-3.0, 1.0, -2.0, 4.0]));
        assert_eq!(bounding_box(&[]), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_rotate_back_reconstructs(
            x in -1.0e4f64..1.0e4,
            y in -1.0e4f64..1.0e4,
            angle in -10.0f64..10.0,
        ) {
            let pts = vec![Point2d { x, y }];
            let back = rotate(&rotate(&pts, angle), -angle);
            prop_assert!((back[0].x - x).abs() < 1e-8);
            prop_assert!((back[0].y - y).abs() < 1e-8);
        }
    }
}
