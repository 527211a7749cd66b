// bounds.rs — 三面板包围几何（三段弦近似圆弧）

use crate::error::{EnvironmentError, Result};

/// The six coordinates shared by the panel corners.
///
/// The left panel runs along `x = left_x`, the back panel along `y = back_y`,
/// and the centre panel joins `(left_x, middle_y)` to `(middle_x, back_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingGeometry {
    pub left_x: f64,
    pub middle_x: f64,
    pub right_x: f64,
    pub back_y: f64,
    pub middle_y: f64,
    pub front_y: f64,
}

/// Angle (radians) of the connection point between the side and centre panels.
///
/// `alpha1 = acos((length_thirds / 2) / radius)`, result is `135° - alpha1`.
pub fn calculate_alpha(radius: f64, length_thirds: f64) -> Result<f64> {
    let half_panel = length_thirds / 2.0;
    let ratio = half_panel / radius;

    if !ratio.is_finite() || radius <= 0.0 || !(-1.0..=1.0).contains(&ratio) {
        return Err(EnvironmentError::DegenerateGeometry { radius, half_panel });
    }

    let alpha1 = ratio.acos();
    Ok(135f64.to_radians() - alpha1)
}

pub fn calculate_coordinate_bounds(radius: f64, length: f64) -> Result<BoundingGeometry> {
    // 全景由三个平面组成
    let length_thirds = length / 3.0;

    let alpha = calculate_alpha(radius, length_thirds)?;
    let connection_x = alpha.sin() * radius;
    let connection_y = alpha.cos() * radius;

    let middle_x = -connection_y;
    let middle_y = connection_y;

    Ok(BoundingGeometry {
        left_x: -connection_x,
        middle_x,
        right_x: middle_x + length_thirds,
        back_y: connection_x,
        middle_y,
        front_y: middle_y - length_thirds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_alpha_default_geometry() {
        let alpha = calculate_alpha(50000.0, 50000.0).unwrap();
        assert!(close(alpha.to_degrees(), 75.0, 1e-9));
    }

    #[test]
    fn test_default_bounds() {
        let b = calculate_coordinate_bounds(50000.0, 150000.0).unwrap();

        assert!(close(b.left_x, -48296.3, 0.1));
        assert!(close(b.middle_x, -12940.9, 0.1));
        assert!(close(b.right_x, 37059.1, 0.1));
        assert!(close(b.back_y, 48296.3, 0.1));
        assert!(close(b.middle_y, 12940.9, 0.1));
        assert!(close(b.front_y, -37059.1, 0.1));
    }

    #[test]
    fn test_bounds_identities() {
        for &(radius, length) in &[(50000.0, 150000.0), (30000.0, 45000.0), (1.0, 6.0), (7.5, 0.3)] {
            let b = calculate_coordinate_bounds(radius, length).unwrap();
            let third = length / 3.0;

            assert_eq!(b.right_x, b.middle_x + third);
            assert_eq!(b.front_y, b.middle_y - third);
            assert_eq!(b.left_x, -b.back_y);
            assert_eq!(b.middle_x, -b.middle_y);
        }
    }

    #[test]
    fn test_half_panel_equal_to_radius_is_allowed() {
        // length / 6 == radius，acos(1) = 0
        let b = calculate_coordinate_bounds(1000.0, 6000.0).unwrap();
        assert!(b.left_x.is_finite() && b.front_y.is_finite());
    }

    #[test]
    fn test_degenerate_geometry() {
        let err = calculate_coordinate_bounds(1000.0, 150000.0).unwrap_err();
        match err {
            EnvironmentError::DegenerateGeometry { radius, half_panel } => {
                assert_eq!(radius, 1000.0);
                assert_eq!(half_panel, 25000.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(calculate_coordinate_bounds(0.0, 100.0).is_err());
        assert!(calculate_coordinate_bounds(f64::NAN, 100.0).is_err());
    }
}
