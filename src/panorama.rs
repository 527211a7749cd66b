// panorama.rs — 全景三面板坐标与两种 UV 模式

use crate::bounds::{calculate_coordinate_bounds, BoundingGeometry};
use crate::error::{EnvironmentError, Result};
use crate::params::PanoramaMode;
use glam::{DVec2, DVec3};

/// Left, centre and back quads.
pub const PANORAMA_FACES: [u32; 3] = [4, 4, 4];

const ONE_THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 * ONE_THIRD;

/// One quarter of the image spans the 90° between two world axes.
const DISPLAY_AMOUNT: f64 = 1.0 / 4.0;

pub fn panorama_coordinates(radius: f64, length: f64, height: f64) -> Result<Vec<DVec3>> {
    let b = calculate_coordinate_bounds(radius, length)?;

    Ok(vec![
        // 左侧面
        DVec3::new(b.left_x, b.front_y, 0.0),
        DVec3::new(b.left_x, b.middle_y, 0.0),
        DVec3::new(b.left_x, b.middle_y, height),
        DVec3::new(b.left_x, b.front_y, height),
        // 中间面
        DVec3::new(b.left_x, b.middle_y, 0.0),
        DVec3::new(b.middle_x, b.back_y, 0.0),
        DVec3::new(b.middle_x, b.back_y, height),
        DVec3::new(b.left_x, b.middle_y, height),
        // 后侧面
        DVec3::new(b.middle_x, b.back_y, 0.0),
        DVec3::new(b.right_x, b.back_y, 0.0),
        DVec3::new(b.right_x, b.back_y, height),
        DVec3::new(b.middle_x, b.back_y, height),
    ])
}

/// The four U boundaries of the three quads, left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Full360Offsets {
    pub start: f64,
    pub second: f64,
    pub third: f64,
    pub end: f64,
}

impl Full360Offsets {
    pub fn as_array(&self) -> [f64; 4] {
        [self.start, self.second, self.third, self.end]
    }
}

/// Image shift in `(0, 1]` for a rotation in degrees.
pub fn rotation_shift(rotation: f64) -> f64 {
    let wrapped = rotation.rem_euclid(360.0) - 360.0;
    -wrapped / 360.0
}

/// U boundaries that keep north on +Y, south on -Y, east on +X and west on -X.
///
/// With the panels ending exactly on the axes a quarter of the image is shown,
/// a third of it per panel. Panels that overshoot the axes show more of the
/// image, panels that fall short show less. Panels falling short by a third of
/// `length` or more leave no room for the right panel and are rejected.
pub fn full360_offsets(b: &BoundingGeometry, length: f64, rotation: f64) -> Result<Full360Offsets> {
    let single_plane_length = length / 3.0;

    let (start_offset, second_offset, third_offset, end_offset) = if b.right_x > 0.0 {
        // 去掉两端超出坐标轴的部分后，四分之一图像对应的长度
        let quarter_length = length - b.right_x * 2.0;
        let overshoot_ratio = b.right_x / quarter_length;

        // 中间面位于侧面与坐标轴之间的那一段
        let short_plane_length = -b.middle_x;

        let middle_plane_ratio = single_plane_length / quarter_length * DISPLAY_AMOUNT;
        let short_plane_ratio = short_plane_length / quarter_length * DISPLAY_AMOUNT;
        let overshoot_amount = overshoot_ratio * DISPLAY_AMOUNT;

        let second = overshoot_amount + short_plane_ratio;
        (DISPLAY_AMOUNT + overshoot_amount, second, middle_plane_ratio, second)
    } else if b.right_x < 0.0 {
        let quarter_length = length - b.right_x * 2.0;

        let real_display_amount = DISPLAY_AMOUNT * length / quarter_length;
        let real_thirds = real_display_amount / 3.0;
        let missing_ratio = (DISPLAY_AMOUNT - real_display_amount) / 2.0;

        // |right_x| >= length / 3 时 real_thirds <= missing_ratio，右侧面 UV 会反转
        if -b.right_x * 3.0 >= length {
            return Err(EnvironmentError::PanelsTooShort {
                shortfall: -b.right_x,
                length,
            });
        }

        (
            missing_ratio + real_display_amount,
            real_thirds,
            real_thirds,
            real_thirds - missing_ratio,
        )
    } else {
        let thirds = DISPLAY_AMOUNT / 3.0;
        (DISPLAY_AMOUNT, thirds, thirds, thirds)
    };

    let start = -start_offset - rotation_shift(rotation);
    let second = start + second_offset;
    let third = second + third_offset;
    let end = third + end_offset;

    Ok(Full360Offsets { start, second, third, end })
}

fn quad_strip_uvs(u: [f64; 4]) -> Vec<DVec2> {
    let mut uvs = Vec::with_capacity(12);
    for pair in u.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        uvs.extend_from_slice(&[
            DVec2::new(a, 0.0),
            DVec2::new(b, 0.0),
            DVec2::new(b, 1.0),
            DVec2::new(a, 1.0),
        ]);
    }
    uvs
}

pub fn thirds_texture_coordinates() -> Vec<DVec2> {
    quad_strip_uvs([0.0, ONE_THIRD, TWO_THIRDS, 1.0])
}

pub fn full360_texture_coordinates(radius: f64, length: f64, rotation: f64) -> Result<Vec<DVec2>> {
    let b = calculate_coordinate_bounds(radius, length)?;
    Ok(quad_strip_uvs(full360_offsets(&b, length, rotation)?.as_array()))
}

pub fn panorama_texture_coordinates(
    mode: PanoramaMode,
    radius: f64,
    length: f64,
    rotation: f64,
) -> Result<Vec<DVec2>> {
    match mode {
        PanoramaMode::Thirds => Ok(thirds_texture_coordinates()),
        PanoramaMode::Full360 => full360_texture_coordinates(radius, length, rotation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u_boundaries(uvs: &[DVec2]) -> [f64; 4] {
        [uvs[0].x, uvs[4].x, uvs[8].x, uvs[9].x]
    }

    fn assert_increasing(o: &Full360Offsets) {
        assert!(o.start < o.second, "{o:?}");
        assert!(o.second < o.third, "{o:?}");
        assert!(o.third < o.end, "{o:?}");
    }

    #[test]
    fn test_panels_share_edges() {
        let p = panorama_coordinates(50000.0, 150000.0, 50000.0).unwrap();
        assert_eq!(p.len(), 12);

        // 左/中接缝
        assert_eq!(p[1], p[4]);
        assert_eq!(p[2], p[7]);
        // 中/后接缝
        assert_eq!(p[5], p[8]);
        assert_eq!(p[6], p[11]);

        assert_eq!(p[0].z, 0.0);
        assert_eq!(p[3].z, 50000.0);
    }

    #[test]
    fn test_thirds_boundaries_ignore_geometry() {
        for &(radius, length, rotation) in &[(50000.0, 150000.0, 0.0), (30000.0, 45000.0, 123.0)] {
            let uvs = panorama_texture_coordinates(PanoramaMode::Thirds, radius, length, rotation)
                .unwrap();
            assert_eq!(u_boundaries(&uvs), [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
            assert!(uvs.iter().all(|uv| uv.y == 0.0 || uv.y == 1.0));
        }
    }

    #[test]
    fn test_rotation_shift_range() {
        assert_eq!(rotation_shift(0.0), 1.0);
        assert_eq!(rotation_shift(90.0), 0.75);
        assert_eq!(rotation_shift(-90.0), 0.25);
        assert_eq!(rotation_shift(360.0), rotation_shift(0.0));
        assert_eq!(rotation_shift(450.0), rotation_shift(90.0));
    }

    #[test]
    fn test_full360_overshooting_panels() {
        let b = calculate_coordinate_bounds(50000.0, 150000.0).unwrap();
        assert!(b.right_x > 0.0);

        for rotation in [0.0, 45.0, 180.0, -270.0, 359.0] {
            assert_increasing(&full360_offsets(&b, 150000.0, rotation).unwrap());
        }
    }

    #[test]
    fn test_full360_short_panels() {
        let b = calculate_coordinate_bounds(30000.0, 45000.0).unwrap();
        assert!(b.right_x < 0.0);

        let o = full360_offsets(&b, 45000.0, 0.0).unwrap();
        assert_increasing(&o);
        // 可见部分不足四分之一
        assert!(o.end - o.start < 0.25);
    }

    fn short_panels(right_x: f64) -> BoundingGeometry {
        BoundingGeometry {
            left_x: -20000.0,
            middle_x: -20000.0 - right_x,
            right_x,
            back_y: 20000.0,
            middle_y: 20000.0 + right_x,
            front_y: 10000.0 + right_x,
        }
    }

    #[test]
    fn test_full360_short_panels_near_third_of_length() {
        // |right_x| < length / 3
        for right_x in [-9000.0, -9900.0, -9999.0] {
            let o = full360_offsets(&short_panels(right_x), 30000.0, 0.0).unwrap();
            assert_increasing(&o);
        }

        // |right_x| >= length / 3
        for right_x in [-10000.0, -10001.0, -15000.0] {
            let err = full360_offsets(&short_panels(right_x), 30000.0, 0.0).unwrap_err();
            assert!(matches!(err, EnvironmentError::PanelsTooShort { length, .. } if length == 30000.0));
        }
    }

    #[test]
    fn test_full360_rejects_far_too_short_panels() {
        let b = calculate_coordinate_bounds(50000.0, 30000.0).unwrap();
        assert!(b.right_x < -10000.0);

        assert!(full360_offsets(&b, 30000.0, 0.0).is_err());
        assert!(matches!(
            panorama_texture_coordinates(PanoramaMode::Full360, 50000.0, 30000.0, 0.0),
            Err(EnvironmentError::PanelsTooShort { .. })
        ));
        assert!(panorama_texture_coordinates(PanoramaMode::Thirds, 50000.0, 30000.0, 0.0).is_ok());
    }

    #[test]
    fn test_full360_panels_on_axes() {
        let b = BoundingGeometry {
            left_x: -30000.0,
            middle_x: -10000.0,
            right_x: 0.0,
            back_y: 30000.0,
            middle_y: 10000.0,
            front_y: 0.0,
        };

        let o = full360_offsets(&b, 30000.0, 90.0).unwrap();
        assert_increasing(&o);
        assert!((o.end - o.start - 0.25).abs() < 1e-12);
        assert!((o.start - (-0.25 - 0.75)).abs() < 1e-12);
    }

    #[test]
    fn test_full360_periodic_in_rotation() {
        let b = calculate_coordinate_bounds(50000.0, 150000.0).unwrap();

        for rotation in [0.0, 30.0, 200.0, -75.0] {
            let a = full360_offsets(&b, 150000.0, rotation).unwrap();
            let c = full360_offsets(&b, 150000.0, rotation + 360.0).unwrap();
            assert_eq!(a, c);
        }
    }

    #[test]
    fn test_full360_rejects_degenerate_geometry() {
        let err = full360_texture_coordinates(1000.0, 150000.0, 0.0).unwrap_err();
        assert!(matches!(err, EnvironmentError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_builders_are_idempotent() {
        let a = full360_texture_coordinates(50000.0, 150000.0, 12.5).unwrap();
        let b = full360_texture_coordinates(50000.0, 150000.0, 12.5).unwrap();
        assert_eq!(a, b);

        let a = panorama_coordinates(50000.0, 150000.0, 50000.0).unwrap();
        let b = panorama_coordinates(50000.0, 150000.0, 50000.0).unwrap();
        assert_eq!(a, b);
    }
}
