// sky.rs — 天空穹顶：三面侧墙 + 三面顶盖，UV 与全景顶边重叠

use crate::bounds::calculate_coordinate_bounds;
use crate::error::Result;
use glam::{DVec2, DVec3};

/// Three wall quads, then the left cap quad, the middle cap triangle and the back cap quad.
pub const SKY_FACES: [u32; 6] = [4, 4, 4, 4, 3, 4];

/// The sky sits this far behind the panorama.
pub const SKY_OFFSET: f64 = 1000.0;

/// Slope of the cap faces.
const CAP_ANGLE_DEG: f64 = 45.0;

const ONE_THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 * ONE_THIRD;

/// Output of the 3D step, consumed by [`sky_texture_coordinates`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkyGeometry {
    pub positions: Vec<DVec3>,
    /// Overlap band plus the slanted cap length, measured along the sky surface.
    pub full_sky_length: f64,
}

pub fn sky_coordinates(radius: f64, length: f64, height: f64, sky_overlap: f64) -> Result<SkyGeometry> {
    let b = calculate_coordinate_bounds(radius + SKY_OFFSET, length + SKY_OFFSET)?;

    let alpha = CAP_ANGLE_DEG.to_radians();
    let a = b.left_x.abs();
    let cap_length = a / alpha.sin();
    let top_z = height + a / alpha.tan();

    let bottom = height - sky_overlap;
    let apex = DVec3::new(0.0, 0.0, top_z);

    let positions = vec![
        // 左侧墙
        DVec3::new(b.left_x, b.front_y, bottom),
        DVec3::new(b.left_x, b.middle_y, bottom),
        DVec3::new(b.left_x, b.middle_y, height),
        DVec3::new(b.left_x, b.front_y, height),
        // 中间墙
        DVec3::new(b.left_x, b.middle_y, bottom),
        DVec3::new(b.middle_x, b.back_y, bottom),
        DVec3::new(b.middle_x, b.back_y, height),
        DVec3::new(b.left_x, b.middle_y, height),
        // 后侧墙
        DVec3::new(b.middle_x, b.back_y, bottom),
        DVec3::new(b.right_x, b.back_y, bottom),
        DVec3::new(b.right_x, b.back_y, height),
        DVec3::new(b.middle_x, b.back_y, height),
        // 左顶盖
        DVec3::new(b.left_x, b.front_y, height),
        DVec3::new(b.left_x, b.middle_y, height),
        apex,
        DVec3::new(0.0, b.front_y, top_z),
        // 中顶盖（三角形）
        DVec3::new(b.left_x, b.middle_y, height),
        DVec3::new(b.middle_x, b.back_y, height),
        apex,
        // 后顶盖
        DVec3::new(b.middle_x, b.back_y, height),
        DVec3::new(b.right_x, b.back_y, height),
        DVec3::new(b.right_x, 0.0, top_z),
        apex,
    ];

    Ok(SkyGeometry {
        positions,
        full_sky_length: sky_overlap + cap_length,
    })
}

/// Share of the sky texture's height covered by the overlap band.
pub fn sky_overlap_ratio(sky_overlap: f64, full_sky_length: f64) -> f64 {
    if sky_overlap == 0.0 {
        return 0.0;
    }
    sky_overlap / full_sky_length
}

pub fn sky_texture_coordinates(geometry: &SkyGeometry, sky_overlap: f64) -> Vec<DVec2> {
    let r = sky_overlap_ratio(sky_overlap, geometry.full_sky_length);
    let peak = DVec2::new(0.5, 1.0);

    vec![
        // 左侧墙
        DVec2::new(0.0, 0.0),
        DVec2::new(ONE_THIRD, 0.0),
        DVec2::new(ONE_THIRD, r),
        DVec2::new(0.0, r),
        // 中间墙
        DVec2::new(ONE_THIRD, 0.0),
        DVec2::new(TWO_THIRDS, 0.0),
        DVec2::new(TWO_THIRDS, r),
        DVec2::new(ONE_THIRD, r),
        // 后侧墙
        DVec2::new(TWO_THIRDS, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, r),
        DVec2::new(TWO_THIRDS, r),
        // 左顶盖
        DVec2::new(0.0, r),
        DVec2::new(ONE_THIRD, r),
        peak,
        DVec2::new(0.0, 1.0),
        // 中顶盖（三角形）
        DVec2::new(ONE_THIRD, r),
        DVec2::new(TWO_THIRDS, r),
        peak,
        // 后顶盖
        DVec2::new(TWO_THIRDS, r),
        DVec2::new(1.0, r),
        DVec2::new(1.0, 1.0),
        peak,
    ]
}

/// Both sky buffers, positions first.
pub fn build_sky(
    radius: f64,
    length: f64,
    height: f64,
    sky_overlap: f64,
) -> Result<(Vec<DVec3>, Vec<DVec2>)> {
    let geometry = sky_coordinates(radius, length, height, sky_overlap)?;
    let uvs = sky_texture_coordinates(&geometry, sky_overlap);
    Ok((geometry.positions, uvs))
}
