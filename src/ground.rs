// ground.rs — 地面：单个矩形面

use crate::bounds::calculate_coordinate_bounds;
use crate::error::Result;
use glam::{DVec2, DVec3};

pub const GROUND_FACES: [u32; 1] = [4];

pub fn ground_coordinates(radius: f64, length: f64) -> Result<Vec<DVec3>> {
    let b = calculate_coordinate_bounds(radius, length)?;

    Ok(vec![
        DVec3::new(b.left_x, b.front_y, 0.0),
        DVec3::new(b.right_x, b.front_y, 0.0),
        DVec3::new(b.right_x, b.back_y, 0.0),
        DVec3::new(b.left_x, b.back_y, 0.0),
    ])
}

pub fn ground_texture_coordinates() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ]
}
