// environment.rs — 环境对象：三个网格槽位 + 参数变更后的选择性重建
//
// 每次重建先完整计算所有受影响的缓冲，全部成功后才写回；出错时保持原状。

use crate::error::Result;
use crate::ground::{ground_coordinates, ground_texture_coordinates, GROUND_FACES};
use crate::mesh::Mesh;
use crate::panorama::{panorama_coordinates, panorama_texture_coordinates, PANORAMA_FACES};
use crate::params::{validate, Parameter, ParameterStore, TextureSlot};
use crate::sky::{build_sky, SKY_FACES};
use crate::transform::EnvironmentTransform;
use glam::{DVec2, DVec3};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Builders that must rerun after a parameter change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rebuild {
    pub panorama_coordinates: bool,
    pub panorama_texture_coordinates: bool,
    /// Sky positions and UVs together.
    pub sky: bool,
    pub ground: bool,
    pub transform: bool,
    /// Swap the slot's texture reference and recompute its visibility.
    pub texture: Option<TextureSlot>,
}

impl Rebuild {
    pub const FULL: Rebuild = Rebuild {
        panorama_coordinates: true,
        panorama_texture_coordinates: true,
        sky: true,
        ground: true,
        transform: true,
        texture: None,
    };

    pub fn for_parameter(changed: Parameter) -> Self {
        match changed {
            Parameter::Radius | Parameter::Length | Parameter::Height => Rebuild {
                panorama_coordinates: true,
                panorama_texture_coordinates: true,
                sky: true,
                ground: true,
                ..Default::default()
            },
            Parameter::SkyOverlap => Rebuild {
                sky: true,
                ..Default::default()
            },
            Parameter::PanoramaMode => Rebuild {
                panorama_texture_coordinates: true,
                ..Default::default()
            },
            // Thirds 模式的 UV 与旋转无关，照样重建（幂等）
            Parameter::Rotation | Parameter::ZOffset => Rebuild {
                transform: true,
                panorama_texture_coordinates: true,
                ..Default::default()
            },
            Parameter::Texture(slot) => Rebuild {
                texture: Some(slot),
                ..Default::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Rebuild::default()
    }

    fn touches_geometry(&self) -> bool {
        self.panorama_coordinates || self.panorama_texture_coordinates || self.sky || self.ground
    }
}

/// One textured mesh with the texture it currently shows.
#[derive(Debug, Clone, Serialize)]
pub struct MeshSlot {
    mesh: Mesh,
    texture: Option<PathBuf>,
    visible: bool,
}

impl MeshSlot {
    fn new(faces: &[u32]) -> Self {
        Self {
            mesh: Mesh::with_faces(faces),
            texture: None,
            visible: false,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<&Path> {
        self.texture.as_deref()
    }

    /// Hidden meshes are detached from rendering entirely.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_texture(&mut self, texture: Option<&Path>) {
        self.texture = texture.map(Path::to_path_buf);
        self.visible = self.texture.is_some();
    }
}

#[derive(Default)]
struct Staged {
    panorama_positions: Option<Vec<DVec3>>,
    panorama_uvs: Option<Vec<DVec2>>,
    sky: Option<(Vec<DVec3>, Vec<DVec2>)>,
    ground_positions: Option<Vec<DVec3>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    panorama: MeshSlot,
    sky: MeshSlot,
    ground: MeshSlot,
    transform: EnvironmentTransform,
}

impl Environment {
    /// Build every mesh, the transform and the visibility flags from the current parameters.
    pub fn new<S: ParameterStore + ?Sized>(store: &S) -> Result<Self> {
        let mut env = Self {
            panorama: MeshSlot::new(&PANORAMA_FACES),
            sky: MeshSlot::new(&SKY_FACES),
            ground: MeshSlot::new(&GROUND_FACES),
            transform: EnvironmentTransform::default(),
        };
        env.ground.mesh.replace_uvs(ground_texture_coordinates());

        env.apply(store, Rebuild::FULL)?;
        for slot in TextureSlot::ALL {
            env.slot_mut(slot).set_texture(store.texture(slot));
        }

        log::debug!(
            "environment built: panorama {}, sky {}, ground {}",
            env.panorama.visible,
            env.sky.visible,
            env.ground.visible
        );
        Ok(env)
    }

    pub fn panorama(&self) -> &MeshSlot {
        &self.panorama
    }

    pub fn sky(&self) -> &MeshSlot {
        &self.sky
    }

    pub fn ground(&self) -> &MeshSlot {
        &self.ground
    }

    pub fn slot(&self, slot: TextureSlot) -> &MeshSlot {
        match slot {
            TextureSlot::Panorama => &self.panorama,
            TextureSlot::Sky => &self.sky,
            TextureSlot::Ground => &self.ground,
        }
    }

    fn slot_mut(&mut self, slot: TextureSlot) -> &mut MeshSlot {
        match slot {
            TextureSlot::Panorama => &mut self.panorama,
            TextureSlot::Sky => &mut self.sky,
            TextureSlot::Ground => &mut self.ground,
        }
    }

    pub fn transform(&self) -> &EnvironmentTransform {
        &self.transform
    }

    /// Rerun the builders affected by `changed`. Returns the plan that was applied.
    pub fn on_parameter_changed<S: ParameterStore + ?Sized>(
        &mut self,
        store: &S,
        changed: Parameter,
    ) -> Result<Rebuild> {
        let plan = Rebuild::for_parameter(changed);
        log::debug!("{} changed: {:?}", changed.name(), plan);

        self.apply(store, plan)?;
        Ok(plan)
    }

    /// Like [`Environment::on_parameter_changed`], keyed by property name.
    /// Names outside the routing table rebuild nothing.
    pub fn on_property_changed<S: ParameterStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
    ) -> Result<Rebuild> {
        match name.parse::<Parameter>() {
            Ok(changed) => self.on_parameter_changed(store, changed),
            Err(e) => {
                log::trace!("{e}, nothing to rebuild");
                Ok(Rebuild::default())
            }
        }
    }

    pub fn apply<S: ParameterStore + ?Sized>(&mut self, store: &S, plan: Rebuild) -> Result<()> {
        if plan.touches_geometry() {
            validate(store)?;
        }

        let radius = store.radius();
        let length = store.length();
        let height = store.height();

        let mut staged = Staged::default();
        if plan.panorama_coordinates {
            staged.panorama_positions = Some(panorama_coordinates(radius, length, height)?);
        }
        if plan.panorama_texture_coordinates {
            staged.panorama_uvs = Some(panorama_texture_coordinates(
                store.panorama_mode(),
                radius,
                length,
                store.rotation(),
            )?);
        }
        if plan.sky {
            staged.sky = Some(build_sky(radius, length, height, store.sky_overlap())?);
        }
        if plan.ground {
            staged.ground_positions = Some(ground_coordinates(radius, length)?);
        }

        // 全部计算成功，写回
        if let Some(positions) = staged.panorama_positions {
            self.panorama.mesh.replace_positions(positions);
        }
        if let Some(uvs) = staged.panorama_uvs {
            self.panorama.mesh.replace_uvs(uvs);
        }
        if let Some((positions, uvs)) = staged.sky {
            self.sky.mesh.replace_positions(positions);
            self.sky.mesh.replace_uvs(uvs);
        }
        if let Some(positions) = staged.ground_positions {
            self.ground.mesh.replace_positions(positions);
        }
        if plan.transform {
            self.transform = EnvironmentTransform::new(store.rotation(), store.z_offset());
        }
        if let Some(slot) = plan.texture {
            let texture = store.texture(slot);
            if texture.is_none() {
                log::warn!("{slot:?} texture unset, detaching mesh");
            }
            self.slot_mut(slot).set_texture(texture);
        }

        Ok(())
    }
}
