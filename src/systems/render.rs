//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Meshes and textures shared between bodies
//! - Frame rendering

use std::collections::HashMap;
use std::sync::Arc;
use winit::window::Window;
use sol3d_core::{Mesh, MeshSource, OrbitalSystem};
use sol3d_math::mat4;
use sol3d_render::{
    context::{RenderContext, RenderContextError},
    pipeline::{DrawCall, ObjectBinding, ObjectUniforms, TexturedPipeline},
    shader, Camera, GpuMesh, Texture,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Render error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    #[error("Surface lost")]
    SurfaceLost,
    /// GPU out of memory
    #[error("Out of memory")]
    OutOfMemory,
    /// Other surface error
    #[error("Render error: {0}")]
    Other(String),
}

/// Which shared mesh and texture each body draws with
///
/// Bodies with equal mesh sources share one mesh, and bodies with the same
/// texture path share one texture. `None` stands for the plain white texture.
#[derive(Debug, Default, PartialEq)]
pub struct ResourcePlan {
    pub meshes: Vec<MeshSource>,
    pub textures: Vec<Option<String>>,
    /// (mesh index, texture index) per body, in draw order
    pub bodies: Vec<(usize, usize)>,
}

impl ResourcePlan {
    pub fn for_system(system: &OrbitalSystem) -> Self {
        let mut plan = Self::default();
        let mut mesh_keys: HashMap<String, usize> = HashMap::new();
        let mut texture_keys: HashMap<Option<String>, usize> = HashMap::new();

        for body in system.iter() {
            let mesh = *mesh_keys.entry(body.mesh.cache_key()).or_insert_with(|| {
                plan.meshes.push(body.mesh.clone());
                plan.meshes.len() - 1
            });
            let texture = *texture_keys.entry(body.texture.clone()).or_insert_with(|| {
                plan.textures.push(body.texture.clone());
                plan.textures.len() - 1
            });
            plan.bodies.push((mesh, texture));
        }

        plan
    }
}

/// GPU resources for one body
struct BodyDraw {
    mesh: usize,
    texture: usize,
    object: ObjectBinding,
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: TexturedPipeline,
    meshes: Vec<GpuMesh>,
    textures: Vec<Texture>,
    texture_bind_groups: Vec<wgpu::BindGroup>,
    bodies: Vec<BodyDraw>,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let shader_source = shader::textured_source(render_config.shader_path.as_deref())
            .unwrap_or_else(|e| {
                log::warn!("{}. Using built-in shader.", e);
                shader::TEXTURED_WGSL.into()
            });

        let pipeline = TexturedPipeline::new(
            &context.device,
            context.config.format,
            &shader_source,
            render_config.cull_back_faces,
            (context.config.width, context.config.height),
        );

        log::info!("Setup complete!");

        Ok(Self {
            context,
            pipeline,
            meshes: Vec::new(),
            textures: Vec::new(),
            texture_bind_groups: Vec::new(),
            bodies: Vec::new(),
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline
            .ensure_depth_texture(&self.context.device, self.context.config.width, self.context.config.height);
    }

    /// Upload meshes and textures for every body of the system
    ///
    /// Replaces anything uploaded before.
    pub fn upload_system(&mut self, system: &OrbitalSystem) {
        let plan = ResourcePlan::for_system(system);
        let device = &self.context.device;

        self.meshes = plan
            .meshes
            .iter()
            .map(|source| {
                let mesh = source.build().unwrap_or_else(|e| {
                    log::warn!("Failed to build mesh {:?}: {}. Using a unit cube.", source, e);
                    Mesh::cube(1.0)
                });
                GpuMesh::new(device, &mesh, &source.cache_key())
            })
            .collect();

        self.textures = plan
            .textures
            .iter()
            .map(|path| match path {
                Some(path) => Texture::from_path(device, &self.context.queue, path).unwrap_or_else(|e| {
                    log::warn!("{}. Using a plain texture.", e);
                    Texture::solid(device, &self.context.queue, [255, 255, 255, 255])
                }),
                None => Texture::solid(device, &self.context.queue, [255, 255, 255, 255]),
            })
            .collect();

        self.texture_bind_groups = self
            .textures
            .iter()
            .map(|texture| self.pipeline.create_texture_bind_group(device, texture))
            .collect();

        self.bodies = system
            .iter()
            .zip(&plan.bodies)
            .map(|(body, &(mesh, texture))| BodyDraw {
                mesh,
                texture,
                object: self.pipeline.create_object_binding(device, &body.name),
            })
            .collect();

        log::info!(
            "Uploaded {} bodies ({} meshes, {} textures)",
            self.bodies.len(),
            self.meshes.len(),
            self.textures.len()
        );
    }

    /// Render a single frame
    pub fn render_frame(&mut self, system: &OrbitalSystem, camera: &Camera) -> Result<(), RenderError> {
        let view = camera.view_matrix();
        let projection = mat4::perspective(
            self.camera_config.fov.to_radians(),
            self.context.aspect_ratio(),
            self.camera_config.near,
            self.camera_config.far,
        );

        for (body, draw) in system.iter().zip(&self.bodies) {
            let uniforms = ObjectUniforms::new(body.model_matrix(), view, projection, body.color);
            self.pipeline.update_object(&self.context.queue, &draw.object, &uniforms);
        }

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let draws: Vec<DrawCall<'_>> = self
            .bodies
            .iter()
            .map(|draw| DrawCall {
                mesh: &self.meshes[draw.mesh],
                object: &draw.object,
                texture: &self.texture_bind_groups[draw.texture],
            })
            .collect();

        self.pipeline.render(
            &mut encoder,
            &target,
            clear_color(self.render_config.background_color),
            &draws,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl Drop for RenderSystem {
    fn drop(&mut self) {
        log::debug!(
            "Releasing {} meshes, {} textures and {} object buffers",
            self.meshes.len(),
            self.textures.len(),
            self.bodies.len()
        );
    }
}

/// Convert an RGBA config color to a wgpu clear color
pub fn clear_color(bg: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: bg[0] as f64,
        g: bg[1] as f64,
        b: bg[2] as f64,
        a: bg[3] as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol3d_core::{BodyTemplate, OrbitTemplate, Scene};

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_clear_color() {
        let c = clear_color([0.0, 0.5, 1.0, 1.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn test_resource_plan_shares_meshes_and_textures() {
        let scene = Scene::new("plan")
            .with_body(BodyTemplate::new("Sun", MeshSource::default_sphere()).with_texture("sun.jpg"))
            .with_body(
                BodyTemplate::new("Earth", MeshSource::default_sphere())
                    .with_texture("earth.png")
                    .with_orbit(OrbitTemplate::new("Sun", 5.0, 0.02)),
            )
            .with_body(
                BodyTemplate::new("Moon", MeshSource::default_sphere())
                    .with_orbit(OrbitTemplate::new("Earth", 1.0, 0.05)),
            )
            .with_body(BodyTemplate::new("Box", MeshSource::Cube { size: 1.0 }).with_texture("sun.jpg"));
        let system = OrbitalSystem::from_scene(&scene).unwrap();

        let plan = ResourcePlan::for_system(&system);
        assert_eq!(plan.meshes, vec![MeshSource::default_sphere(), MeshSource::Cube { size: 1.0 }]);
        assert_eq!(
            plan.textures,
            vec![Some("sun.jpg".to_string()), Some("earth.png".to_string()), None]
        );
        assert_eq!(plan.bodies, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_resource_plan_empty_system() {
        let plan = ResourcePlan::for_system(&OrbitalSystem::new());
        assert_eq!(plan, ResourcePlan::default());
    }
}
