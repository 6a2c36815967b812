//! Shading techniques and their light/material parameters.
//!
//! The samples differ only in shader and uniform values, never in how they
//! move the camera or objects. [`ShadingTechnique`] captures that difference
//! as one tagged value chosen when an entity is spawned; the renderer shares
//! everything else.
//!
//! Lit techniques carry a [`Lighting`] block whose defaults are the values
//! the matching sample uploads.

/// An RGBA color.
pub type Rgba = [f32; 4];

const fn gray(v: f32) -> Rgba {
    [v, v, v, 1.0]
}

/// Where light comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightSource {
    /// Parallel rays travelling along this direction.
    Directional([f32; 3]),
    /// A point light, in model space.
    Positional([f32; 3]),
}

/// Light color terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub source: LightSource,
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
}

impl Light {
    /// White directional light with a faint ambient term.
    pub fn directional(direction: [f32; 3]) -> Self {
        Self {
            source: LightSource::Directional(direction),
            ambient: gray(0.03),
            diffuse: gray(1.0),
            specular: gray(1.0),
        }
    }

    /// White point light with a faint ambient term.
    pub fn positional(position: [f32; 3]) -> Self {
        Self {
            source: LightSource::Positional(position),
            ..Self::directional([0.0; 3])
        }
    }

    pub fn ambient(mut self, ambient: Rgba) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn diffuse(mut self, diffuse: Rgba) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn specular(mut self, specular: Rgba) -> Self {
        self.specular = specular;
        self
    }
}

/// Surface reflectance terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: gray(1.0),
            diffuse: gray(1.0),
            specular: gray(1.0),
            shininess: 10.0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient(mut self, ambient: Rgba) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn diffuse(mut self, diffuse: Rgba) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn specular(mut self, specular: Rgba) -> Self {
        self.specular = specular;
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// A light paired with the material it shines on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub light: Light,
    pub material: Material,
}

impl Lighting {
    pub fn new(light: Light, material: Material) -> Self {
        Self { light, material }
    }

    /// The ambient/Gouraud/Phong sample: a diagonal directional light on a
    /// blue surface.
    pub fn classic() -> Self {
        Self::new(
            Light::directional([-0.25, -0.25, -0.25]),
            Material::new()
                .diffuse([46.0 / 256.0, 99.0 / 256.0, 191.0 / 256.0, 1.0])
                .shininess(10.0),
        )
    }

    /// The toon sample: a dim overhead light, no specular term.
    pub fn toon() -> Self {
        Self::new(
            Light::directional([0.0, 1.0, 1.0])
                .ambient(gray(0.01))
                .diffuse(gray(0.5))
                .specular(gray(0.0)),
            Material::new()
                .diffuse([0.5, 0.8, 0.1, 1.0])
                .specular(gray(0.0))
                .shininess(20.0),
        )
    }

    /// The positional-lighting sample.
    pub fn positional() -> Self {
        Self::new(
            Light::positional([4.5, -3.0, 15.0]),
            Material::new()
                .ambient(gray(0.1))
                .diffuse([0.5, 0.8, 0.1, 1.0])
                .specular(gray(0.6))
                .shininess(200.0),
        )
    }

    /// The normal-map sample: a bright overhead point light.
    pub fn normal_map() -> Self {
        Self::new(
            Light::positional([1.0, 10.0, 1.0])
                .ambient(gray(1.0))
                .specular(gray(0.0)),
            Material::new()
                .ambient(gray(0.1))
                .specular(gray(0.0)),
        )
    }
}

/// How an entity is shaded.
///
/// ```
/// use glcam::ShadingTechnique;
///
/// let phong = ShadingTechnique::phong();
/// assert!(phong.requires_normals());
/// assert!(!phong.requires_texture_coords());
///
/// let normal_map = ShadingTechnique::normal_map();
/// assert!(normal_map.requires_tangents());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingTechnique {
    /// Ambient term only.
    Ambient(Lighting),
    /// Per-vertex diffuse and specular.
    Gouraud(Lighting),
    /// Per-fragment diffuse and specular.
    Phong(Lighting),
    /// Quantized diffuse bands.
    Toon(Lighting),
    /// Phong with a point light.
    PositionalLight(Lighting),
    /// Per-fragment lighting in tangent space.
    NormalMap(Lighting),
    /// Environment lookup into a cube texture.
    Cubemap,
    /// Two blended 2D textures.
    Multitexture,
    /// One 2D texture, unlit.
    Textured,
    /// Textured point sprites.
    PointSprite { point_size: f32 },
}

impl Default for ShadingTechnique {
    fn default() -> Self {
        Self::phong()
    }
}

impl ShadingTechnique {
    pub fn ambient() -> Self {
        Self::Ambient(Lighting::classic())
    }

    pub fn gouraud() -> Self {
        Self::Gouraud(Lighting::classic())
    }

    pub fn phong() -> Self {
        Self::Phong(Lighting::classic())
    }

    pub fn toon() -> Self {
        Self::Toon(Lighting::toon())
    }

    pub fn positional_light() -> Self {
        Self::PositionalLight(Lighting::positional())
    }

    pub fn normal_map() -> Self {
        Self::NormalMap(Lighting::normal_map())
    }

    /// Point sprites at the sample's default size.
    pub fn point_sprite() -> Self {
        Self::PointSprite { point_size: 40.0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShadingTechnique::Ambient(_) => "ambient",
            ShadingTechnique::Gouraud(_) => "gouraud",
            ShadingTechnique::Phong(_) => "phong",
            ShadingTechnique::Toon(_) => "toon",
            ShadingTechnique::PositionalLight(_) => "positional-light",
            ShadingTechnique::NormalMap(_) => "normal-map",
            ShadingTechnique::Cubemap => "cubemap",
            ShadingTechnique::Multitexture => "multitexture",
            ShadingTechnique::Textured => "textured",
            ShadingTechnique::PointSprite { .. } => "point-sprite",
        }
    }

    /// Light and material, for lit techniques.
    pub fn lighting(&self) -> Option<&Lighting> {
        match self {
            ShadingTechnique::Ambient(l)
            | ShadingTechnique::Gouraud(l)
            | ShadingTechnique::Phong(l)
            | ShadingTechnique::Toon(l)
            | ShadingTechnique::PositionalLight(l)
            | ShadingTechnique::NormalMap(l) => Some(l),
            _ => None,
        }
    }

    pub fn lighting_mut(&mut self) -> Option<&mut Lighting> {
        match self {
            ShadingTechnique::Ambient(l)
            | ShadingTechnique::Gouraud(l)
            | ShadingTechnique::Phong(l)
            | ShadingTechnique::Toon(l)
            | ShadingTechnique::PositionalLight(l)
            | ShadingTechnique::NormalMap(l) => Some(l),
            _ => None,
        }
    }

    /// Replaces the material of a lit technique. Unlit techniques are
    /// returned unchanged.
    pub fn with_material(mut self, material: Material) -> Self {
        if let Some(lighting) = self.lighting_mut() {
            lighting.material = material;
        }
        self
    }

    /// Replaces the light of a lit technique. Unlit techniques are returned
    /// unchanged.
    pub fn with_light(mut self, light: Light) -> Self {
        if let Some(lighting) = self.lighting_mut() {
            lighting.light = light;
        }
        self
    }

    pub fn is_lit(&self) -> bool {
        self.lighting().is_some()
    }

    /// Lit techniques and the cubemap's reflection vector read normals.
    pub fn requires_normals(&self) -> bool {
        self.is_lit() || matches!(self, ShadingTechnique::Cubemap)
    }

    pub fn requires_texture_coords(&self) -> bool {
        matches!(
            self,
            ShadingTechnique::NormalMap(_)
                | ShadingTechnique::Cubemap
                | ShadingTechnique::Multitexture
                | ShadingTechnique::Textured
        )
    }

    pub fn requires_tangents(&self) -> bool {
        matches!(self, ShadingTechnique::NormalMap(_))
    }

    /// True for techniques drawn as `GL_POINTS` instead of indexed triangles.
    pub fn is_point_sprite(&self) -> bool {
        matches!(self, ShadingTechnique::PointSprite { .. })
    }
}
