//! Flat-colour materials shared by scene meshes

/// Handle to a material in a [`MaterialLibrary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Unlit colour material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// 0xRRGGBB colour
    pub color: u32,
    pub wireframe: bool,
}

impl Material {
    pub fn solid(color: u32) -> Self {
        Self { color, wireframe: false }
    }

    /// Colour as linear-ish RGB floats in `[0, 1]`.
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xff) as f32 / 255.0,
            ((self.color >> 8) & 0xff) as f32 / 255.0,
            (self.color & 0xff) as f32 / 255.0,
        ]
    }
}

/// Every material created for a scene. Registration order is preserved.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its handle.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Flip the wireframe flag of every registered material.
    pub fn toggle_wireframe(&mut self) {
        for material in &mut self.materials {
            material.wireframe = !material.wireframe;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
