//! Construction templates
//!
//! The core never touches meshes or materials directly. A [`ConstructionFactory`]
//! hands out a template per kind and the host turns templates into renderable
//! instances.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::construction::ConstructionKind;

/// Spawnable description of one construction kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionTemplate {
    pub kind: ConstructionKind,
    /// Mesh asset name, resolved by the host
    pub mesh: String,
    /// Default material name
    pub material: String,
    /// Size of the piece in local space (right, up, forward)
    pub extent: Vec3,
    /// Whether the spawned instance takes part in collision
    pub collides: bool,
}

/// Source of construction templates.
pub trait ConstructionFactory {
    fn template(&self, kind: ConstructionKind) -> ConstructionTemplate;
}

/// Template table keyed by kind.
#[derive(Debug, Clone)]
pub struct DefaultFactory {
    templates: HashMap<ConstructionKind, ConstructionTemplate>,
}

impl DefaultFactory {
    /// Templates sized to a lattice cell.
    ///
    /// Walls span one cell wide and tall, floors one cell wide and deep, stairs
    /// fill the whole cell.
    pub fn for_cell(cell: Vec3) -> Self {
        let mut templates = HashMap::new();
        for kind in ConstructionKind::ALL {
            let extent = match kind {
                ConstructionKind::Wall => Vec3::new(cell.x, cell.y, 0.0),
                ConstructionKind::Floor => Vec3::new(cell.x, 0.0, cell.z),
                ConstructionKind::Stairs => cell,
            };
            templates.insert(
                kind,
                ConstructionTemplate {
                    kind,
                    mesh: kind.name().to_lowercase(),
                    material: String::from("default"),
                    extent,
                    collides: true,
                },
            );
        }
        Self { templates }
    }

    /// Replace the template for one kind.
    pub fn set_template(&mut self, template: ConstructionTemplate) {
        self.templates.insert(template.kind, template);
    }
}

impl ConstructionFactory for DefaultFactory {
    fn template(&self, kind: ConstructionKind) -> ConstructionTemplate {
        match self.templates.get(&kind) {
            Some(t) => t.clone(),
            // set_template never removes entries, so this only happens for a
            // factory built without `for_cell`
            None => ConstructionTemplate {
                kind,
                mesh: kind.name().to_lowercase(),
                material: String::from("default"),
                extent: Vec3::ZERO,
                collides: true,
            },
        }
    }
}
