use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wrapworld_kernel::{Biome, EntityKind};

/// Opaque reference to an image owned by the presentation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteHandle(pub u64);

/// Lookup of loaded images. A missing entry means "draw the fallback".
pub trait SpriteSource {
    fn entity_sprite(&self, kind: EntityKind) -> Option<SpriteHandle>;
    fn background(&self, biome: Biome) -> Option<SpriteHandle>;
}

/// No images loaded; everything uses fallback shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn entity_sprite(&self, _kind: EntityKind) -> Option<SpriteHandle> {
        None
    }

    fn background(&self, _biome: Biome) -> Option<SpriteHandle> {
        None
    }
}

/// Sprites registered by the backend as it finishes loading them.
#[derive(Debug, Clone, Default)]
pub struct SpriteTable {
    entities: BTreeMap<EntityKind, SpriteHandle>,
    backgrounds: BTreeMap<Biome, SpriteHandle>,
}

impl SpriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_entity(&mut self, kind: EntityKind, handle: SpriteHandle) -> &mut Self {
        self.entities.insert(kind, handle);
        self
    }

    pub fn insert_background(&mut self, biome: Biome, handle: SpriteHandle) -> &mut Self {
        self.backgrounds.insert(biome, handle);
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len() + self.backgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpriteSource for SpriteTable {
    fn entity_sprite(&self, kind: EntityKind) -> Option<SpriteHandle> {
        self.entities.get(&kind).copied()
    }

    fn background(&self, biome: Biome) -> Option<SpriteHandle> {
        self.backgrounds.get(&biome).copied()
    }
}
