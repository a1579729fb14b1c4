use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use wrapworld_common::{ChunkCoord, WorldConfig};
use wrapworld_kernel::{Biome, Chunk, Entity, EntityKind, Player};

use crate::camera::Camera;
use crate::culling::{VisibleRegion, WorldRect};
use crate::highlight::HighlightCell;
use crate::sprites::{SpriteHandle, SpriteSource};

/// Everything a renderer may read for one frame. Borrowed, never owned:
/// renderers cannot mutate world truth.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// View camera, focus already wrapped into the world.
    pub camera: &'a Camera,
    pub player: &'a Player,
    pub region: Option<&'a VisibleRegion>,
    /// Chunks covering `region`, in canonical order.
    pub chunks: &'a [Arc<Chunk>],
    pub config: &'a WorldConfig,
    pub highlight: Option<HighlightCell>,
    pub grid_visible: bool,
    pub debug: bool,
}

impl Frame<'_> {
    pub fn view_transform(&self) -> DAffine2 {
        self.camera.view_transform(self.player.angle)
    }

    /// Player heading as drawn on screen.
    pub fn screen_heading(&self) -> f64 {
        self.camera
            .mode()
            .screen_heading(self.camera.rotation(), self.player.angle)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &Frame<'_>) -> Self::Output;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLUE: Color = Color([0, 0, 255, 255]);
    pub const YELLOW: Color = Color([255, 255, 0, 255]);
    pub const GRID: Color = Color([211, 211, 211, 255]);
    pub const SKY_BLUE: Color = Color([135, 206, 235, 255]);
    pub const SAND: Color = Color([237, 201, 175, 255]);
    pub const TRUNK: Color = Color([139, 69, 19, 255]);
    pub const LEAVES: Color = Color([34, 139, 34, 255]);
    pub const ROCK: Color = Color([128, 128, 128, 255]);
    pub const GRASS: Color = Color([124, 252, 0, 255]);
}

/// One backend-neutral drawing primitive.
///
/// Commands between `PushTransform` and `PopTransform` are in world pixels;
/// the rest are in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    PushTransform(DAffine2),
    PopTransform,
    FillRect { rect: WorldRect, color: Color },
    StrokeRect { rect: WorldRect, color: Color, width: f64 },
    FillCircle { center: DVec2, radius: f64, color: Color },
    Line { from: DVec2, to: DVec2, color: Color, width: f64 },
    Sprite { sprite: SpriteHandle, rect: WorldRect },
}

/// Shapes drawn for entities without a loaded sprite.
pub fn fallback_shape(entity: &Entity) -> Vec<DrawCommand> {
    let p = entity.position;
    match entity.kind {
        EntityKind::Tree => vec![
            DrawCommand::FillRect {
                rect: WorldRect::from_origin_size(p - DVec2::new(4.0, 8.0), DVec2::new(8.0, 16.0)),
                color: Color::TRUNK,
            },
            DrawCommand::FillCircle {
                center: p,
                radius: 12.0,
                color: Color::LEAVES,
            },
        ],
        EntityKind::Rock => vec![DrawCommand::FillCircle {
            center: p,
            radius: 8.0,
            color: Color::ROCK,
        }],
        EntityKind::Grass => vec![DrawCommand::FillCircle {
            center: p,
            radius: 4.0,
            color: Color::GRASS,
        }],
    }
}

fn biome_fallback(biome: Biome) -> Color {
    match biome {
        Biome::Plains => Color::SKY_BLUE,
        Biome::Desert => Color::SAND,
    }
}

/// Produces a flat list of [`DrawCommand`]s for a presentation backend.
#[derive(Debug, Clone, Default)]
pub struct DrawListRenderer<S> {
    sprites: S,
}

impl<S: SpriteSource> DrawListRenderer<S> {
    pub fn new(sprites: S) -> Self {
        Self { sprites }
    }

    pub fn sprites(&self) -> &S {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut S {
        &mut self.sprites
    }

    fn draw_world(&self, frame: &Frame<'_>, region: &VisibleRegion, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::FillRect {
            rect: region.candidate,
            color: Color::BLACK,
        });

        let chunk_px = frame.config.chunk_pixel_size();
        for origin in region.background_tiles() {
            let coord = ChunkCoord::new(
                (origin.x / chunk_px).floor() as i32,
                (origin.y / chunk_px).floor() as i32,
            );
            let biome = Biome::for_chunk(coord, frame.config);
            let tile = WorldRect::from_origin_size(origin, DVec2::splat(chunk_px));
            out.push(match self.sprites.background(biome) {
                Some(sprite) => DrawCommand::Sprite { sprite, rect: tile },
                None => DrawCommand::FillRect {
                    rect: tile.intersect(&region.bounds),
                    color: biome_fallback(biome),
                },
            });
        }

        if frame.grid_visible {
            out.extend(region.grid_lines().into_iter().map(|(from, to)| DrawCommand::Line {
                from,
                to,
                color: Color::GRID,
                width: 1.0,
            }));
        }
    }

    fn draw_entities(&self, frame: &Frame<'_>, out: &mut Vec<DrawCommand>) {
        for entity in frame.chunks.iter().flat_map(|c| c.entities()) {
            match self.sprites.entity_sprite(entity.kind) {
                Some(sprite) => {
                    let half = DVec2::splat(entity.size / 2.0);
                    out.push(DrawCommand::Sprite {
                        sprite,
                        rect: WorldRect::new(entity.position - half, entity.position + half),
                    });
                }
                None => out.extend(fallback_shape(entity)),
            }
        }
    }

    fn draw_player(&self, frame: &Frame<'_>, out: &mut Vec<DrawCommand>) {
        let center = frame.camera.viewport() / 2.0;
        let size = frame.player.size() * frame.camera.zoom();
        out.push(DrawCommand::FillCircle {
            center,
            radius: size / 2.0,
            color: Color::BLUE,
        });
        let heading = frame.screen_heading();
        out.push(DrawCommand::Line {
            from: center,
            to: center + DVec2::new(heading.sin(), -heading.cos()) * size,
            color: Color::WHITE,
            width: 2.0,
        });
    }
}

impl<S: SpriteSource> Renderer for DrawListRenderer<S> {
    type Output = Vec<DrawCommand>;

    fn render(&self, frame: &Frame<'_>) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        out.push(DrawCommand::PushTransform(frame.view_transform()));

        if let Some(region) = frame.region {
            self.draw_world(frame, region, &mut out);
        }
        self.draw_entities(frame, &mut out);

        if let Some(cell) = frame.highlight {
            out.push(DrawCommand::StrokeRect {
                rect: cell.rect,
                color: Color::YELLOW,
                width: 2.0,
            });
        }

        out.push(DrawCommand::PopTransform);
        self.draw_player(frame, &mut out);

        tracing::trace!(commands = out.len(), "draw list built");
        out
    }
}

/// Human-readable frame summary for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame<'_>) -> String {
        let mut out = String::new();
        let camera = frame.camera;
        let player = frame.player;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (seed={}, mode={}) ===",
            frame.config.seed(),
            camera.mode().label()
        );
        let _ = writeln!(
            out,
            "Player: pos=({:.2}, {:.2}) angle={:.3} interacting={}",
            player.position.x,
            player.position.y,
            player.angle,
            player.is_interacting()
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}) zoom={:.3} rotation={:.3}",
            camera.position().x,
            camera.position().y,
            camera.zoom(),
            camera.rotation()
        );
        match frame.region {
            Some(region) => {
                let _ = writeln!(
                    out,
                    "Visible chunks: ({}, {})..=({}, {}) [{}]",
                    region.chunks.min.x,
                    region.chunks.min.y,
                    region.chunks.max.x,
                    region.chunks.max.y,
                    region.chunks.len()
                );
            }
            None => {
                let _ = writeln!(out, "Visible chunks: none");
            }
        }

        let entities: usize = frame.chunks.iter().map(|c| c.len()).sum();
        let _ = writeln!(out, "Chunks: {} Entities: {}", frame.chunks.len(), entities);
        let _ = writeln!(out, "Grid: {}", if frame.grid_visible { "on" } else { "off" });

        if let Some(cell) = frame.highlight {
            let _ = writeln!(
                out,
                "Cell: tile=({}, {}) chunk={} local=({}, {})",
                cell.location.tile.x,
                cell.location.tile.y,
                cell.location.chunk,
                cell.location.local.x,
                cell.location.local.y
            );
        }

        if frame.debug {
            for chunk in frame.chunks {
                let _ = writeln!(out, "  [{}] {} entities={}", chunk.coord(), chunk.biome(), chunk.len());
            }
        }

        out
    }
}
