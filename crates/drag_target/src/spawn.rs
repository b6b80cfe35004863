//! Where and how the draggable object reappears after a successful drop.

use bevy::prelude::*;
use strum::{Display, VariantArray};

use crate::config::Swatch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Every random draw the game makes goes through this trait.
pub trait SpawnRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
    /// Uniform value in `0.0..1.0`.
    fn unit(&mut self) -> f32;
}

impl SpawnRng for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn unit(&mut self) -> f32 {
        self.f32()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawn {
    pub edge: Edge,
    /// Top-left corner, screen space.
    pub position: Vec2,
    pub swatch: Swatch,
}

/// Top-left corner of an object of `size` placed on `edge`, `along` being the
/// fraction of the free run of that edge. An object wider than the screen is
/// pinned to 0 on that axis.
pub fn edge_position(edge: Edge, screen: Vec2, size: f32, along: f32) -> Vec2 {
    let free = (screen - Vec2::splat(size)).max(Vec2::ZERO);
    let along = along.clamp(0.0, 1.0);
    match edge {
        Edge::Top => Vec2::new(along * free.x, 0.0),
        Edge::Right => Vec2::new(free.x, along * free.y),
        Edge::Bottom => Vec2::new(along * free.x, free.y),
        Edge::Left => Vec2::new(0.0, along * free.y),
    }
}

/// Draws an edge, a spot along it and a palette entry, in that order.
pub fn random_spawn(
    rng: &mut impl SpawnRng,
    screen: Vec2,
    size: f32,
    palette: &[Swatch],
) -> Spawn {
    let edge = Edge::VARIANTS
        .get(rng.index(Edge::VARIANTS.len()))
        .copied()
        .unwrap_or(Edge::Top);
    let position = edge_position(edge, screen, size, rng.unit());
    let swatch = pick_swatch(rng, palette);
    Spawn {
        edge,
        position,
        swatch,
    }
}

fn pick_swatch(rng: &mut impl SpawnRng, palette: &[Swatch]) -> Swatch {
    let fallback = Swatch {
        name: "gray",
        hue: 0.0,
        saturation: 0.0,
    };
    if palette.is_empty() {
        return fallback;
    }
    palette
        .get(rng.index(palette.len()))
        .copied()
        .unwrap_or(fallback)
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use super::*;
    use crate::config::SQUARE_PALETTE;

    const SCREEN: Vec2 = Vec2::new(360.0, 640.0);

    #[expect(clippy::float_cmp, reason = "edge coordinates are computed exactly")]
    fn on_some_edge(position: Vec2, size: f32) -> bool {
        position.x == 0.0
            || position.y == 0.0
            || position.x == SCREEN.x - size
            || position.y == SCREEN.y - size
    }

    #[test]
    fn edge_positions_stay_on_screen() {
        let size = 60.0;
        for edge in Edge::VARIANTS {
            for along in [0.0, 0.25, 0.5, 0.999, 1.0] {
                let position = edge_position(*edge, SCREEN, size, along);
                assert!((0.0..=SCREEN.x - size).contains(&position.x), "{edge} {position}");
                assert!((0.0..=SCREEN.y - size).contains(&position.y), "{edge} {position}");
                assert!(on_some_edge(position, size), "{edge} {position}");
            }
        }
    }

    #[test]
    fn exact_edge_coordinates() {
        assert_eq!(
            edge_position(Edge::Top, SCREEN, 60.0, 0.5),
            Vec2::new(150.0, 0.0)
        );
        assert_eq!(
            edge_position(Edge::Right, SCREEN, 60.0, 0.5),
            Vec2::new(300.0, 290.0)
        );
        assert_eq!(
            edge_position(Edge::Bottom, SCREEN, 60.0, 0.0),
            Vec2::new(0.0, 580.0)
        );
        assert_eq!(
            edge_position(Edge::Left, SCREEN, 60.0, 1.0),
            Vec2::new(0.0, 580.0)
        );
    }

    #[test]
    fn oversized_objects_are_pinned_to_the_origin() {
        let screen = Vec2::new(50.0, 40.0);
        for edge in Edge::VARIANTS {
            assert_eq!(edge_position(*edge, screen, 120.0, 0.7), Vec2::ZERO);
        }
    }

    #[test]
    fn fastrand_spawns_are_valid() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let spawn = random_spawn(&mut rng, SCREEN, 45.0, &SQUARE_PALETTE);
            assert!(spawn.position.x >= 0.0 && spawn.position.x <= SCREEN.x - 45.0);
            assert!(spawn.position.y >= 0.0 && spawn.position.y <= SCREEN.y - 45.0);
            assert!(on_some_edge(spawn.position, 45.0));
            assert!(SQUARE_PALETTE.contains(&spawn.swatch));
        }
    }
}
