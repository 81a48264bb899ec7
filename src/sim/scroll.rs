//! Infinite scrolling for tiled background layers
//!
//! The layer anchor moves left at constant speed. Any tile whose scene-space
//! center reaches `-tileHalfWidth` (fully off the left edge) jumps to
//! `viewportHalfWidth + tileWidth`, keeping its Y. Tiles never interact, so
//! iteration order is irrelevant.

use glam::Vec2;

use super::state::ScrollLayer;

/// Translate the layer anchor left by `dx`
pub fn advance(layer: &mut ScrollLayer, dx: f32) {
    layer.origin.x -= dx;
}

/// Wrap tiles that left the viewport back to the trailing edge.
/// Returns how many tiles moved.
pub fn recycle(layer: &mut ScrollLayer, viewport_half_width: f32) -> usize {
    let origin = layer.origin;
    let mut moved = 0;
    for tile in &mut layer.tiles {
        let scene = origin + tile.position;
        let half = tile.size.x * 0.5;
        if scene.x <= -half {
            let wrapped = Vec2::new(viewport_half_width + tile.size.x, scene.y);
            tile.position = wrapped - origin;
            moved += 1;
        }
    }
    moved
}

/// Advance then recycle, once per tick
pub fn scroll(layer: &mut ScrollLayer, dx: f32, viewport_half_width: f32) {
    advance(layer, dx);
    let moved = recycle(layer, viewport_half_width);
    if moved > 0 {
        log::trace!("Recycled {moved} tile(s)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCROLL_SPEED, SIM_DT};
    use crate::layout::SceneLayout;
    use crate::sim::state::Tile;

    const HALF_W: f32 = 160.0;

    fn two_tile_layer() -> ScrollLayer {
        ScrollLayer::new(vec![
            Tile::new(Vec2::new(160.0, 45.0), Vec2::new(320.0, 90.0)),
            Tile::new(Vec2::new(480.0, 45.0), Vec2::new(320.0, 90.0)),
        ])
    }

    #[test]
    fn test_advance_moves_anchor_only() {
        let mut layer = two_tile_layer();
        advance(&mut layer, SCROLL_SPEED * SIM_DT);
        assert!((layer.origin.x + 160.0 / 60.0).abs() < 1e-5);
        assert_eq!(layer.tiles[0].position, Vec2::new(160.0, 45.0));
    }

    #[test]
    fn test_recycle_in_bounds_is_noop() {
        let mut layer = two_tile_layer();
        layer.origin.x = -100.0;
        let before = layer.clone();
        assert_eq!(recycle(&mut layer, HALF_W), 0);
        assert_eq!(layer, before);
        // Idempotent
        assert_eq!(recycle(&mut layer, HALF_W), 0);
        assert_eq!(layer, before);
    }

    #[test]
    fn test_recycled_tile_lands_on_trailing_edge() {
        let mut layer = two_tile_layer();
        layer.origin = Vec2::new(-330.0, 12.0);
        assert_eq!(recycle(&mut layer, HALF_W), 1);

        let scene = layer.to_scene(layer.tiles[0].position);
        assert!((scene.x - (HALF_W + 320.0)).abs() < 1e-3);
        assert_eq!(scene.y, 12.0 + 45.0);
        // Second tile untouched
        assert_eq!(layer.tiles[1].position, Vec2::new(480.0, 45.0));
    }

    #[test]
    fn test_exact_boundary_recycles() {
        let mut layer = two_tile_layer();
        layer.origin.x = -320.0;
        assert_eq!(recycle(&mut layer, HALF_W), 1);
    }

    #[test]
    fn test_no_tile_left_behind_over_long_scroll() {
        let layout = SceneLayout::default();
        let mut layer = ScrollLayer::new(layout.ground_tiles.clone());
        let dx = SCROLL_SPEED * SIM_DT;
        for _ in 0..10_000 {
            scroll(&mut layer, dx, layout.half_width());
            assert_eq!(layer.tiles.len(), 2);
            for t in &layer.tiles {
                let scene = layer.to_scene(t.position);
                assert!(scene.x > -t.size.x * 0.5);
                assert!(scene.x <= layout.half_width() + t.size.x + 1e-2);
                assert_eq!(t.position.y, 45.0);
            }
        }
    }
}
