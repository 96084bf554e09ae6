//! Cursor-trail chain simulation.
//!
//! A main dot chases the pointer with an adaptive lerp (snapping across
//! very fast moves), and three layers of follower nodes each ease toward
//! their predecessor. The simulation always advances every node; while a
//! scroll is in flight the *projection* is thinned to the first few nodes
//! per layer, which is the renderer's concern, surfaced here as a hint.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
struct TrailNode {
    pos: Vec2,
    opacity: f32,
}

#[derive(Clone, Debug)]
pub struct TrailLayer {
    nodes: Vec<TrailNode>,
    spacing: f32,
    base_scale: f32,
    falloff: f32,
}

/// Projection data for one trail node.
#[derive(Clone, Copy, Debug)]
pub struct TrailNodeView {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

pub struct CursorTrail {
    target: Vec2,
    dot: Vec2,
    layers: [TrailLayer; 3],
    glow: f32,
    glow_target: f32,
    inside: bool,
    last_move_ms: f64,
    scrolling: bool,
}

impl CursorTrail {
    pub fn new(start: Vec2) -> Self {
        let layer = |count: usize, spacing: f32, base_scale: f32, falloff: f32| TrailLayer {
            nodes: vec![TrailNode { pos: start, opacity: 0.0 }; count],
            spacing,
            base_scale,
            falloff,
        };
        Self {
            target: start,
            dot: start,
            layers: [
                layer(TRAIL_BIG_COUNT, TRAIL_BIG_SPACING, 1.2, 2.2),
                layer(TRAIL_SMALL_COUNT, TRAIL_SMALL_SPACING, 1.0, 2.6),
                layer(TRAIL_TINY_COUNT, TRAIL_TINY_SPACING, 0.6, 3.0),
            ],
            glow: 0.0,
            glow_target: 0.0,
            inside: true,
            last_move_ms: 0.0,
            scrolling: false,
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2, now_ms: f64) {
        self.target = pos;
        self.last_move_ms = now_ms;
        self.inside = true;
    }

    pub fn pointer_left(&mut self) {
        self.inside = false;
        self.glow_target = 0.0;
    }

    pub fn set_glow_target(&mut self, glow: f32) {
        self.glow_target = glow.clamp(0.0, 1.0);
    }

    pub fn set_scrolling(&mut self, scrolling: bool) {
        self.scrolling = scrolling;
    }

    pub fn tick(&mut self, now_ms: f64) {
        let delta = self.target - self.dot;
        let dist = delta.length();
        if dist > TRAIL_SNAP_DIST {
            // Very fast moves snap instead of visibly lagging behind.
            self.dot = self.target;
        } else {
            let lerp = TRAIL_LERP_BASE + (dist / TRAIL_LERP_DIST_DIV).min(TRAIL_LERP_EXTRA_MAX);
            self.dot += delta * lerp;
        }

        self.glow += (self.glow_target - self.glow) * TRAIL_GLOW_EASE;

        let head_opacity = (dist / 60.0).clamp(0.05, 1.0);
        let dot = self.dot;
        for layer in &mut self.layers {
            let spacing = layer.spacing;
            if let Some(head) = layer.nodes.first_mut() {
                head.pos += (dot - head.pos) * spacing;
                head.opacity = head_opacity;
            }
            for i in 1..layer.nodes.len() {
                let prev = layer.nodes[i - 1];
                let node = &mut layer.nodes[i];
                node.pos += (prev.pos - node.pos) * spacing;
                node.opacity = (prev.opacity - TRAIL_OPACITY_STEP).max(0.0);
            }
        }

        if !self.inside {
            let fade = self.exit_fade(now_ms);
            for layer in &mut self.layers {
                for node in &mut layer.nodes {
                    node.opacity *= fade;
                }
            }
        }
    }

    fn exit_fade(&self, now_ms: f64) -> f32 {
        (1.0 - (now_ms - self.last_move_ms) / TRAIL_FADE_MS).clamp(0.0, 1.0) as f32
    }

    pub fn dot(&self) -> Vec2 {
        self.dot
    }

    pub fn glow(&self) -> f32 {
        self.glow
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    pub fn dot_opacity(&self, now_ms: f64) -> f32 {
        if self.inside {
            1.0
        } else {
            self.exit_fade(now_ms)
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_len(&self, layer: usize) -> usize {
        self.layers[layer].nodes.len()
    }

    /// How many nodes per layer the projection should touch this frame.
    pub fn render_limit(&self, layer: usize) -> usize {
        let len = self.layers[layer].nodes.len();
        if self.scrolling {
            len.min(TRAIL_SCROLL_NODE_LIMIT)
        } else {
            len
        }
    }

    pub fn node_view(&self, layer: usize, index: usize) -> TrailNodeView {
        let l = &self.layers[layer];
        let node = &l.nodes[index];
        let t = index as f32 / (l.nodes.len().saturating_sub(1).max(1)) as f32;
        TrailNodeView {
            x: node.pos.x,
            y: node.pos.y,
            scale: l.base_scale * (1.0 - t * 0.9),
            opacity: (1.0 - t).powf(l.falloff) * node.opacity * 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_converges_on_a_stationary_target() {
        let mut trail = CursorTrail::new(Vec2::ZERO);
        trail.pointer_moved(Vec2::new(100.0, 40.0), 0.0);
        for i in 0..120 {
            trail.tick(i as f64 * 16.0);
        }
        assert!((trail.dot() - Vec2::new(100.0, 40.0)).length() < 1.0);
    }

    #[test]
    fn fast_moves_snap_instead_of_lagging() {
        let mut trail = CursorTrail::new(Vec2::ZERO);
        trail.pointer_moved(Vec2::new(1000.0, 0.0), 0.0);
        trail.tick(16.0);
        assert_eq!(trail.dot(), Vec2::new(1000.0, 0.0));
    }

    #[test]
    fn scrolling_thins_projection_not_simulation() {
        let mut trail = CursorTrail::new(Vec2::ZERO);
        trail.set_scrolling(true);
        assert_eq!(trail.render_limit(2), TRAIL_SCROLL_NODE_LIMIT);
        trail.set_scrolling(false);
        assert_eq!(trail.render_limit(2), trail.layer_len(2));
    }

    #[test]
    fn trail_fades_out_after_pointer_leaves() {
        let mut trail = CursorTrail::new(Vec2::ZERO);
        trail.pointer_moved(Vec2::new(50.0, 50.0), 0.0);
        trail.tick(16.0);
        trail.pointer_left();
        trail.tick(TRAIL_FADE_MS + 100.0);
        assert_eq!(trail.dot_opacity(TRAIL_FADE_MS + 100.0), 0.0);
        for layer in 0..trail.layer_count() {
            for i in 0..trail.layer_len(layer) {
                assert_eq!(trail.node_view(layer, i).opacity, 0.0);
            }
        }
    }
}
