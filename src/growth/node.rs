use rand::Rng;

use crate::animation::{approach, ease_toward, sway_offset};
use crate::config::{GardenConfig, GrowthConfig};
use crate::error::RenderError;
use crate::math::{chance, pick, Vec2};
use crate::particles::SparkParticle;
use crate::render::{Color, LineCap, Paint, Surface};
use super::bloom::draw_bloom;
use super::leaves::draw_leaves;

/// Placement of a new stem segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprout {
    pub origin: Vec2,
    /// Degrees, -90 is straight up
    pub angle: f64,
    /// Length the segment grows toward
    pub length: f64,
    pub width: f64,
    /// Generations left before the stem flowers
    pub depth: u32,
}

/// Per-frame inputs shared by the whole draw pass
pub struct FrameContext<'a, R: Rng + ?Sized> {
    pub elapsed_ms: f64,
    pub rng: &'a mut R,
    /// Sparks emitted by blooms this frame
    pub sparks: &'a mut Vec<SparkParticle>,
    pub config: &'a GardenConfig,
}

/// A self-extending stem segment.
///
/// Grows toward its target length, then either continues with exactly one
/// child segment or, when no depth remains, opens a bloom at its tip.
#[derive(Debug, Clone)]
pub struct GrowthNode {
    pub origin: Vec2,
    pub angle: f64,
    pub length: f64,
    pub max_length: f64,
    pub width: f64,
    pub depth: u32,
    pub stem_color: Color,
    finished: bool,
    pub has_bloom: bool,
    pub bloom_size: f64,
    pub max_bloom_size: f64,
    pub bloom_color: Color,
    pub children: Vec<GrowthNode>,
    /// Angle including this frame's sway; drawing only
    drawn_angle: f64,
    /// Tip at the swayed angle, refreshed by `layout`
    tip: Vec2,
}

impl GrowthNode {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, sprout: Sprout, stem_color: Color, cfg: &GardenConfig) -> Self {
        let bloom = &cfg.bloom;
        let levels = cfg.growth.depth_reference as f64 - sprout.depth as f64;
        let max_bloom_size = (levels * bloom.size_per_level + bloom.base_size).max(0.0);

        Self {
            origin: sprout.origin,
            angle: sprout.angle,
            length: 0.0,
            max_length: sprout.length,
            width: sprout.width,
            depth: sprout.depth,
            stem_color,
            finished: false,
            has_bloom: false,
            bloom_size: 0.0,
            max_bloom_size,
            bloom_color: pick(rng, &bloom.palette, bloom.white),
            children: Vec::new(),
            drawn_angle: sprout.angle,
            tip: sprout.origin,
        }
    }

    /// True once the segment has reached its target length
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Tip position from the most recent `layout`
    pub fn tip(&self) -> Vec2 {
        self.tip
    }

    pub fn drawn_angle(&self) -> f64 {
        self.drawn_angle
    }

    /// Advance growth by one frame, then update every child
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &GardenConfig) {
        let growth = &cfg.growth;
        self.length = approach(self.length, self.max_length, growth.rate, growth.min_step);

        if self.length >= self.max_length && !self.finished {
            self.finished = true;
            if self.depth > 0 {
                let child = self.continuation(rng, growth);
                self.children.push(GrowthNode::new(rng, child, self.stem_color, cfg));
            } else {
                self.has_bloom = true;
            }
        }

        if self.has_bloom {
            self.bloom_size = ease_toward(self.bloom_size, self.max_bloom_size, cfg.bloom.rate);
        }

        for child in &mut self.children {
            child.update(rng, cfg);
        }
    }

    /// The single segment that continues this stem
    fn continuation<R: Rng + ?Sized>(&self, rng: &mut R, cfg: &GrowthConfig) -> Sprout {
        Sprout {
            origin: self.origin + Vec2::from_polar_deg(self.angle, self.max_length),
            angle: self.angle + cfg.wave.sample(rng),
            length: self.max_length * cfg.child_length_decay,
            width: self.width * cfg.child_width_decay,
            depth: self.depth - 1,
        }
    }

    /// Apply this frame's sway and pin every child to the swayed tip.
    ///
    /// Runs top-down before any drawing so a whole chain bends together.
    pub fn layout(&mut self, elapsed_ms: f64, cfg: &GrowthConfig) {
        self.drawn_angle = self.angle + sway_offset(elapsed_ms, self.depth, cfg);
        self.tip = self.origin + Vec2::from_polar_deg(self.drawn_angle, self.length);

        let tip = self.tip;
        for child in &mut self.children {
            child.origin = tip;
            child.layout(elapsed_ms, cfg);
        }
    }

    /// Paint stem, leaves, descendants and bloom, in that order
    pub fn draw<S: Surface, R: Rng + ?Sized>(
        &self,
        surface: &mut S,
        frame: &mut FrameContext<'_, R>,
    ) -> Result<(), RenderError> {
        let cfg = frame.config;

        self.draw_stem(surface, &cfg.growth)?;

        if self.length >= self.max_length * cfg.leaves.threshold {
            draw_leaves(surface, self.tip, self.angle, frame.rng, &cfg.leaves)?;
        }

        for child in &self.children {
            child.draw(surface, frame)?;
        }

        if self.has_bloom {
            draw_bloom(surface, self.tip, self.bloom_size, self.bloom_color, frame.elapsed_ms, &cfg.bloom)?;

            if chance(frame.rng, cfg.sparks.spawn_chance) {
                let spark = SparkParticle::new(frame.rng, self.tip, self.bloom_color, &cfg.sparks);
                frame.sparks.push(spark);
            }
        }

        Ok(())
    }

    fn draw_stem<S: Surface>(&self, surface: &mut S, cfg: &GrowthConfig) -> Result<(), RenderError> {
        // Control point sits above the origin, giving the stem a slight bow
        let control = Vec2::new(self.origin.x, self.origin.y - self.length / 2.0);

        surface.isolated(|surface| {
            surface.set_stroke_paint(&Paint::Solid(self.stem_color))?;
            surface.set_line_width(self.width);
            surface.set_line_cap(LineCap::Round);
            surface.set_shadow(cfg.stem_glow, cfg.stem_glow_color);
            surface.begin_path();
            surface.move_to(self.origin);
            surface.quadratic_curve_to(control, self.tip);
            surface.stroke();
            Ok(())
        })
    }

    /// Get all nodes in pre-order (self first, then children)
    pub fn iter_preorder(&self) -> impl Iterator<Item = &GrowthNode> {
        PreorderNodeIter { stack: vec![self] }
    }

    /// Total number of nodes in subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }
}

struct PreorderNodeIter<'a> {
    stack: Vec<&'a GrowthNode>,
}

impl<'a> Iterator for PreorderNodeIter<'a> {
    type Item = &'a GrowthNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::steps_to_reach;
    use crate::render::{DrawCommand, RecordingSurface};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const STEM: Color = Color::hex(0x006400);

    fn node(rng: &mut SmallRng, length: f64, depth: u32) -> GrowthNode {
        let sprout = Sprout {
            origin: Vec2::ZERO,
            angle: -90.0,
            length,
            width: 4.0,
            depth,
        };
        GrowthNode::new(rng, sprout, STEM, &GardenConfig::default())
    }

    fn grow_until_finished(n: &mut GrowthNode, rng: &mut SmallRng, cfg: &GardenConfig) -> usize {
        let mut frames = 0;
        while !n.is_finished() {
            n.update(rng, cfg);
            frames += 1;
            assert!(frames < 10_000, "node never finished");
        }
        frames
    }

    #[test]
    fn test_length_monotonic_and_clamped() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut n = node(&mut rng, 240.0, 0);
        let mut prev = n.length;
        for _ in 0..500 {
            n.update(&mut rng, &cfg);
            assert!(n.length >= prev);
            assert!(n.length <= n.max_length);
            prev = n.length;
        }
        assert_eq!(n.length, n.max_length);
    }

    #[test]
    fn test_terminal_node_blooms_without_child() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut n = node(&mut rng, 10.0, 0);
        let bound = steps_to_reach(10.0, cfg.growth.rate, cfg.growth.min_step);
        assert!(bound <= 60);

        let mut frames = 0;
        while !n.has_bloom {
            n.update(&mut rng, &cfg);
            frames += 1;
            assert!(frames <= bound, "no bloom after {} frames", frames);
        }
        for _ in 0..200 {
            n.update(&mut rng, &cfg);
        }
        assert!(n.children.is_empty());
    }

    #[test]
    fn test_bloom_on_reaching_frame() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut n = node(&mut rng, 30.0, 0);
        loop {
            let before = n.length;
            n.update(&mut rng, &cfg);
            if n.length >= n.max_length {
                assert!(before < n.max_length);
                assert!(n.has_bloom);
                break;
            }
            assert!(!n.has_bloom);
        }
    }

    #[test]
    fn test_continuing_node_spawns_exactly_one_child() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut n = node(&mut rng, 40.0, 2);

        loop {
            n.update(&mut rng, &cfg);
            if n.length >= n.max_length {
                break;
            }
            assert!(n.children.is_empty());
        }
        assert_eq!(n.children.len(), 1);
        assert!(!n.has_bloom);

        for _ in 0..500 {
            n.update(&mut rng, &cfg);
            assert_eq!(n.children.len(), 1);
        }
        assert!(!n.has_bloom);
    }

    #[test]
    fn test_child_inherits_decayed_geometry() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut n = node(&mut rng, 40.0, 3);
        grow_until_finished(&mut n, &mut rng, &cfg);

        let child = &n.children[0];
        assert!((child.angle - n.angle).abs() <= 10.0);
        assert!((child.max_length - 40.0 * 0.95).abs() < 1e-9);
        assert!((child.width - 4.0 * 0.85).abs() < 1e-9);
        assert_eq!(child.depth, 2);
        assert_eq!(child.stem_color, STEM);
        // Spawned at the unswayed tip: straight up from the origin
        assert!(child.origin.x.abs() < 1e-9);
        assert!((child.origin.y + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_chain_ends_in_single_bloom() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut n = node(&mut rng, 20.0, 3);
        for _ in 0..2_000 {
            n.update(&mut rng, &cfg);
        }
        assert_eq!(n.count(), 4);
        let depths: Vec<_> = n.iter_preorder().map(|c| c.depth).collect();
        assert_eq!(depths, vec![3, 2, 1, 0]);
        let blooms: Vec<_> = n.iter_preorder().filter(|c| c.has_bloom).collect();
        assert_eq!(blooms.len(), 1);
        assert_eq!(blooms[0].depth, 0);
    }

    #[test]
    fn test_bloom_size_eases_toward_target() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut n = node(&mut rng, 5.0, 0);
        grow_until_finished(&mut n, &mut rng, &cfg);
        assert_eq!(n.max_bloom_size, 95.0);

        let mut prev = n.bloom_size;
        for _ in 0..300 {
            n.update(&mut rng, &cfg);
            assert!(n.bloom_size >= prev);
            assert!(n.bloom_size < n.max_bloom_size);
            prev = n.bloom_size;
        }
    }

    #[test]
    fn test_bloom_size_scales_with_depth() {
        let mut rng = SmallRng::seed_from_u64(8);
        assert_eq!(node(&mut rng, 5.0, 0).max_bloom_size, 95.0);
        assert_eq!(node(&mut rng, 5.0, 4).max_bloom_size, 71.0);
        assert_eq!(node(&mut rng, 5.0, 20).max_bloom_size, 0.0);
    }

    #[test]
    fn test_bloom_color_from_palette() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            let n = node(&mut rng, 5.0, 0);
            assert!(cfg.bloom.palette.contains(&n.bloom_color));
        }
    }

    #[test]
    fn test_layout_pins_children_to_swayed_tip() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(10);
        let mut n = node(&mut rng, 30.0, 2);
        for _ in 0..1_000 {
            n.update(&mut rng, &cfg);
        }

        for t in [0.0, 750.0, 1600.0, 9000.0] {
            n.layout(t, &cfg.growth);
            let parent_tip = n.tip();
            let child = &n.children[0];
            assert_eq!(child.origin, parent_tip);
            assert_eq!(child.children[0].origin, child.tip());
        }
    }

    #[test]
    fn test_sway_does_not_touch_stored_angle() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut n = node(&mut rng, 30.0, 0);
        n.update(&mut rng, &cfg);
        n.layout(1570.0, &cfg.growth);
        assert_eq!(n.angle, -90.0);
        assert!((n.drawn_angle() - n.angle).abs() > 0.0);
        assert!(((n.tip() - n.origin).length() - n.length).abs() < 1e-9);
    }

    #[test]
    fn test_draw_parent_stem_before_child_stem() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(12);
        let mut n = node(&mut rng, 30.0, 1);
        for _ in 0..1_000 {
            n.update(&mut rng, &cfg);
        }
        n.layout(0.0, &cfg.growth);

        let mut sparks = Vec::new();
        let mut surface = RecordingSurface::new();
        let mut frame = FrameContext {
            elapsed_ms: 0.0,
            rng: &mut rng,
            sparks: &mut sparks,
            config: &cfg,
        };
        n.draw(&mut surface, &mut frame).unwrap();

        let widths: Vec<f64> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::LineWidth(w) if *w > 1.0 => Some(*w),
                _ => None,
            })
            .collect();
        assert_eq!(widths[0], 4.0);
        assert!((widths[1] - 3.4).abs() < 1e-9);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_leaves_only_near_full_length() {
        let cfg = GardenConfig::default();
        let mut rng = SmallRng::seed_from_u64(13);
        let mut n = node(&mut rng, 100.0, 1);
        n.update(&mut rng, &cfg);
        n.layout(0.0, &cfg.growth);

        let mut sparks = Vec::new();
        let mut surface = RecordingSurface::new();
        {
            let mut frame = FrameContext { elapsed_ms: 0.0, rng: &mut rng, sparks: &mut sparks, config: &cfg };
            n.draw(&mut surface, &mut frame).unwrap();
        }
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Ellipse(_))), 0);

        n.length = 80.0;
        surface.clear_log();
        let mut frame = FrameContext { elapsed_ms: 0.0, rng: &mut rng, sparks: &mut sparks, config: &cfg };
        n.draw(&mut surface, &mut frame).unwrap();
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Ellipse(_))), 3);
    }

    #[test]
    fn test_blooming_node_emits_sparks() {
        let mut cfg = GardenConfig::default();
        cfg.sparks.spawn_chance = 1.0;
        let mut rng = SmallRng::seed_from_u64(14);
        let mut n = node(&mut rng, 10.0, 0);
        grow_until_finished(&mut n, &mut rng, &cfg);
        n.layout(0.0, &cfg.growth);

        let mut sparks = Vec::new();
        let mut surface = RecordingSurface::new();
        let mut frame = FrameContext { elapsed_ms: 0.0, rng: &mut rng, sparks: &mut sparks, config: &cfg };
        n.draw(&mut surface, &mut frame).unwrap();

        assert_eq!(sparks.len(), 1);
        assert_eq!(sparks[0].position, n.tip());
        assert_eq!(sparks[0].color, n.bloom_color);
    }

    #[test]
    fn test_no_sparks_without_bloom() {
        let mut cfg = GardenConfig::default();
        cfg.sparks.spawn_chance = 1.0;
        let mut rng = SmallRng::seed_from_u64(15);
        let mut n = node(&mut rng, 10.0, 0);
        n.update(&mut rng, &cfg);
        n.layout(0.0, &cfg.growth);

        let mut sparks = Vec::new();
        let mut frame = FrameContext { elapsed_ms: 0.0, rng: &mut rng, sparks: &mut sparks, config: &cfg };
        n.draw(&mut RecordingSurface::new(), &mut frame).unwrap();
        assert!(sparks.is_empty());
    }
}
