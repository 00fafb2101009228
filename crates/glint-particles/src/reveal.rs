//! Letter-by-letter text reveal with sparkle bursts
//!
//! Once started, one more character becomes visible every `tick_ms`. Each
//! revealed glyph gets a burst of sparkles at its layout anchor, and visible
//! glyphs keep shimmering with a small per-frame spawn chance.

use crate::config::SparkleParams;
use crate::layout::{LayoutTable, TextLayout};
use crate::rand::ParticleRng;
use crate::sparkle::{Sparkle, SparkleArena};
use glint_core::{Color, GlintError, Result, Vec3};
use glint_runtime::FrameTime;
use log::{debug, info, warn};

pub struct RevealSequencer {
    layout: TextLayout,
    tick_ms: f64,
    params: SparkleParams,
    color: Color,
    started_at_ms: Option<f64>,
    visible: usize,
    arena: SparkleArena,
    dropped: u64,
}

impl RevealSequencer {
    pub fn new(
        message: &str,
        table: &LayoutTable,
        tick_ms: f64,
        params: SparkleParams,
        color: Color,
    ) -> Result<Self> {
        if message.is_empty() {
            return Err(GlintError::InvalidConfig("reveal message is empty".into()));
        }
        if !(tick_ms.is_finite() && tick_ms > 0.0) {
            return Err(GlintError::ValueOutOfRange {
                field: "reveal_tick_ms".into(),
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: tick_ms,
            });
        }
        let arena = SparkleArena::with_capacity(params.capacity);
        Ok(Self {
            layout: TextLayout::compute(message, table),
            tick_ms,
            params,
            color,
            started_at_ms: None,
            visible: 0,
            arena,
            dropped: 0,
        })
    }

    /// Begin revealing at `elapsed_ms`. Later calls are ignored.
    pub fn start(&mut self, elapsed_ms: f64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(elapsed_ms);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.visible == self.layout.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn revealed_text(&self) -> String {
        self.layout.prefix(self.visible)
    }

    pub fn sparkles(&self) -> impl Iterator<Item = &Sparkle> {
        self.arena.active()
    }

    pub fn sparkle_count(&self) -> usize {
        self.arena.active_count()
    }

    /// Drop every live sparkle, used when the scene is torn down
    pub fn clear_sparkles(&mut self) {
        self.arena.clear();
    }

    /// Sparkles that could not be spawned because the arena was full
    pub fn dropped_sparkles(&self) -> u64 {
        self.dropped
    }

    /// Advance one frame. Returns how many characters were revealed.
    pub fn update(&mut self, frame: &FrameTime, rng: &mut ParticleRng) -> usize {
        self.arena.age_all();

        let mut revealed = 0;
        if let Some(start) = self.started_at_ms {
            let due = ((frame.elapsed_ms() - start) / self.tick_ms).floor();
            let due = if due.is_finite() && due > 0.0 {
                (due as usize).min(self.layout.len())
            } else {
                0
            };
            while self.visible < due {
                let index = self.visible;
                self.visible += 1;
                revealed += 1;
                debug!("[reveal] {:?} ({}/{})", self.revealed_text(), self.visible, self.layout.len());
                if self.is_glyph(index) {
                    for _ in 0..self.params.burst_count {
                        self.spawn_at(index, rng);
                    }
                }
            }
            if revealed > 0 && self.is_complete() {
                info!("[reveal] message complete: {:?}", self.revealed_text());
            }
        }

        for index in 0..self.visible {
            if self.is_glyph(index) && rng.chance(self.params.shimmer_probability) {
                self.spawn_at(index, rng);
            }
        }

        revealed
    }

    fn is_glyph(&self, index: usize) -> bool {
        self.layout.char_at(index).is_some_and(|c| !c.is_whitespace())
    }

    fn spawn_at(&mut self, index: usize, rng: &mut ParticleRng) {
        let Some(anchor) = self.layout.anchor(index) else {
            return;
        };
        let jitter = Vec3::from_array(self.params.jitter);
        let sparkle = Sparkle::new(
            anchor + rng.box_point(jitter),
            rng.range(self.params.life_speed_min, self.params.life_speed_max),
            rng.range(self.params.scale_min, self.params.scale_max),
            self.color.scaled(rng.range(0.85, 1.0)),
        );
        if self.arena.spawn(sparkle).is_none() {
            if self.dropped == 0 {
                warn!(
                    "[reveal] sparkle arena full ({} slots), dropping spawns",
                    self.arena.capacity()
                );
            }
            self.dropped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(message: &str, params: SparkleParams) -> RevealSequencer {
        RevealSequencer::new(
            message,
            &LayoutTable::greeting(),
            100.0,
            params,
            Color::WHITE,
        )
        .unwrap()
    }

    fn frame_at(ms: f64) -> FrameTime {
        FrameTime {
            elapsed: ms / 1000.0,
            delta: 1.0 / 60.0,
            frame: 0,
        }
    }

    fn quiet() -> SparkleParams {
        SparkleParams {
            shimmer_probability: 0.0,
            ..SparkleParams::default()
        }
    }

    #[test]
    fn rejects_empty_message() {
        let result = RevealSequencer::new(
            "",
            &LayoutTable::greeting(),
            100.0,
            SparkleParams::default(),
            Color::WHITE,
        );
        assert!(result.is_err());
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut seq = sequencer("Hi", SparkleParams::default());
        let mut rng = ParticleRng::new(1);
        assert_eq!(seq.update(&frame_at(10_000.0), &mut rng), 0);
        assert_eq!(seq.visible_count(), 0);
        assert_eq!(seq.sparkle_count(), 0);
    }

    #[test]
    fn reveals_one_char_per_tick() {
        let mut seq = sequencer("Merry", quiet());
        let mut rng = ParticleRng::new(1);
        seq.start(1000.0);
        seq.update(&frame_at(1050.0), &mut rng);
        assert_eq!(seq.revealed_text(), "");
        seq.update(&frame_at(1100.0), &mut rng);
        assert_eq!(seq.revealed_text(), "M");
        seq.update(&frame_at(1350.0), &mut rng);
        assert_eq!(seq.revealed_text(), "Mer");
        seq.update(&frame_at(9000.0), &mut rng);
        assert_eq!(seq.revealed_text(), "Merry");
        assert!(seq.is_complete());
        // Terminal: no further reveals
        assert_eq!(seq.update(&frame_at(99_000.0), &mut rng), 0);
        assert_eq!(seq.visible_count(), 5);
    }

    #[test]
    fn start_is_one_shot() {
        let mut seq = sequencer("Merry", quiet());
        let mut rng = ParticleRng::new(1);
        seq.start(1000.0);
        seq.start(5000.0);
        seq.update(&frame_at(1200.0), &mut rng);
        assert_eq!(seq.visible_count(), 2);
    }

    #[test]
    fn each_glyph_spawns_a_burst() {
        let mut seq = sequencer("a b", quiet());
        let mut rng = ParticleRng::new(3);
        seq.start(0.0);
        seq.update(&frame_at(100.0), &mut rng);
        assert_eq!(seq.sparkle_count(), 20);
        // Whitespace gets no burst
        seq.update(&frame_at(200.0), &mut rng);
        assert!(seq.sparkle_count() <= 20);
        seq.update(&frame_at(300.0), &mut rng);
        assert!(seq.sparkle_count() > 20);
    }

    #[test]
    fn fresh_burst_is_at_full_life_near_anchor() {
        let mut seq = sequencer("Hi", quiet());
        let mut rng = ParticleRng::new(8);
        seq.start(0.0);
        seq.update(&frame_at(100.0), &mut rng);
        let anchor = seq.layout().anchor(0).unwrap();
        for s in seq.sparkles() {
            assert_eq!(s.life, 1.0);
            assert!((s.position.x - anchor.x).abs() <= 0.15 + 1e-5);
            assert!((s.position.y - anchor.y).abs() <= 0.2 + 1e-5);
        }
    }

    #[test]
    fn sparkles_age_out_after_reveal_completes() {
        let mut seq = sequencer("Hi", quiet());
        let mut rng = ParticleRng::new(8);
        seq.start(0.0);
        seq.update(&frame_at(500.0), &mut rng);
        assert!(seq.is_complete());
        assert_eq!(seq.sparkle_count(), 40);
        // Slowest sparkle loses 0.01 per frame
        for _ in 0..101 {
            seq.update(&frame_at(600.0), &mut rng);
        }
        assert_eq!(seq.sparkle_count(), 0);
    }

    #[test]
    fn shimmer_spawns_on_visible_glyphs() {
        let params = SparkleParams {
            shimmer_probability: 1.0,
            burst_count: 0,
            ..SparkleParams::default()
        };
        let mut seq = sequencer("abc", params);
        let mut rng = ParticleRng::new(2);
        seq.start(0.0);
        seq.update(&frame_at(200.0), &mut rng);
        assert_eq!(seq.sparkle_count(), 2);
    }

    #[test]
    fn full_arena_drops_spawns() {
        let params = SparkleParams {
            capacity: 5,
            shimmer_probability: 0.0,
            ..SparkleParams::default()
        };
        let mut seq = sequencer("a", params);
        let mut rng = ParticleRng::new(4);
        seq.start(0.0);
        seq.update(&frame_at(100.0), &mut rng);
        assert_eq!(seq.sparkle_count(), 5);
        assert_eq!(seq.dropped_sparkles(), 15);
    }
}
