//! Left-to-right text layout with hand-tuned pair spacing
//!
//! Not a font metric. Every glyph advances by a fixed amount, and an explicit
//! `(char, next_char)` table adds extra spacing where the greeting needs it.

use glint_core::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extra spacing inserted after `left` when it is followed by `right`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairSpacing {
    pub left: char,
    pub right: char,
    pub extra: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTable {
    /// Advance per visible glyph
    pub advance: f32,
    /// Advance per whitespace character
    pub space_advance: f32,
    /// Baseline height of the text line
    pub baseline: f32,
    /// Depth the glyph anchors sit at, slightly in front of the glitter
    pub depth: f32,
    pub pairs: Vec<PairSpacing>,
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::greeting()
    }
}

impl LayoutTable {
    /// Spacing tuned for "Merry Christmas from Consid"
    pub fn greeting() -> Self {
        let pair = |left, right, extra| PairSpacing { left, right, extra };
        Self {
            advance: 0.26,
            space_advance: 0.14,
            baseline: 0.0,
            depth: 0.1,
            pairs: vec![
                pair('M', 'e', 0.06),
                pair('r', 'r', -0.03),
                pair('r', 'y', -0.02),
                pair('y', ' ', 0.08),
                pair('C', 'h', 0.03),
                pair('i', 's', -0.04),
                pair('s', ' ', 0.08),
                pair('t', 'm', 0.02),
                pair('m', ' ', 0.06),
                pair('C', 'o', 0.03),
                pair('i', 'd', -0.04),
            ],
        }
    }

    /// Plain fixed advance, no pair spacing
    pub fn monospace(advance: f32) -> Self {
        Self {
            advance,
            space_advance: advance,
            pairs: Vec::new(),
            ..Self::greeting()
        }
    }

    fn pair_map(&self) -> HashMap<(char, char), f32> {
        self.pairs
            .iter()
            .map(|p| ((p.left, p.right), p.extra))
            .collect()
    }
}

/// Anchor positions for each character of a message, centered on x = 0
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    chars: Vec<char>,
    anchors: Vec<Vec3>,
    width: f32,
}

impl TextLayout {
    pub fn compute(message: &str, table: &LayoutTable) -> Self {
        let chars: Vec<char> = message.chars().collect();
        let pairs = table.pair_map();

        let mut cursor = 0.0f32;
        let mut xs = Vec::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            let advance = if c.is_whitespace() {
                table.space_advance
            } else {
                table.advance
            };
            xs.push(cursor + advance * 0.5);
            cursor += advance;
            if let Some(&next) = chars.get(i + 1) {
                cursor += pairs.get(&(c, next)).copied().unwrap_or(0.0);
            }
        }

        let half = cursor * 0.5;
        let anchors = xs
            .into_iter()
            .map(|x| Vec3::new(x - half, table.baseline, table.depth))
            .collect();

        Self {
            chars,
            anchors,
            width: cursor,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn anchor(&self, index: usize) -> Option<Vec3> {
        self.anchors.get(index).copied()
    }

    /// The first `count` characters as a string
    pub fn prefix(&self, count: usize) -> String {
        self.chars.iter().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_is_evenly_spaced() {
        let layout = TextLayout::compute("abcd", &LayoutTable::monospace(1.0));
        assert!((layout.width() - 4.0).abs() < 1e-6);
        let xs: Vec<f32> = (0..4).map(|i| layout.anchor(i).unwrap().x).collect();
        assert_eq!(xs, vec![-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn pair_spacing_shifts_following_glyphs() {
        let mut table = LayoutTable::monospace(1.0);
        table.pairs.push(PairSpacing {
            left: 'a',
            right: 'b',
            extra: 0.5,
        });
        let plain = TextLayout::compute("abc", &LayoutTable::monospace(1.0));
        let tuned = TextLayout::compute("abc", &table);
        assert!((tuned.width() - 3.5).abs() < 1e-6);
        let gap_plain = plain.anchor(1).unwrap().x - plain.anchor(0).unwrap().x;
        let gap_tuned = tuned.anchor(1).unwrap().x - tuned.anchor(0).unwrap().x;
        assert!((gap_tuned - gap_plain - 0.5).abs() < 1e-6);
    }

    #[test]
    fn pairs_only_apply_in_order() {
        let mut table = LayoutTable::monospace(1.0);
        table.pairs.push(PairSpacing {
            left: 'b',
            right: 'a',
            extra: 0.5,
        });
        let layout = TextLayout::compute("ab", &table);
        assert!((layout.width() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn greeting_is_centered_and_increasing() {
        let layout = TextLayout::compute("Merry Christmas from Consid", &LayoutTable::greeting());
        assert_eq!(layout.len(), 27);
        let first = layout.anchor(0).unwrap().x;
        let last = layout.anchor(26).unwrap().x;
        assert!(first < 0.0 && last > 0.0);
        for i in 1..layout.len() {
            assert!(layout.anchor(i).unwrap().x > layout.anchor(i - 1).unwrap().x);
        }
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        let layout = TextLayout::compute("Gløgg", &LayoutTable::greeting());
        assert_eq!(layout.prefix(3), "Glø");
        assert_eq!(layout.prefix(99), "Gløgg");
    }
}
