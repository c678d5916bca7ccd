//! Category colors
//!
//! Every category label seen by a viewer gets a fixed palette entry the first
//! time it is looked up. Assignments survive dataset reloads unless the
//! registry is cleared explicitly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);

    /// Linear-light components in `[0, 1]`, ready for an sRGB render target
    pub fn to_linear_f32(self) -> [f32; 3] {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Dark tones that stay readable on a light gray background
pub const PALETTE: [Color; 15] = [
    Color::rgb(0, 0, 139),     // dark blue
    Color::rgb(139, 0, 0),     // dark red
    Color::rgb(0, 100, 0),     // dark green
    Color::rgb(255, 140, 0),   // dark orange
    Color::rgb(148, 0, 211),   // dark violet
    Color::rgb(0, 139, 139),   // dark cyan
    Color::rgb(139, 0, 139),   // dark magenta
    Color::rgb(184, 134, 11),  // dark goldenrod
    Color::rgb(85, 107, 47),   // dark olive green
    Color::rgb(47, 79, 79),    // dark slate gray
    Color::rgb(0, 0, 128),     // navy
    Color::rgb(128, 0, 0),     // maroon
    Color::rgb(34, 139, 34),   // forest green
    Color::rgb(210, 105, 30),  // chocolate
    Color::rgb(75, 0, 130),    // indigo
];

/// Append-only mapping from category label to palette color
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    index: HashMap<String, usize>,
    assigned: Vec<(String, Color)>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `category`, assigning the next palette entry on first use
    pub fn color_for(&mut self, category: &str) -> Color {
        if let Some(&slot) = self.index.get(category) {
            return self.assigned[slot].1;
        }

        let color = PALETTE[self.assigned.len() % PALETTE.len()];
        self.index.insert(category.to_owned(), self.assigned.len());
        self.assigned.push((category.to_owned(), color));
        log::debug!("Assigned color {:?} to category '{}'", color, category);
        color
    }

    /// Previously assigned color, without assigning a new one
    pub fn get(&self, category: &str) -> Option<Color> {
        self.index.get(category).map(|&slot| self.assigned[slot].1)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Assignments in the order categories were first seen
    pub fn assignments(&self) -> impl Iterator<Item = (&str, Color)> {
        self.assigned.iter().map(|(category, color)| (category.as_str(), *color))
    }

    /// Forget every assignment; the next category starts at the first palette entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.assigned.clear();
    }
}
