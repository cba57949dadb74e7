//! RGB colors handed out by [`PlanarColoring`](super::PlanarColoring).

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Color { red, green, blue }
    }
}

/// Ordered list of colors; color index `i` maps to `palette[i]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Palette(colors)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.0.get(index).copied()
    }

    pub fn push(&mut self, color: Color) {
        self.0.push(color);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> + '_ {
        self.0.iter()
    }
}

impl Default for Palette {
    /// Red, green, blue, yellow, magenta, cyan.
    fn default() -> Self {
        Palette(vec![
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::MAGENTA,
            Color::CYAN,
        ])
    }
}

impl Index<usize> for Palette {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}
