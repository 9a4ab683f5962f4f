//! Horizontal bars scrolling down the screen
//!
//! A fixed set of bars. Each one falls at constant speed and is recycled
//! above the viewport once it passes the bottom edge, with a fresh length.
//! Even-indexed bars hug the left edge, odd-indexed bars the right edge.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::BAR_COUNT;
use crate::tuning::Tuning;

/// A single bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub left: f32,
    pub top: f32,
    pub length: f32,
}

impl Bar {
    pub fn rect(&self, thickness: f32) -> Rect {
        Rect::from_origin_size(self.left, self.top, self.length, thickness)
    }
}

/// The set of bars plus the random source for their lengths
#[derive(Debug, Clone)]
pub struct ObstacleField<R: Rng = Pcg32> {
    bars: Vec<Bar>,
    width: f32,
    height: f32,
    thickness: f32,
    speed: f32,
    stagger: f32,
    length_base: f32,
    length_spread: f32,
    rng: R,
}

impl<R: Rng> ObstacleField<R> {
    /// Create an empty field; bars appear on the first resize
    pub fn new(tuning: &Tuning, rng: R) -> Self {
        Self {
            bars: Vec::with_capacity(BAR_COUNT),
            width: 0.0,
            height: 0.0,
            thickness: tuning.bar_thickness,
            speed: tuning.bar_speed,
            stagger: tuning.bar_stagger,
            length_base: tuning.bar_length_base,
            length_spread: tuning.bar_length_spread,
            rng,
        }
    }

    /// Rebuild all bars for a new viewport, staggered above the top edge
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;

        self.bars.clear();
        for i in 0..BAR_COUNT {
            let top = -self.thickness - height * i as f32 * self.stagger;
            let length = self.new_length();
            let left = self.spawn_left(i, length);
            self.bars.push(Bar { left, top, length });
        }
    }

    /// Move every bar down, recycling those that left the viewport
    pub fn tick(&mut self) {
        for i in 0..self.bars.len() {
            self.bars[i].top += self.speed;
            if self.bars[i].top > self.height {
                let length = self.new_length();
                let left = self.spawn_left(i, length);
                self.bars[i] = Bar {
                    left,
                    top: -self.thickness,
                    length,
                };
            }
        }
    }

    /// Current bar bounding boxes, in bar index order
    pub fn rects(&self) -> Vec<Rect> {
        self.bars.iter().map(|b| b.rect(self.thickness)).collect()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Direct access for scripted layouts (the bar count cannot change)
    #[cfg(test)]
    pub(crate) fn bars_mut(&mut self) -> &mut [Bar] {
        &mut self.bars
    }

    /// Random length in [base, base + spread) of the viewport width
    fn new_length(&mut self) -> f32 {
        let roll: f32 = self.rng.random();
        self.width * self.length_base + roll * self.width * self.length_spread
    }

    /// Even bars start at the left edge, odd bars end at the right edge
    fn spawn_left(&self, index: usize, length: f32) -> f32 {
        if index % 2 == 0 { 0.0 } else { self.width - length }
    }
}
