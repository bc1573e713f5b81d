//! Gerstner wave field used as demo water.
//!
//! A Gerstner surface moves points horizontally as well as vertically, so the
//! height "under" a world point is found by searching for the undisplaced
//! point whose displaced position lands on it.

use std::f32::consts::TAU;

use bevy_math::{Vec2, Vec3};
use hydro::{HeightFieldSampler, HeightSample};
use serde::{Deserialize, Serialize};

const GRAVITY: f32 = 9.81;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveLayer {
    /// Travel direction in the XZ plane; normalized on use.
    pub direction: Vec2,
    pub amplitude: f32,
    pub wavelength: f32,
    /// Horizontal sway as a fraction of the amplitude; 0 is a plain sine.
    pub steepness: f32,
}

impl Default for WaveLayer {
    fn default() -> Self {
        Self { direction: Vec2::X, amplitude: 0.1, wavelength: 8.0, steepness: 0.5 }
    }
}

impl WaveLayer {
    pub fn new(dir_x: f32, dir_z: f32, amplitude: f32, wavelength: f32, steepness: f32) -> Self {
        Self { direction: Vec2::new(dir_x, dir_z), amplitude, wavelength, steepness }
    }

    fn displacement(&self, base: Vec2, time: f32) -> Vec3 {
        let k = TAU / self.wavelength;
        // Deep-water dispersion
        let c = (GRAVITY / k).sqrt();
        let d = self.direction.normalize_or_zero();
        let f = k * (d.dot(base) - c * time);
        let a = self.amplitude * self.steepness;
        Vec3::new(d.x * a * f.cos(), self.amplitude * f.sin(), d.y * a * f.cos())
    }
}

/// Sum of Gerstner layers around a mean level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GerstnerWaves {
    pub level: f32,
    /// Time scale applied to the clock.
    pub speed: f32,
    pub layers: Vec<WaveLayer>,
    /// Current wave clock in seconds; advanced by the caller.
    #[serde(skip)]
    pub time: f32,
}

impl Default for GerstnerWaves {
    fn default() -> Self {
        Self {
            level: 0.0,
            speed: 1.0,
            layers: vec![WaveLayer::new(1.0, 0.0, 0.15, 12.0, 0.5), WaveLayer::new(0.6, 0.8, 0.08, 5.0, 0.4)],
            time: 0.0,
        }
    }
}

/// Frozen copy of the field for one batch of queries.
#[derive(Debug, Clone)]
pub struct WaveSnapshot {
    level: f32,
    time: f32,
    layers: Vec<WaveLayer>,
}

impl WaveSnapshot {
    pub fn displacement(&self, base: Vec2) -> Vec3 {
        self.layers.iter().map(|l| l.displacement(base, self.time)).sum()
    }
}

impl GerstnerWaves {
    pub fn advance(&mut self, dt: f32) { self.time += dt; }

    pub fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot { level: self.level, time: self.time * self.speed, layers: self.layers.clone() }
    }
}

impl HeightFieldSampler for GerstnerWaves {
    type Context = WaveSnapshot;

    fn fill_search_context(&self) -> Option<WaveSnapshot> {
        let usable = self.time.is_finite()
            && self.level.is_finite()
            && self.layers.iter().all(|l| l.wavelength > 0.0 && l.amplitude.is_finite());
        usable.then(|| self.snapshot())
    }

    /// Fixed-point search for the base point `q` with `q + D(q) = p`.
    fn project(&self, ctx: &WaveSnapshot, position: Vec3, max_iterations: u32, error_tolerance: f32) -> HeightSample {
        let target = Vec2::new(position.x, position.z);
        let mut base = target;
        let mut d = ctx.displacement(base);
        for _ in 0..max_iterations {
            let miss = base + Vec2::new(d.x, d.z) - target;
            if miss.length() <= error_tolerance {
                break;
            }
            base -= miss;
            d = ctx.displacement(base);
        }
        let height = ctx.level + d.y;
        if height.is_finite() {
            HeightSample::at(height)
        } else {
            HeightSample::INVALID
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waves_at(time: f32) -> GerstnerWaves { GerstnerWaves { time, ..GerstnerWaves::default() } }

    #[test]
    fn search_lands_on_the_query_point() {
        let waves = waves_at(1.3);
        let ctx = waves.fill_search_context().unwrap();
        let p = Vec3::new(2.7, 0.0, -1.1);
        let sample = waves.project(&ctx, p, 16, 1e-5);
        assert!(sample.valid);

        // Re-run the search by hand and check the displaced point sits on `p`.
        let mut base = Vec2::new(p.x, p.z);
        for _ in 0..16 {
            let d = ctx.displacement(base);
            base -= base + Vec2::new(d.x, d.z) - Vec2::new(p.x, p.z);
        }
        let d = ctx.displacement(base);
        assert!((base + Vec2::new(d.x, d.z) - Vec2::new(p.x, p.z)).length() < 1e-4);
        assert!((sample.height - d.y).abs() < 1e-3);
    }

    #[test]
    fn heights_stay_within_amplitude() {
        let waves = waves_at(0.4);
        let ctx = waves.fill_search_context().unwrap();
        let bound: f32 = waves.layers.iter().map(|l| l.amplitude).sum();
        for i in 0..50 {
            let p = Vec3::new(i as f32 * 0.37, 0.0, i as f32 * -0.21);
            let h = waves.project(&ctx, p, 8, 1e-3).height;
            assert!(h.abs() <= bound + 1e-4, "h={h} at {p:?}");
        }
    }

    #[test]
    fn no_layers_is_flat() {
        let waves = GerstnerWaves { level: 0.3, layers: Vec::new(), ..GerstnerWaves::default() };
        let ctx = waves.fill_search_context().unwrap();
        assert_eq!(waves.project(&ctx, Vec3::new(5.0, 0.0, 5.0), 8, 1e-3), HeightSample::at(0.3));
    }

    #[test]
    fn broken_field_has_no_context() {
        let mut waves = waves_at(f32::NAN);
        assert!(waves.fill_search_context().is_none());
        waves.time = 0.0;
        waves.layers[0].wavelength = 0.0;
        assert!(waves.fill_search_context().is_none());
    }

    #[test]
    fn waves_travel() {
        let mut waves = waves_at(0.0);
        let p = Vec3::new(1.0, 0.0, 1.0);
        let before = waves.project(&waves.fill_search_context().unwrap(), p, 8, 1e-4).height;
        waves.advance(0.5);
        let after = waves.project(&waves.fill_search_context().unwrap(), p, 8, 1e-4).height;
        assert!((before - after).abs() > 1e-3);
    }
}
