//! Die roll with a decelerating flicker
//!
//! A roll lasts a random duration. Until it runs out, each step shows a new
//! face and says how long to wait before the next one; the wait grows linearly
//! from `min_interval` to `max_interval` with progress. The final face is an
//! independent draw.

use rand::Rng;

use crate::consts::DIE_FACES;
use crate::lerp;

/// Uniform face in 1..=6
pub fn random_face<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=DIE_FACES)
}

/// Uniform face in 1..=6 other than `prev`
pub fn random_face_except<R: Rng + ?Sized>(rng: &mut R, prev: u8) -> u8 {
    if !(1..=DIE_FACES).contains(&prev) {
        return random_face(rng);
    }
    let face = rng.random_range(1..DIE_FACES);
    if face >= prev { face + 1 } else { face }
}

/// Outcome of one roll step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollStep {
    /// Show `face`, then step again after `next_in` seconds
    Flicker { face: u8, next_in: f32 },
    /// The die stopped on `face`
    Final(u8),
}

/// One spin of the die
#[derive(Debug, Clone)]
pub struct DieRoll {
    duration: f32,
    min_interval: f32,
    max_interval: f32,
    last_flicker: Option<u8>,
    final_face: Option<u8>,
}

impl DieRoll {
    pub fn new(duration: f32, min_interval: f32, max_interval: f32) -> Self {
        Self {
            duration,
            min_interval,
            max_interval,
            last_flicker: None,
            final_face: None,
        }
    }

    /// Draw a spin duration uniformly from `[min, max]`
    pub fn random_duration<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
        if max > min {
            rng.random_range(min..=max)
        } else {
            min
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.final_face.is_some()
    }

    pub fn final_face(&self) -> Option<u8> {
        self.final_face
    }

    /// Spin progress in [0, 1]
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Wait before the next flicker at the given elapsed time
    pub fn interval_at(&self, elapsed: f32) -> f32 {
        lerp(self.min_interval, self.max_interval, self.progress(elapsed))
    }

    /// Advance the roll. `elapsed` is time since the roll started.
    /// Once complete, keeps returning the same final face.
    pub fn step<R: Rng + ?Sized>(&mut self, elapsed: f32, rng: &mut R) -> RollStep {
        if let Some(face) = self.final_face {
            return RollStep::Final(face);
        }
        if self.duration <= 0.0 || elapsed >= self.duration {
            let face = random_face(rng);
            self.final_face = Some(face);
            return RollStep::Final(face);
        }

        let face = match self.last_flicker {
            Some(prev) => random_face_except(rng, prev),
            None => random_face(rng),
        };
        self.last_flicker = Some(face);
        RollStep::Flicker {
            face,
            next_in: self.interval_at(elapsed),
        }
    }
}
