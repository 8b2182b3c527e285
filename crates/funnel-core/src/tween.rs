//! Typed transition descriptors advanced once per tick.

use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out; used for short highlight fades.
    EaseOutQuad,
    /// Cubic ease-in-out; used for layout and camera transitions.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

#[derive(Clone, Debug)]
pub struct Tween<T> {
    start: T,
    end: T,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, end: T, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    pub fn value(&self) -> T {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.start.lerp(self.end, t)
    }

    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}

/// Advance an optional tween in place, clearing the slot once it finishes.
/// Returns the new value when a tween was running.
pub fn step<T: Lerp>(slot: &mut Option<Tween<T>>, dt: f32) -> Option<T> {
    let tween = slot.as_mut()?;
    let value = tween.advance(dt);
    if tween.is_finished() {
        *slot = None;
    }
    Some(value)
}
