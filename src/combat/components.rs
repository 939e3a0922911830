//! Combat stats shared by every actor.

/// Hit points with per-tick regeneration.
///
/// `current` is allowed to drop below zero; an actor is dead once it does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
    /// Health regained per tick.
    pub regen: f32,
}

impl Health {
    pub fn new(current: f32, maximum: f32, regen: f32) -> Self {
        Self {
            current,
            maximum,
            regen,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current -= amount;
    }

    /// Regenerate one tick's worth without passing the maximum, and pull an
    /// overfull value back down. Returns whether the value changed.
    pub fn regenerate(&mut self) -> bool {
        let before = self.current;
        if self.current < self.maximum {
            self.current = (self.current + self.regen).min(self.maximum);
        } else if self.current > self.maximum {
            self.current = self.maximum;
        }
        self.current != before
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}
