use crate::error::HelixError;

/// Minimum sequence length in base pairs.
pub const MIN_LENGTH: usize = 6;
/// Maximum sequence length in base pairs.
pub const MAX_LENGTH: usize = 60;
/// Minimum twist angle, degrees per base pair.
pub const TWIST_MIN: f32 = 30.0;
/// Maximum twist angle, degrees per base pair.
pub const TWIST_MAX: f32 = 36.0;
/// Maximum spin speed, radians per second.
pub const SPIN_SPEED_MAX: f32 = 5.0;

/// Rendering/interaction parameters. Purely a view configuration: no
/// invariant links it to the sequence beyond `length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Sequence length in base pairs, `[6, 60]`.
    pub length: usize,
    /// Twist angle in degrees per base pair, `[30, 36]`.
    pub twist: f32,
    /// Whether the helix group spins continuously.
    pub auto_spin: bool,
    /// Spin speed in radians per second, `[0, 5]`.
    pub spin_speed: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            length: 20,
            twist: 34.0,
            auto_spin: true,
            spin_speed: 0.5,
        }
    }
}

impl ViewState {
    /// Set the length, clamped to `[6, 60]`.
    pub fn set_length(&mut self, length: usize) {
        self.length = length.clamp(MIN_LENGTH, MAX_LENGTH);
    }

    /// Set the twist, clamped to `[30, 36]` degrees.
    pub fn set_twist(&mut self, twist: f32) {
        self.twist = twist.clamp(TWIST_MIN, TWIST_MAX);
    }

    /// Set the spin speed, clamped to `[0, 5]` radians per second.
    pub fn set_spin_speed(&mut self, speed: f32) {
        self.spin_speed = speed.clamp(0.0, SPIN_SPEED_MAX);
    }

    /// Fail-fast range check for callers driving the model directly instead
    /// of going through the clamping setters.
    ///
    /// # Errors
    ///
    /// `LengthOutOfRange` or `TwistOutOfRange` for the first field found
    /// outside its declared range.
    pub fn validate(&self) -> Result<(), HelixError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(HelixError::LengthOutOfRange(self.length));
        }
        if !(TWIST_MIN..=TWIST_MAX).contains(&self.twist) {
            return Err(HelixError::TwistOutOfRange(self.twist));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_initial_scene() {
        let state = ViewState::default();
        assert_eq!(state.length, 20);
        assert_eq!(state.twist, 34.0);
        assert!(state.auto_spin);
        assert_eq!(state.spin_speed, 0.5);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn setters_clamp_to_declared_ranges() {
        let mut state = ViewState::default();
        state.set_length(1);
        assert_eq!(state.length, MIN_LENGTH);
        state.set_length(200);
        assert_eq!(state.length, MAX_LENGTH);
        state.set_twist(10.0);
        assert_eq!(state.twist, TWIST_MIN);
        state.set_twist(90.0);
        assert_eq!(state.twist, TWIST_MAX);
        state.set_spin_speed(-1.0);
        assert_eq!(state.spin_speed, 0.0);
        state.set_spin_speed(9.0);
        assert_eq!(state.spin_speed, SPIN_SPEED_MAX);
    }

    #[test]
    fn validate_reports_the_offending_field() {
        let mut state = ViewState::default();
        state.length = 100;
        assert!(matches!(
            state.validate(),
            Err(HelixError::LengthOutOfRange(100))
        ));
        state.length = 20;
        state.twist = 29.0;
        assert!(matches!(
            state.validate(),
            Err(HelixError::TwistOutOfRange(_))
        ));
    }
}
