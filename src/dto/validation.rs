//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dao::models::SliderValues;

const NICKNAME_MAX: usize = 32;
const SLIDER_MIN: f32 = 0.0;
const SLIDER_MAX: f32 = 5.0;

/// Validates that a nickname is non-blank and at most 32 characters.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    if nickname.trim().is_empty() {
        let mut err = ValidationError::new("nickname_blank");
        err.message = Some("Nickname must not be blank".into());
        return Err(err);
    }

    if nickname.chars().count() > NICKNAME_MAX {
        let mut err = ValidationError::new("nickname_length");
        err.message =
            Some(format!("Nickname must be at most {NICKNAME_MAX} characters").into());
        return Err(err);
    }

    Ok(())
}

/// Validates that every slider axis is inside `[0, 5]` and finite.
pub fn validate_sliders(sliders: &SliderValues) -> Result<(), ValidationError> {
    for (axis, value) in sliders.axes() {
        if !value.is_finite() || !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
            let mut err = ValidationError::new("slider_range");
            err.message = Some(
                format!("Slider `{axis}` must be between {SLIDER_MIN} and {SLIDER_MAX}").into(),
            );
            return Err(err);
        }
    }

    Ok(())
}

/// Validates that a vote value is +1 (like) or -1 (dislike).
pub fn validate_vote_value(value: i8) -> Result<(), ValidationError> {
    if value != 1 && value != -1 {
        let mut err = ValidationError::new("vote_value");
        err.message = Some("Vote value must be 1 or -1".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_accepts_reasonable_names() {
        assert!(validate_nickname("ana").is_ok());
        assert!(validate_nickname("Movie Fan 42").is_ok());
    }

    #[test]
    fn nickname_rejects_blank_and_oversized() {
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname("   ").is_err());
        assert!(validate_nickname(&"x".repeat(33)).is_err());
    }

    #[test]
    fn sliders_must_stay_in_range() {
        let mut sliders = SliderValues::default();
        assert!(validate_sliders(&sliders).is_ok());

        sliders.safe_scary = 5.0;
        assert!(validate_sliders(&sliders).is_ok());

        sliders.safe_scary = 5.1;
        assert!(validate_sliders(&sliders).is_err());

        sliders.safe_scary = -0.1;
        assert!(validate_sliders(&sliders).is_err());

        sliders.safe_scary = f32::NAN;
        assert!(validate_sliders(&sliders).is_err());
    }

    #[test]
    fn vote_value_is_plus_or_minus_one() {
        assert!(validate_vote_value(1).is_ok());
        assert!(validate_vote_value(-1).is_ok());
        assert!(validate_vote_value(0).is_err());
        assert!(validate_vote_value(2).is_err());
    }
}
