//! Scripted event reward documents.
//!
//! ```json
//! { "experience": 40, "gold": 15, "items": [3], "statusEffects": [], "multiplier": 1.5 }
//! ```
//!
//! Every field except `multiplier` (default 1.0) is required, and unknown
//! fields are rejected, so a typo in content fails the run instead of
//! silently paying nothing.

use serde::{Deserialize, Serialize};

use super::errors::ConfigurationError;
use crate::env::ScriptedEventDefinition;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ScriptedPayload {
    pub experience: u64,
    pub gold: u64,
    pub items: Vec<u32>,
    pub status_effects: Vec<u32>,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl ScriptedPayload {
    /// # Errors
    ///
    /// [`ConfigurationError::MalformedScriptedPayload`] on invalid JSON, a
    /// missing or unknown field, or a negative multiplier.
    pub fn parse(event: &ScriptedEventDefinition) -> Result<Self, ConfigurationError> {
        let malformed = |reason: String| ConfigurationError::MalformedScriptedPayload {
            event_id: event.id,
            reason,
        };
        let payload: Self =
            serde_json::from_str(&event.payload).map_err(|err| malformed(err.to_string()))?;
        if !payload.multiplier.is_finite() || payload.multiplier < 0.0 {
            return Err(malformed(format!("invalid multiplier {}", payload.multiplier)));
        }
        Ok(payload)
    }

    /// Scaled experience, rounded half away from zero.
    pub fn scaled_experience(&self, scale: f64) -> u64 {
        scale_reward(self.experience, self.multiplier * scale)
    }

    pub fn scaled_gold(&self, scale: f64) -> u64 {
        scale_reward(self.gold, self.multiplier * scale)
    }
}

fn scale_reward(base: u64, factor: f64) -> u64 {
    let value = (base as f64 * factor).round();
    if value.is_finite() { value.max(0.0) as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payload: &str) -> ScriptedEventDefinition {
        ScriptedEventDefinition {
            id: 21,
            name: "Abandoned Camp".into(),
            floor_min: 1,
            floor_max: 3,
            weights: Default::default(),
            payload: payload.into(),
        }
    }

    #[test]
    fn multiplier_defaults_to_one() {
        let payload = ScriptedPayload::parse(&event(
            r#"{"experience": 40, "gold": 15, "items": [3], "statusEffects": []}"#,
        ))
        .unwrap();
        assert_eq!(payload.multiplier, 1.0);
        assert_eq!(payload.items, vec![3]);
        assert_eq!(payload.scaled_experience(1.0), 40);
    }

    #[test]
    fn multiplier_scales_rewards() {
        let payload = ScriptedPayload::parse(&event(
            r#"{"experience": 5, "gold": 3, "items": [], "statusEffects": [2], "multiplier": 1.5}"#,
        ))
        .unwrap();
        assert_eq!(payload.scaled_experience(1.0), 8);
        assert_eq!(payload.scaled_gold(2.0), 9);
    }

    #[test]
    fn missing_and_unknown_fields_are_rejected() {
        for body in [
            r#"{"experience": 1, "gold": 1, "items": []}"#,
            r#"{"experience": 1, "gold": 1, "items": [], "statusEffects": [], "bonus": 2}"#,
            r#"{"experience": -1, "gold": 1, "items": [], "statusEffects": []}"#,
            r#"{"experience": 1, "gold": 1, "items": [], "statusEffects": [], "multiplier": -2}"#,
            "not json",
        ] {
            let err = ScriptedPayload::parse(&event(body)).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::MalformedScriptedPayload { event_id: 21, .. }),
                "{body}"
            );
        }
    }
}
