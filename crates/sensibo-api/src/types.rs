//! Payload types for the Sensibo API.
//!
//! AC-state schemas are vendor-defined and differ per device model, so they
//! stay weakly typed (`serde_json::Map`) and pass through untouched. Only the
//! request wrappers the client builds itself are modeled here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full AC state of a device: property name to value (`on`, `mode`,
/// `targetTemperature`, `fanLevel`, ...).
pub type AcState = Map<String, Value>;

/// Climate react (smart mode) settings, e.g. `{"enabled": true}`.
pub type SmartModeSettings = BTreeMap<String, bool>;

// ── State values ─────────────────────────────────────────────────────

/// A single AC-state property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Why a property was changed. Sent only for assumed-state corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeReason {
    /// The user fixed a state the device reported wrongly (e.g. after an IR
    /// remote was used), so the device must not send an IR command.
    StateCorrectionByUser,
}

// ── Request bodies ───────────────────────────────────────────────────

/// Body of `POST /pods/{uid}/acStates`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcStatesRequest<'a> {
    pub ac_state: &'a AcState,
}

/// Body of `PATCH /pods/{uid}/acStates/{name}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcStatePropertyRequest<'a> {
    pub current_ac_state: &'a AcState,
    pub new_value: &'a StateValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ChangeReason>,
}

impl<'a> AcStatePropertyRequest<'a> {
    pub(crate) fn new(current: &'a AcState, value: &'a StateValue, assumed_state: bool) -> Self {
        Self {
            current_ac_state: current,
            new_value: value,
            reason: assumed_state.then_some(ChangeReason::StateCorrectionByUser),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_state() -> AcState {
        let Value::Object(map) = json!({
            "on": true,
            "mode": "cool",
            "targetTemperature": 22,
            "temperatureUnit": "C",
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn ac_states_request_wraps_once() {
        let state = sample_state();
        let body = serde_json::to_value(AcStatesRequest { ac_state: &state }).unwrap();
        assert_eq!(body, json!({ "acState": state }));
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[test]
    fn property_request_without_reason() {
        let state = sample_state();
        let value = StateValue::from(24);
        let body =
            serde_json::to_value(AcStatePropertyRequest::new(&state, &value, false)).unwrap();
        assert_eq!(
            body,
            json!({
                "currentAcState": state,
                "newValue": 24,
            })
        );
        assert!(body.get("reason").is_none());
    }

    #[test]
    fn property_request_with_assumed_state() {
        let state = sample_state();
        let value = StateValue::from(false);
        let body =
            serde_json::to_value(AcStatePropertyRequest::new(&state, &value, true)).unwrap();
        assert_eq!(
            body,
            json!({
                "currentAcState": state,
                "newValue": false,
                "reason": "StateCorrectionByUser",
            })
        );
    }

    #[test]
    fn state_value_is_untagged() {
        assert_eq!(serde_json::to_value(StateValue::from(true)).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(StateValue::from(18_i64)).unwrap(), json!(18));
        assert_eq!(serde_json::to_value(StateValue::from("heat")).unwrap(), json!("heat"));

        let parsed: StateValue = serde_json::from_value(json!("auto")).unwrap();
        assert_eq!(parsed, StateValue::Str("auto".into()));
        let parsed: StateValue = serde_json::from_value(json!(21)).unwrap();
        assert_eq!(parsed, StateValue::Int(21));
    }
}
