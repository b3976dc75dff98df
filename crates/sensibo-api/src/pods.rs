// Sensibo pod (device) endpoints
//
// Device listing and detail, climate react (smart mode), schedules, and AC
// state changes. Payloads are returned as raw JSON: device schemas vary per
// model and are not interpreted here.

use serde_json::Value;
use tracing::debug;

use crate::client::SensiboClient;
use crate::error::Error;
use crate::types::{AcState, AcStatePropertyRequest, AcStatesRequest, SmartModeSettings, StateValue};

/// Field selector asking for every field of a device.
const ALL_FIELDS: &str = "*";

impl SensiboClient {
    /// List all devices of the account.
    ///
    /// `GET /users/me/pods?fields=...`. `None` requests all fields.
    pub async fn get_devices(&self, fields: Option<&str>) -> Result<Value, Error> {
        let fields = fields.unwrap_or(ALL_FIELDS);
        self.get("/users/me/pods", &[("fields", fields)]).await
    }

    /// Get a single device by uid.
    ///
    /// `GET /pods/{uid}?fields=...`. `None` requests all fields.
    pub async fn get_device(&self, uid: &str, fields: Option<&str>) -> Result<Value, Error> {
        let fields = fields.unwrap_or(ALL_FIELDS);
        self.get(&format!("/pods/{uid}"), &[("fields", fields)]).await
    }

    /// Current climate react (smart mode) settings of a device.
    ///
    /// `GET /pods/{uid}/smartmode`
    pub async fn get_climate_react(&self, uid: &str) -> Result<Value, Error> {
        self.get(&format!("/pods/{uid}/smartmode"), &[]).await
    }

    /// Apply climate react (smart mode) settings.
    ///
    /// `PUT /pods/{uid}/smartmode` with the settings as body.
    pub async fn set_climate_react(
        &self,
        uid: &str,
        settings: &SmartModeSettings,
    ) -> Result<Value, Error> {
        debug!(uid, ?settings, "setting climate react");
        self.put(&format!("/pods/{uid}/smartmode"), &[], settings).await
    }

    /// Schedules configured on a device.
    ///
    /// `GET /pods/{uid}/schedules/`
    pub async fn get_schedules(&self, uid: &str) -> Result<Value, Error> {
        self.get(&format!("/pods/{uid}/schedules/"), &[]).await
    }

    /// Submit a full desired AC state.
    ///
    /// `POST /pods/{uid}/acStates` with `{"acState": ...}`
    pub async fn set_ac_states(&self, uid: &str, ac_state: &AcState) -> Result<Value, Error> {
        debug!(uid, "setting AC state");
        let body = AcStatesRequest { ac_state };
        self.post(&format!("/pods/{uid}/acStates"), &[], &body).await
    }

    /// Change one AC-state property.
    ///
    /// `PATCH /pods/{uid}/acStates/{name}` with
    /// `{"currentAcState": ..., "newValue": ...}`. With `assumed_state` the
    /// body also carries `"reason": "StateCorrectionByUser"`, which records
    /// the change without the device sending a command to the AC unit.
    pub async fn set_ac_state_property(
        &self,
        uid: &str,
        name: &str,
        value: impl Into<StateValue>,
        ac_state: &AcState,
        assumed_state: bool,
    ) -> Result<Value, Error> {
        let value = value.into();
        debug!(uid, property = name, ?value, assumed_state, "setting AC state property");
        let body = AcStatePropertyRequest::new(ac_state, &value, assumed_state);
        self.patch(&format!("/pods/{uid}/acStates/{name}"), &[], &body).await
    }
}
