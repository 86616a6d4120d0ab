/**
 * Scanner capability
 * The narrow surface the bridge needs from a fingerprint SDK
 */

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::DeviceResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub is_connected: bool,
    pub signal_strength: u8,
}

/// Output of a single capture. `template` is opaque to the bridge and is
/// sent to the caller as produced.
#[derive(Debug, Clone)]
pub struct Capture {
    pub template: String,
    pub quality: f64,
}

/// Operations a scanner SDK exposes to the bridge.
///
/// Status codes follow the vendor convention: `open`/`connect` succeed with
/// any value `>= 0`, `close` succeeds with `0`.
pub trait FingerprintScanner: Send {
    /// Lists attached scanners. Ids must be unique within one call.
    fn discover(&mut self) -> impl Future<Output = DeviceResult<Vec<DeviceDescriptor>>> + Send;

    /// Initializes the SDK for `device_id` and opens it. Returns the vendor
    /// open status; negative means the device did not open.
    fn connect(&mut self, device_id: &str) -> impl Future<Output = DeviceResult<i32>> + Send;

    /// Opens the device handle. Returns the vendor status, negative on failure.
    fn open(&mut self) -> impl Future<Output = DeviceResult<i32>> + Send;

    /// Releases the device handle. Returns the vendor status, `0` when closed cleanly.
    fn close(&mut self) -> impl Future<Output = DeviceResult<i32>> + Send;

    /// `true` when a finger is on the sensor.
    fn detect_finger(&mut self) -> impl Future<Output = DeviceResult<bool>> + Send;

    /// Captures one template for the named finger. The template must be
    /// non-empty and the quality within [0, 1].
    fn capture(&mut self, finger: &str) -> impl Future<Output = DeviceResult<Capture>> + Send;

    /// Free-form description reported by the device firmware.
    fn device_info(&mut self) -> impl Future<Output = DeviceResult<String>> + Send;

    /// Hardware serial number.
    fn serial_number(&mut self) -> impl Future<Output = DeviceResult<String>> + Send;
}
