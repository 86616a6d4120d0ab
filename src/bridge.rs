/**
 * Fingerprint Bridge
 * Session object that owns the scanner, tracks the device handle and
 * answers every method call with exactly one envelope
 */

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::channel::{Command, Envelope, Method, MethodCall, UnknownMethod};
use crate::device::{DeviceDescriptor, FingerprintScanner};
use crate::error::{CommandError, DeviceError, LifecycleError};
use crate::usb::{UsbAction, UsbEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Attached,
    Detached,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectResponse {
    success: bool,
    device_id: String,
    message: String,
}

#[derive(Serialize)]
struct CaptureResponse {
    success: bool,
    template: String,
    quality: f64,
}

pub struct FingerprintBridge<S> {
    scanner: S,
    lifecycle: Lifecycle,
    device_open: bool,
}

impl<S: FingerprintScanner> FingerprintBridge<S> {
    /// Creates a detached bridge. Call [`attach`](Self::attach) before invoking.
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            lifecycle: Lifecycle::Detached,
            device_open: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_device_open(&self) -> bool {
        self.device_open
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn attach(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle == Lifecycle::Attached {
            return Err(LifecycleError::AlreadyAttached);
        }
        self.lifecycle = Lifecycle::Attached;
        info!("Fingerprint bridge attached");
        Ok(())
    }

    /// Releases the device handle, then stops accepting commands.
    pub async fn detach(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle == Lifecycle::Detached {
            return Err(LifecycleError::NotAttached);
        }

        if self.device_open {
            match self.scanner.close().await {
                Ok(code) => debug!("Device closed during detach, result code: {}", code),
                Err(e) => warn!("Error closing device during detach: {}", e),
            }
            self.device_open = false;
        }

        self.lifecycle = Lifecycle::Detached;
        info!("Fingerprint bridge detached");
        Ok(())
    }

    pub async fn invoke(&mut self, call: MethodCall) -> Envelope {
        if self.lifecycle == Lifecycle::Detached {
            debug!("Dropping {} while detached", call.method);
            return Envelope::NotImplemented;
        }

        let method = match call.method.parse::<Method>() {
            Ok(method) => method,
            Err(UnknownMethod(name)) => {
                warn!("Method not implemented: {}", name);
                return Envelope::NotImplemented;
            }
        };

        match self.execute(method, &call.arguments).await {
            Ok(result) => Envelope::Success { result },
            Err(e) => {
                error!("{} failed: {}", method, e);
                Envelope::error(method.error_code(), e.to_string())
            }
        }
    }

    async fn execute(
        &mut self,
        method: Method,
        arguments: &Value,
    ) -> Result<Value, CommandError> {
        let result = match Command::parse(method, arguments)? {
            Command::DiscoverDevices => serde_json::to_value(self.discover_devices().await?)?,
            Command::ConnectToDevice { device_id } => {
                serde_json::to_value(self.connect_to_device(device_id).await?)?
            }
            Command::OpenDevice => serde_json::to_value(self.open_device().await?)?,
            Command::CloseDevice => serde_json::to_value(self.close_device().await?)?,
            Command::DetectFinger => serde_json::to_value(self.scanner.detect_finger().await?)?,
            Command::CaptureFingerprint { finger } => {
                serde_json::to_value(self.capture_fingerprint(&finger).await?)?
            }
            Command::GetDeviceInfo => serde_json::to_value(self.scanner.device_info().await?)?,
            Command::GetDeviceSerialNumber => {
                serde_json::to_value(self.scanner.serial_number().await?)?
            }
        };
        Ok(result)
    }

    async fn discover_devices(&mut self) -> Result<Vec<DeviceDescriptor>, DeviceError> {
        debug!("Discovering Bio ID devices...");
        let mut devices = self.scanner.discover().await?;

        let mut seen = HashSet::new();
        devices.retain(|device| {
            let first = seen.insert(device.id.clone());
            if !first {
                warn!("Dropping duplicate device id {}", device.id);
            }
            first
        });

        info!("Discovered {} devices", devices.len());
        Ok(devices)
    }

    async fn connect_to_device(&mut self, device_id: String) -> Result<ConnectResponse, DeviceError> {
        info!("Connecting to device: {}", device_id);

        let code = self.scanner.connect(&device_id).await?;
        if code < 0 {
            return Err(DeviceError::Sdk {
                operation: "connect",
                code,
            });
        }
        self.device_open = true;

        info!("Connected to device {} (result code {})", device_id, code);
        Ok(ConnectResponse {
            success: true,
            message: format!("Connected to {}", device_id),
            device_id,
        })
    }

    async fn open_device(&mut self) -> Result<i32, DeviceError> {
        if self.device_open {
            debug!("Device already open");
            return Ok(1);
        }

        let code = self.scanner.open().await?;
        if code < 0 {
            return Err(DeviceError::Sdk {
                operation: "open",
                code,
            });
        }
        self.device_open = true;

        info!("Device opened, result code: {}", code);
        Ok(code)
    }

    async fn close_device(&mut self) -> Result<bool, DeviceError> {
        if !self.device_open {
            debug!("Device already closed");
            return Ok(true);
        }

        let code = self.scanner.close().await?;
        self.device_open = false;

        info!("Device closed, result code: {}", code);
        Ok(code == 0)
    }

    async fn capture_fingerprint(&mut self, finger: &str) -> Result<CaptureResponse, DeviceError> {
        info!("Capturing fingerprint for: {}", finger);

        let capture = self.scanner.capture(finger).await?;
        if capture.template.is_empty() {
            return Err(DeviceError::InvalidCapture("empty template".to_string()));
        }
        if !(0.0..=1.0).contains(&capture.quality) {
            return Err(DeviceError::InvalidCapture(format!(
                "quality {} outside [0, 1]",
                capture.quality
            )));
        }

        info!(
            "Fingerprint captured for {} with quality {:.2}, template {}",
            finger,
            capture.quality,
            template_digest(capture.template.as_bytes())
        );

        Ok(CaptureResponse {
            success: true,
            template: capture.template,
            quality: capture.quality,
        })
    }

    /// Reacts to a USB hotplug notification forwarded by the host platform.
    pub async fn handle_usb_event(&mut self, event: UsbEvent) -> UsbAction {
        if self.lifecycle == Lifecycle::Detached {
            return UsbAction::Ignored;
        }

        match event {
            UsbEvent::Attached { device } => {
                debug!("USB device attached: {}", device.label());
                if device.is_bioid_candidate() && !self.device_open {
                    self.open_from_hotplug().await
                } else {
                    UsbAction::Ignored
                }
            }
            UsbEvent::Detached { device } => {
                debug!("USB device detached: {}", device.label());
                if device.is_bioid_candidate() && self.device_open {
                    self.close_from_hotplug().await
                } else {
                    UsbAction::Ignored
                }
            }
            UsbEvent::Permission { granted: false } => {
                warn!("USB permission denied for device");
                UsbAction::Ignored
            }
            UsbEvent::Permission { granted: true } if !self.device_open => {
                self.open_from_hotplug().await
            }
            UsbEvent::Permission { .. } => UsbAction::Ignored,
        }
    }

    async fn open_from_hotplug(&mut self) -> UsbAction {
        match self.open_device().await {
            Ok(_) => UsbAction::Opened,
            Err(e) => {
                error!("Error opening device after hotplug: {}", e);
                UsbAction::Ignored
            }
        }
    }

    async fn close_from_hotplug(&mut self) -> UsbAction {
        match self.close_device().await {
            Ok(_) => UsbAction::Closed,
            Err(e) => {
                error!("Error closing device after hotplug: {}", e);
                UsbAction::Ignored
            }
        }
    }
}

fn template_digest(template: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(template);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
