//! Bio ID Fingerprint Bridge
//!
//! Exposes a fingerprint scanner to the application layer through named
//! method calls on the `bioid_fingerprint` channel.
//!
//! The vendor SDK sits behind [`FingerprintScanner`]; until it is integrated
//! the bridge runs against [`SimulatedScanner`].

pub mod bridge;
pub mod channel;
pub mod config;
pub mod device;
pub mod error;
pub mod server;
pub mod simulated;
pub mod usb;

pub use bridge::{FingerprintBridge, Lifecycle};
pub use channel::{Command, Envelope, Method, MethodCall};
pub use config::BridgeConfig;
pub use device::{Capture, DeviceDescriptor, FingerprintScanner};
pub use error::{ArgumentError, CommandError, DeviceError, DeviceResult, LifecycleError};
pub use simulated::SimulatedScanner;
pub use usb::{UsbAction, UsbDeviceInfo, UsbEvent};
