/**
 * Channel protocol
 * Method calls in, envelopes out
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::ArgumentError;

pub const DEFAULT_CHANNEL: &str = "bioid_fingerprint";

/// A call as it arrives from the application layer. `arguments` is left
/// untyped here; absent and `null` are both accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_arguments(mut self, arguments: impl Into<Value>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Adds one named argument, replacing a non-map argument value.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.arguments.is_object() {
            self.arguments = Value::Object(Map::new());
        }
        if let Value::Object(arguments) = &mut self.arguments {
            arguments.insert(name.into(), value.into());
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    DiscoverDevices,
    ConnectToDevice,
    OpenDevice,
    CloseDevice,
    DetectFinger,
    CaptureFingerprint,
    GetDeviceInfo,
    GetDeviceSerialNumber,
}

impl Method {
    pub const ALL: [Method; 8] = [
        Method::DiscoverDevices,
        Method::ConnectToDevice,
        Method::OpenDevice,
        Method::CloseDevice,
        Method::DetectFinger,
        Method::CaptureFingerprint,
        Method::GetDeviceInfo,
        Method::GetDeviceSerialNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::DiscoverDevices => "discoverDevices",
            Method::ConnectToDevice => "connectToDevice",
            Method::OpenDevice => "openDevice",
            Method::CloseDevice => "closeDevice",
            Method::DetectFinger => "detectFinger",
            Method::CaptureFingerprint => "captureFingerprint",
            Method::GetDeviceInfo => "getDeviceInfo",
            Method::GetDeviceSerialNumber => "getDeviceSerialNumber",
        }
    }

    /// Classification code reported when this command fails.
    pub fn error_code(self) -> &'static str {
        match self {
            Method::DiscoverDevices => "DISCOVERY_ERROR",
            Method::ConnectToDevice => "CONNECTION_ERROR",
            Method::OpenDevice => "OPEN_ERROR",
            Method::CloseDevice => "CLOSE_ERROR",
            Method::DetectFinger => "DETECT_ERROR",
            Method::CaptureFingerprint => "CAPTURE_ERROR",
            Method::GetDeviceInfo => "INFO_ERROR",
            Method::GetDeviceSerialNumber => "SERIAL_ERROR",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| UnknownMethod(name.to_string()))
    }
}

/// A validated request, one variant per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    DiscoverDevices,
    ConnectToDevice { device_id: String },
    OpenDevice,
    CloseDevice,
    DetectFinger,
    CaptureFingerprint { finger: String },
    GetDeviceInfo,
    GetDeviceSerialNumber,
}

impl Command {
    /// Commands without parameters accept any argument value.
    pub fn parse(method: Method, arguments: &Value) -> Result<Self, ArgumentError> {
        Ok(match method {
            Method::DiscoverDevices => Command::DiscoverDevices,
            Method::ConnectToDevice => Command::ConnectToDevice {
                device_id: string_argument(arguments, "deviceId")?,
            },
            Method::OpenDevice => Command::OpenDevice,
            Method::CloseDevice => Command::CloseDevice,
            Method::DetectFinger => Command::DetectFinger,
            Method::CaptureFingerprint => Command::CaptureFingerprint {
                finger: string_argument(arguments, "finger")?,
            },
            Method::GetDeviceInfo => Command::GetDeviceInfo,
            Method::GetDeviceSerialNumber => Command::GetDeviceSerialNumber,
        })
    }

    pub fn method(&self) -> Method {
        match self {
            Command::DiscoverDevices => Method::DiscoverDevices,
            Command::ConnectToDevice { .. } => Method::ConnectToDevice,
            Command::OpenDevice => Method::OpenDevice,
            Command::CloseDevice => Method::CloseDevice,
            Command::DetectFinger => Method::DetectFinger,
            Command::CaptureFingerprint { .. } => Method::CaptureFingerprint,
            Command::GetDeviceInfo => Method::GetDeviceInfo,
            Command::GetDeviceSerialNumber => Method::GetDeviceSerialNumber,
        }
    }
}

fn string_argument(arguments: &Value, name: &'static str) -> Result<String, ArgumentError> {
    let arguments = match arguments {
        Value::Object(arguments) => arguments,
        Value::Null => return Err(ArgumentError::Missing(name)),
        _ => return Err(ArgumentError::NotAMap),
    };

    match arguments.get(name) {
        None | Some(Value::Null) => Err(ArgumentError::Missing(name)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ArgumentError::WrongType {
            name,
            expected: "string",
        }),
    }
}

/// Exactly one of these is produced per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Envelope {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl Envelope {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Envelope::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
