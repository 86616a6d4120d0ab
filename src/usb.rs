/**
 * USB hotplug
 * Classifies attached devices and carries hotplug events to the bridge
 */

use serde::{Deserialize, Serialize};

const BIOID_VENDOR_IDS: [u16; 3] = [0x2808, 0x1491, 0x27C6];
const USB_CLASS_HID: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsbDeviceInfo {
    pub device_name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    #[serde(default)]
    pub device_class: u8,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
}

impl UsbDeviceInfo {
    /// Heuristic match for Bio ID scanners. HID devices count as candidates
    /// because most fingerprint readers enumerate as HID.
    pub fn is_bioid_candidate(&self) -> bool {
        if BIOID_VENDOR_IDS.contains(&self.vendor_id) || self.device_class == USB_CLASS_HID {
            return true;
        }

        let device_name = self.device_name.to_lowercase();
        let manufacturer = self
            .manufacturer_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let product = self.product_name.as_deref().unwrap_or_default().to_lowercase();

        device_name.contains("bioid")
            || device_name.contains("fingerprint")
            || manufacturer.contains("bioid")
            || product.contains("fingerprint")
    }

    pub fn label(&self) -> String {
        format!(
            "{} (VID=0x{:04X}, PID=0x{:04X})",
            self.device_name, self.vendor_id, self.product_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UsbEvent {
    Attached { device: UsbDeviceInfo },
    Detached { device: UsbDeviceInfo },
    Permission { granted: bool },
}

/// What the bridge did in response to a hotplug event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsbAction {
    Opened,
    Closed,
    Ignored,
}
