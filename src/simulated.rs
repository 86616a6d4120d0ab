/**
 * Simulated Scanner
 * Stands in for the Bio ID SDK until the vendor library is integrated
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::device::{Capture, DeviceDescriptor, FingerprintScanner};
use crate::error::DeviceResult;

const SIMULATED_QUALITY: f64 = 0.85;

pub struct SimulatedScanner {
    connect_delay: Duration,
}

impl SimulatedScanner {
    pub fn new(connect_delay: Duration) -> Self {
        Self { connect_delay }
    }
}

impl FingerprintScanner for SimulatedScanner {
    async fn discover(&mut self) -> DeviceResult<Vec<DeviceDescriptor>> {
        // Real discovery walks the USB device list for the vendor's VID/PID pairs.
        Ok(vec![
            DeviceDescriptor {
                id: "bio-id-001".to_string(),
                name: "Bio ID Scanner 1".to_string(),
                manufacturer: "Bio ID".to_string(),
                model: "Professional Scanner".to_string(),
                is_connected: false,
                signal_strength: 95,
            },
            DeviceDescriptor {
                id: "bio-id-002".to_string(),
                name: "Bio ID Scanner 2".to_string(),
                manufacturer: "Bio ID".to_string(),
                model: "Compact Scanner".to_string(),
                is_connected: false,
                signal_strength: 88,
            },
        ])
    }

    async fn connect(&mut self, device_id: &str) -> DeviceResult<i32> {
        debug!("Simulating connection to {} ({:?})", device_id, self.connect_delay);
        tokio::time::sleep(self.connect_delay).await;
        Ok(1)
    }

    async fn open(&mut self) -> DeviceResult<i32> {
        Ok(1)
    }

    async fn close(&mut self) -> DeviceResult<i32> {
        Ok(0)
    }

    async fn detect_finger(&mut self) -> DeviceResult<bool> {
        Ok(true)
    }

    async fn capture(&mut self, finger: &str) -> DeviceResult<Capture> {
        // The SDK path is getImage -> enroll -> uploadFeature; a real adapter
        // encodes the uploaded feature bytes into the template string.
        debug!("Simulating capture for {}", finger);
        Ok(Capture {
            template: format!("mock_template_data_{}", unix_millis()),
            quality: SIMULATED_QUALITY,
        })
    }

    async fn device_info(&mut self) -> DeviceResult<String> {
        Ok("Bio ID Device v1.0".to_string())
    }

    async fn serial_number(&mut self) -> DeviceResult<String> {
        Ok(format!("BIOID{}", unix_millis()))
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
