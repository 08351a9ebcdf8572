//! Scanner requests.

/// A barcode was decoded by the camera.
#[derive(Debug, Clone)]
pub struct ScanDetectedReq {
    pub code: String,
}

impl ScanDetectedReq {
    pub const PATH: &'static str = "scan/detected";
}
