use serde::Serialize;

/// What `probe` prints for the selected device.
#[derive(Debug, Serialize)]
pub struct CameraReport {
    pub index: i32,
    pub backend: String,
    pub width: i32,
    pub height: i32,
    pub fps: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = CameraReport {
            index: 0,
            backend: "V4L2".to_string(),
            width: 640,
            height: 480,
            fps: 30.0,
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backend"], "V4L2");
        assert_eq!(json["width"], 640);
        assert_eq!(json["fps"], 30.0);
    }
}
