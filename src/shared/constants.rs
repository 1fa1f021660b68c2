pub const APP_NAME: &str = "snapcollect";

pub const CONFIG_FILE: &str = "snapcollect.config";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

pub const DEFAULT_BASE_DIR: &str = "collected_data";
pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const DEFAULT_CATEGORIES: &[&str] = &["mug", "watch", "spoon", "cap", "comb"];
pub const DEFAULT_POLL_MS: i32 = 1;
pub const DEFAULT_JPEG_QUALITY: i32 = 95;

pub const SNAPSHOT_EXTENSION: &str = "jpg";
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

pub const NORMALIZE_DEFAULT_DIR: &str = "dataset/all";
pub const NORMALIZE_MARKER: &str = "_jpg";

// Windows
pub const FEED_WINDOW: &str = "Webcam Feed";
pub const PICKER_WINDOW: &str = "Select Category";

// Status band at the bottom of the feed
pub const STATUS_BAND_HEIGHT: i32 = 80;
pub const STATUS_LINE_OFFSET: i32 = 55;
pub const CATEGORY_LINE_OFFSET: i32 = 30;
pub const COUNTER_RIGHT_INSET: i32 = 200;
pub const TEXT_MARGIN: i32 = 10;
pub const FONT_SCALE: f64 = 0.7;
pub const FONT_THICKNESS: i32 = 2;

// Category picker geometry
pub const PICKER_WIDTH: i32 = 400;
pub const PICKER_HEIGHT: i32 = 300;
pub const PICKER_SIDE_MARGIN: i32 = 50;
pub const PICKER_TOP: i32 = 50;
pub const PICKER_BUTTON_HEIGHT: i32 = 40;
pub const PICKER_BUTTON_MARGIN: i32 = 10;
pub const PICKER_SETTLE_MS: i32 = 100;
pub const PICKER_POLL_MS: i32 = 1;

pub const CONTROLS_LEGEND: &[&str] = &[
    "'s' - Select category",
    "'b' - Begin collection",
    "'e' - End collection",
    "SPACE - Capture image",
    "'q' - Quit application",
];
