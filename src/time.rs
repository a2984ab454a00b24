use chrono::Local;

/// Format used in generated report file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn now_file_stamp() -> String {
    Local::now().format(FILE_STAMP_FORMAT).to_string()
}

pub fn now_log_stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
