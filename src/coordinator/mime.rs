pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for a file name, judged by its extension only.
pub fn content_type_for(file_name: &str) -> &'static str {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// `Content-Disposition` value offering `file_name` as a download.
pub fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
