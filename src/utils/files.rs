/// File extensions accepted by `POST /label`
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extension after the last `.`, if the name has one
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, extension)| extension)
}

/// Whether the upload's name carries an allowed image extension
///
/// Extensions match exactly (`cat.PNG` is rejected). Only the name is
/// inspected; the bytes are not sniffed.
pub fn is_allowed_file(file_name: &str) -> bool {
    file_extension(file_name)
        .map(|extension| ALLOWED_EXTENSIONS.contains(&extension))
        .unwrap_or(false)
}
