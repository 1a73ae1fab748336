use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Standard (padded) base64 of raw image bytes, as the detection service expects
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}
