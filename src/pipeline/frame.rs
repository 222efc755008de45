use crate::header::TERMINATOR;

/// Append the end-of-message marker to a wire string
pub fn frame(wire: &str) -> String {
    let mut framed = String::with_capacity(wire.len() + TERMINATOR.len());
    framed.push_str(wire);
    framed.push_str(TERMINATOR);
    framed
}

/// Byte offset of the first marker in a candidate byte stream
pub fn terminator_position(bytes: &[u8]) -> Option<usize> {
    let marker = TERMINATOR.as_bytes();
    bytes.windows(marker.len()).position(|w| w == marker)
}

/// Return the text before the first marker, or None if there is no marker
pub fn unframe(text: &str) -> Option<&str> {
    terminator_position(text.as_bytes()).map(|end| &text[..end])
}
