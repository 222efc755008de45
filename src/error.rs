use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message is too long for this image: needs {required_bits} bits, carrier holds {available_bits}")]
    Capacity {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Authentication failed: incorrect passphrase or corrupted data")]
    AuthFailure,

    #[error("No hidden message found")]
    NotFound,

    #[error("Invalid carrier: {0}")]
    InvalidCarrier(String),

    #[error("Refusing lossy output format '{0}': hidden bits would not survive. Use png or bmp")]
    LossyFormat(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, StegError>;
