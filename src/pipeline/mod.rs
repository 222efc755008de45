pub mod cipher;
pub mod frame;
pub mod kdf;
pub mod lsb;

pub use cipher::*;
pub use frame::*;
pub use kdf::*;
pub use lsb::*;
