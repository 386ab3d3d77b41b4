pub mod cipher;
pub mod compress;
pub mod kdf;

pub use cipher::*;
pub use compress::*;
pub use kdf::*;
