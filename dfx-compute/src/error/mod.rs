pub mod kind;

pub use dfx_error::Error;
