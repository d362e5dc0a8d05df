//! 工具模块

pub mod hash;

pub use hash::{bytes_to_hex, hex_to_bytes, keccak256_hash};
