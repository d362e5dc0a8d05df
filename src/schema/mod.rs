//! 数据结构定义
//!
//! 定义 Trie 叶子中存放的记录

pub mod account;

pub use account::{TrieAccount, EMPTY_CODE_HASH, EMPTY_STORAGE_ROOT};
