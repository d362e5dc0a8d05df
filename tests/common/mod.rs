//! 集成测试共用的节点构造工具

#![allow(dead_code)]

use alloy_primitives::{keccak256, B256, U256};
use trie_proof::rlp::{encode_bytes, encode_list, encode_raw_list};
use trie_proof::trie::nibbles::{encode_path, key_to_nibbles};

/// 存储槽在存储树中的键：keccak256(slot)
pub fn slot_key(slot: u64) -> B256 {
    keccak256(U256::from(slot).to_be_bytes::<32>())
}

pub fn leaf(path: &[u8], value: &[u8]) -> Vec<u8> {
    encode_list(&[encode_path(path, true), value.to_vec()])
}

pub fn extension(path: &[u8], child_ref: Vec<u8>) -> Vec<u8> {
    encode_raw_list(&[encode_bytes(&encode_path(path, false)), child_ref])
}

pub fn branch(children: &[(usize, Vec<u8>)], value: &[u8]) -> Vec<u8> {
    let mut items = vec![encode_bytes(&[]); 17];
    for (index, child_ref) in children {
        items[*index] = child_ref.clone();
    }
    items[16] = encode_bytes(value);
    encode_raw_list(&items)
}

/// 子节点引用：编码小于 32 字节时内嵌，否则取哈希
pub fn node_ref(node: &[u8]) -> Vec<u8> {
    if node.len() < 32 {
        node.to_vec()
    } else {
        encode_bytes(keccak256(node).as_slice())
    }
}

/// 两个键的最小 Trie
///
/// 返回 (根哈希, 键 a 的证明, 键 b 的证明)
pub fn two_leaf_trie(key_a: &[u8], value_a: &[u8], key_b: &[u8], value_b: &[u8]) -> (B256, Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let nibbles_a = key_to_nibbles(key_a);
    let nibbles_b = key_to_nibbles(key_b);
    let shared = nibbles_a
        .iter()
        .zip(&nibbles_b)
        .take_while(|(a, b)| a == b)
        .count();
    assert!(shared < nibbles_a.len().min(nibbles_b.len()), "keys must diverge");

    let leaf_a = leaf(&nibbles_a[shared + 1..], value_a);
    let leaf_b = leaf(&nibbles_b[shared + 1..], value_b);
    let branch_node = branch(
        &[
            (nibbles_a[shared] as usize, node_ref(&leaf_a)),
            (nibbles_b[shared] as usize, node_ref(&leaf_b)),
        ],
        &[],
    );

    let mut prefix = Vec::new();
    if shared > 0 {
        prefix.push(extension(&nibbles_a[..shared], node_ref(&branch_node)));
    }
    prefix.push(branch_node);

    let root = keccak256(&prefix[0]);
    let mut proof_a = prefix.clone();
    proof_a.push(leaf_a);
    let mut proof_b = prefix;
    proof_b.push(leaf_b);

    (root, proof_a, proof_b)
}
