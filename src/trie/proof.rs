//! Merkle 证明校验
//!
//! 用于轻节点验证账户状态和存储值（EIP-1186 / `eth_getProof`）

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::rlp::encode_u256;
use crate::schema::TrieAccount;
use super::hasher::{Keccak256Hasher, NodeHasher};
use super::verifier::TrieVerifier;
use super::TrieError;

/// Merkle 证明
///
/// 包含从根节点到叶子节点的路径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Trie 中的键（已哈希的地址或存储槽）
    pub key: Bytes,

    /// 证明的值
    pub value: Bytes,

    /// 证明路径（RLP 编码的节点，根在前）
    pub proof: Vec<Bytes>,

    /// 根哈希
    pub root: B256,
}

impl MerkleProof {
    /// 创建新的 Merkle 证明
    pub fn new(key: Bytes, value: Bytes, proof: Vec<Bytes>, root: B256) -> Self {
        Self {
            key,
            value,
            proof,
            root,
        }
    }

    /// 使用 Keccak256 验证证明
    pub fn verify(&self) -> bool {
        self.verify_with(&TrieVerifier::new())
    }

    /// 使用指定校验器验证证明
    pub fn verify_with<H: NodeHasher>(&self, verifier: &TrieVerifier<H>) -> bool {
        verifier.verify(&self.value, self.root, &self.key, &self.proof)
    }

    /// 遍历证明，返回证明出的值
    pub fn traverse(&self) -> Result<Bytes, TrieError> {
        TrieVerifier::new().traverse(self.root, &self.key, &self.proof)
    }
}

/// 存储证明（`eth_getProof` 响应中的 `storageProof` 项）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageProof {
    /// 存储槽键
    pub key: U256,

    /// 存储槽值
    pub value: U256,

    /// 证明路径
    pub proof: Vec<Bytes>,
}

impl StorageProof {
    /// 转换为存储树上的通用证明
    ///
    /// 键为 keccak256(slot)，值为 RLP(value)
    pub fn to_merkle_proof(&self, storage_root: B256) -> MerkleProof {
        let hashed_slot = Keccak256Hasher.hash(&self.key.to_be_bytes::<32>());
        MerkleProof::new(
            Bytes::copy_from_slice(hashed_slot.as_slice()),
            encode_u256(self.value).into(),
            self.proof.clone(),
            storage_root,
        )
    }
}

/// 账户证明（`eth_getProof` 响应）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProof {
    /// 账户地址
    pub address: Address,

    pub balance: U256,

    pub nonce: U64,

    pub code_hash: B256,

    /// 账户的存储根
    pub storage_hash: B256,

    /// 状态树证明路径
    pub account_proof: Vec<Bytes>,

    /// 存储槽证明
    #[serde(default)]
    pub storage_proof: Vec<StorageProof>,
}

impl AccountProof {
    /// 解析 JSON-RPC 响应
    ///
    /// 既接受完整的 `{"jsonrpc", "id", "result"}` 包装，也接受裸的 result 对象
    pub fn from_rpc_json(mut value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if let Some(result) = value.get_mut("result") {
            return serde_json::from_value(result.take());
        }
        serde_json::from_value(value)
    }

    /// 响应中声明的账户状态
    pub fn trie_account(&self) -> TrieAccount {
        TrieAccount {
            nonce: self.nonce.to::<u64>(),
            balance: self.balance,
            storage_root: self.storage_hash,
            code_hash: self.code_hash,
        }
    }
}

/// 单个存储槽的校验结果
#[derive(Debug, Clone, Serialize)]
pub struct SlotReport {
    pub slot: U256,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 一次 `eth_getProof` 响应的校验报告
#[derive(Debug, Clone, Serialize)]
pub struct ProofReport {
    pub address: Address,

    /// 账户证明结果；未提供状态根时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<SlotReport>,

    pub storage: Vec<SlotReport>,
}

impl ProofReport {
    pub fn is_valid(&self) -> bool {
        self.account.as_ref().map_or(true, |a| a.valid) && self.storage.iter().all(|s| s.valid)
    }
}

fn slot_report(slot: U256, result: Result<(), TrieError>) -> SlotReport {
    match result {
        Ok(()) => SlotReport {
            slot,
            valid: true,
            error: None,
        },
        Err(e) => SlotReport {
            slot,
            valid: false,
            error: Some(e.to_string()),
        },
    }
}

/// 证明验证器
///
/// 同一个响应中的存储证明互相独立，并行校验
#[derive(Debug, Clone, Default)]
pub struct ProofVerifier<H = Keccak256Hasher> {
    verifier: TrieVerifier<H>,
}

impl ProofVerifier<Keccak256Hasher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: NodeHasher> ProofVerifier<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            verifier: TrieVerifier::with_hasher(hasher),
        }
    }

    /// 验证账户证明及其全部存储证明
    pub fn verify_account_proof(&self, state_root: B256, proof: &AccountProof) -> Result<(), TrieError> {
        // 1. 账户叶子
        self.verify_account(state_root, proof)?;

        // 2. 存储槽
        self.verify_storage_proofs(proof.storage_hash, &proof.storage_proof)
    }

    /// 验证账户叶子，返回证明出的账户
    ///
    /// 键为 keccak256(address)，值必须与响应中声明的字段一致
    pub fn verify_account(&self, state_root: B256, proof: &AccountProof) -> Result<TrieAccount, TrieError> {
        let key = self.verifier.hasher().hash(proof.address.as_slice());
        let value = self.verifier.traverse(state_root, key.as_slice(), &proof.account_proof)?;
        let account = TrieAccount::decode(&value)?;

        if account != proof.trie_account() {
            warn!("账户 {} 的证明值与响应字段不一致", proof.address);
            return Err(TrieError::AccountMismatch(proof.address));
        }

        debug!("账户 {} 校验通过, nonce={}", proof.address, account.nonce);
        Ok(account)
    }

    /// 验证存储证明
    pub fn verify_storage_proof(&self, storage_root: B256, proof: &StorageProof) -> Result<(), TrieError> {
        let key = self.verifier.hasher().hash(&proof.key.to_be_bytes::<32>());
        let value = self.verifier.traverse(storage_root, key.as_slice(), &proof.proof)?;

        if value[..] != encode_u256(proof.value)[..] {
            warn!("存储槽 {} 的证明值与响应不一致", proof.key);
            return Err(TrieError::StorageMismatch { slot: proof.key });
        }
        Ok(())
    }

    /// 并行校验一组存储证明，按输入顺序返回各自结果
    pub fn check_storage_proofs(&self, storage_root: B256, proofs: &[StorageProof]) -> Vec<Result<(), TrieError>> {
        proofs
            .par_iter()
            .map(|proof| self.verify_storage_proof(storage_root, proof))
            .collect()
    }

    /// 校验一组存储证明，返回按输入顺序的第一个错误
    pub fn verify_storage_proofs(&self, storage_root: B256, proofs: &[StorageProof]) -> Result<(), TrieError> {
        self.check_storage_proofs(storage_root, proofs).into_iter().collect()
    }

    /// 生成完整校验报告
    ///
    /// 提供 `state_root` 时额外校验账户叶子；存储证明总是对照响应中的 `storageHash`
    pub fn report(&self, state_root: Option<B256>, proof: &AccountProof) -> ProofReport {
        let account = state_root.map(|root| {
            let result = self.verify_account(root, proof).map(|_| ());
            slot_report(U256::ZERO, result)
        });

        let storage = self
            .check_storage_proofs(proof.storage_hash, &proof.storage_proof)
            .into_iter()
            .zip(&proof.storage_proof)
            .map(|(result, p)| slot_report(p.key, result))
            .collect();

        ProofReport {
            address: proof.address,
            account,
            storage,
        }
    }
}
