use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use trie_proof::trie::ProofReport;
use trie_proof::utils::hex_to_bytes;
use trie_proof::{AccountProof, ProofVerifier};
use alloy_primitives::B256;

/// 证明校验工具（Trie Proof）
///
/// 读取 `eth_getProof` 响应，校验账户证明与存储证明
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// eth_getProof 响应文件（JSON），"-" 表示从标准输入读取
    #[arg(long)]
    proof: PathBuf,

    /// 区块状态根（十六进制）；未提供时只校验存储证明
    #[arg(long)]
    state_root: Option<String>,

    /// 以 JSON 格式输出校验报告
    #[arg(long)]
    json: bool,
}

/// 读取证明文件
fn load_proof(path: &Path) -> Result<AccountProof> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read proof from stdin")?;
    } else {
        raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read proof file {}", path.display()))?;
    }

    let value: serde_json::Value = serde_json::from_str(&raw).context("Invalid JSON")?;
    let proof = AccountProof::from_rpc_json(value).context("Invalid eth_getProof response")?;
    Ok(proof)
}

/// 解析状态根
fn parse_root(hex_str: &str) -> Result<B256> {
    let bytes = hex_to_bytes(hex_str).context("Invalid state root hex")?;
    if bytes.len() != 32 {
        bail!("State root must be 32 bytes, got {}", bytes.len());
    }
    Ok(B256::from_slice(&bytes))
}

fn print_report(report: &ProofReport) {
    info!("📄 账户: {}", report.address);

    if let Some(account) = &report.account {
        if account.valid {
            info!("✅ 账户证明有效");
        } else {
            error!("❌ 账户证明无效: {}", account.error.as_deref().unwrap_or_default());
        }
    } else {
        warn!("⏭️  未提供状态根，跳过账户证明");
    }

    for slot in &report.storage {
        if slot.valid {
            info!("✅ 存储槽 {:#x} 有效", slot.slot);
        } else {
            error!("❌ 存储槽 {:#x} 无效: {}", slot.slot, slot.error.as_deref().unwrap_or_default());
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let proof = load_proof(&args.proof)?;
    let state_root = args.state_root.as_deref().map(parse_root).transpose()?;

    let report = ProofVerifier::new().report(state_root, &proof);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_valid() {
        bail!("Proof verification failed");
    }

    Ok(())
}
