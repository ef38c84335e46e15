use colored::*;
use eyre::{Result, WrapErr, bail};
use log::*;

use alloy_primitives::{
    B256, Bytes, U256, hex,
    utils::{Unit, parse_ether},
};

use crate::eth2::{DepositData, DepositDataNoSignature, SIGNATURE_LEN, SigningRoot, VoluntaryExit};
use crate::ssz::Record;

/// Gwei value of a full 32 ETH validator deposit
pub const FULL_DEPOSIT_GWEI: u64 = 32_000_000_000;

/// Converts a fractional ether amount to gwei, the unit deposit amounts
/// are encoded in. Amounts that are not a whole number of gwei or that
/// overflow a u64 are caller bugs and fail.
pub fn gwei_from_eth(amount: f64) -> Result<u64> {
    let amount_wei = parse_ether(&amount.to_string())
        .wrap_err_with(|| format!("invalid ether amount {amount}"))?;
    let amount_gwei = amount_wei / Unit::GWEI.wei();
    if amount_gwei * Unit::GWEI.wei() != amount_wei {
        bail!("{amount} eth is not a whole number of gwei");
    }
    if amount_gwei > U256::from(u64::MAX) {
        bail!("{amount_gwei} gwei does not fit a u64 deposit amount");
    }
    Ok(amount_gwei.to::<u64>())
}

/// Hash-tree-root of an object root wrapped with its signing domain; this
/// is the 32-byte message handed to the BLS signer
pub fn signing_root(object_root: B256, domain: B256) -> Result<B256> {
    let wrapper = SigningRoot {
        object_root: Bytes::copy_from_slice(object_root.as_slice()),
        domain: Bytes::copy_from_slice(domain.as_slice()),
    };
    Ok(wrapper.hash_tree_root()?)
}

/// Signing message for an unsigned deposit under the given domain
pub fn deposit_signing_root(deposit: &DepositDataNoSignature, domain: B256) -> Result<B256> {
    let object_root = deposit.hash_tree_root()?;
    debug!("deposit root: {}", hex::encode(object_root).green());
    let root = signing_root(object_root, domain)?;
    debug!("signing root: {}", hex::encode(root).blue());
    Ok(root)
}

/// Signing message for a voluntary exit under the given domain
pub fn exit_signing_root(exit: &VoluntaryExit, domain: B256) -> Result<B256> {
    let object_root = exit.hash_tree_root()?;
    debug!("exit root: {}", hex::encode(object_root).green());
    signing_root(object_root, domain)
}

/// Attach a signature obtained from the key-management collaborator to an
/// unsigned deposit
pub fn signed_deposit(deposit: &DepositDataNoSignature, signature: Bytes) -> Result<DepositData> {
    if signature.len() != SIGNATURE_LEN {
        bail!(
            "signature is {} bytes, expected {}",
            signature.len(),
            SIGNATURE_LEN
        );
    }
    Ok(DepositData {
        pubkey: deposit.pubkey.clone(),
        withdrawal_credentials: deposit.withdrawal_credentials.clone(),
        amount: deposit.amount,
        signature,
    })
}

/// The deposit_data_root commitment submitted with the deposit transaction
/// as protection against malformed input
pub fn deposit_data_root(deposit: &DepositData) -> Result<B256> {
    let root = deposit.hash_tree_root()?;
    trace!("deposit_data_root: {}", hex::encode(root).magenta());
    Ok(root)
}
