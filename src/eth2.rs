use alloy_primitives::Bytes;

use crate::ssz::{Field, FieldKind, FieldReader, FieldValue, Record, declared_size};

/// BLS12-381 public key length in bytes
pub const PUBKEY_LEN: usize = 48;
/// Withdrawal credentials length in bytes
pub const CREDENTIALS_LEN: usize = 32;
/// BLS12-381 signature length in bytes
pub const SIGNATURE_LEN: usize = 96;
/// Merkle root and signing domain length in bytes
pub const ROOT_LEN: usize = 32;

/// Deposit data before the BLS signature exists; its hash-tree-root is the
/// message the validator key signs
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepositDataNoSignature {
    /// Validator public key
    pub pubkey: Bytes,
    /// Withdrawal credentials
    pub withdrawal_credentials: Bytes,
    /// Amount of ether deposited in gwei
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,
}

/// Fully assembled deposit data handed to the transaction builder
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepositData {
    /// Validator public key
    pub pubkey: Bytes,
    /// Withdrawal credentials
    pub withdrawal_credentials: Bytes,
    /// Amount of ether deposited in gwei
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,
    /// Deposit signature
    pub signature: Bytes,
}

/// An object root paired with a signing domain; hash-tree-rooted before
/// signing
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SigningRoot {
    /// Hash-tree-root of the object being signed
    pub object_root: Bytes,
    /// Signing domain
    pub domain: Bytes,
}

/// A validator's signal to stop validating
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoluntaryExit {
    /// Earliest epoch at which the exit may be processed
    #[serde(with = "serde_utils::quoted_u64")]
    pub epoch: u64,
    /// Index of the exiting validator
    #[serde(with = "serde_utils::quoted_u64")]
    pub validator_index: u64,
}

const DEPOSIT_DATA_NO_SIGNATURE_FIELDS: &[Field] = &[
    Field { name: "pubkey", kind: FieldKind::Bytes, offset: 0, size: PUBKEY_LEN },
    Field { name: "withdrawal_credentials", kind: FieldKind::Bytes, offset: 48, size: CREDENTIALS_LEN },
    Field { name: "amount", kind: FieldKind::Uint64, offset: 80, size: 8 },
];

const DEPOSIT_DATA_FIELDS: &[Field] = &[
    Field { name: "pubkey", kind: FieldKind::Bytes, offset: 0, size: PUBKEY_LEN },
    Field { name: "withdrawal_credentials", kind: FieldKind::Bytes, offset: 48, size: CREDENTIALS_LEN },
    Field { name: "amount", kind: FieldKind::Uint64, offset: 80, size: 8 },
    Field { name: "signature", kind: FieldKind::Bytes, offset: 88, size: SIGNATURE_LEN },
];

const SIGNING_ROOT_FIELDS: &[Field] = &[
    Field { name: "object_root", kind: FieldKind::Bytes, offset: 0, size: ROOT_LEN },
    Field { name: "domain", kind: FieldKind::Bytes, offset: 32, size: ROOT_LEN },
];

const VOLUNTARY_EXIT_FIELDS: &[Field] = &[
    Field { name: "epoch", kind: FieldKind::Uint64, offset: 0, size: 8 },
    Field { name: "validator_index", kind: FieldKind::Uint64, offset: 8, size: 8 },
];

impl Record for DepositDataNoSignature {
    const NAME: &'static str = "DepositDataNoSignature";
    const FIELDS: &'static [Field] = DEPOSIT_DATA_NO_SIGNATURE_FIELDS;
    const SIZE: usize = declared_size(DEPOSIT_DATA_NO_SIGNATURE_FIELDS);

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Bytes(&self.pubkey),
            1 => FieldValue::Bytes(&self.withdrawal_credentials),
            2 => FieldValue::Uint64(self.amount),
            _ => unreachable!("{} has no field {}", Self::NAME, index),
        }
    }

    fn assemble(reader: &mut FieldReader<'_>) -> Self {
        Self {
            pubkey: reader.bytes(),
            withdrawal_credentials: reader.bytes(),
            amount: reader.uint64(),
        }
    }
}

impl Record for DepositData {
    const NAME: &'static str = "DepositData";
    const FIELDS: &'static [Field] = DEPOSIT_DATA_FIELDS;
    const SIZE: usize = declared_size(DEPOSIT_DATA_FIELDS);

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Bytes(&self.pubkey),
            1 => FieldValue::Bytes(&self.withdrawal_credentials),
            2 => FieldValue::Uint64(self.amount),
            3 => FieldValue::Bytes(&self.signature),
            _ => unreachable!("{} has no field {}", Self::NAME, index),
        }
    }

    fn assemble(reader: &mut FieldReader<'_>) -> Self {
        Self {
            pubkey: reader.bytes(),
            withdrawal_credentials: reader.bytes(),
            amount: reader.uint64(),
            signature: reader.bytes(),
        }
    }
}

impl Record for SigningRoot {
    const NAME: &'static str = "SigningRoot";
    const FIELDS: &'static [Field] = SIGNING_ROOT_FIELDS;
    const SIZE: usize = declared_size(SIGNING_ROOT_FIELDS);

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Bytes(&self.object_root),
            1 => FieldValue::Bytes(&self.domain),
            _ => unreachable!("{} has no field {}", Self::NAME, index),
        }
    }

    fn assemble(reader: &mut FieldReader<'_>) -> Self {
        Self { object_root: reader.bytes(), domain: reader.bytes() }
    }
}

impl Record for VoluntaryExit {
    const NAME: &'static str = "VoluntaryExit";
    const FIELDS: &'static [Field] = VOLUNTARY_EXIT_FIELDS;
    const SIZE: usize = declared_size(VOLUNTARY_EXIT_FIELDS);

    fn field(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Uint64(self.epoch),
            1 => FieldValue::Uint64(self.validator_index),
            _ => unreachable!("{} has no field {}", Self::NAME, index),
        }
    }

    fn assemble(reader: &mut FieldReader<'_>) -> Self {
        Self { epoch: reader.uint64(), validator_index: reader.uint64() }
    }
}
