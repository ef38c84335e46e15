use alloy_primitives::{B256, Bytes};

use crate::error::SszError;
use crate::merkle;

/// Kind of a fixed-layout field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-length byte sequence, actual length validated at runtime
    Bytes,
    /// Fixed-width unsigned integer, little-endian on the wire
    Uint64,
}

/// One entry of a record's static field table
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub offset: usize,
    pub size: usize,
}

/// Total declared size of a field table, fixed at definition time and
/// never derived from a live instance
pub const fn declared_size(fields: &[Field]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].size;
        i += 1;
    }
    total
}

/// A record field value borrowed by the codec engine
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Bytes(&'a [u8]),
    Uint64(u64),
}

/// A fixed-layout record with a canonical encoding and a Merkle commitment.
///
/// Implementors supply the static field table plus accessors; the encode,
/// decode and hash-tree-root engines are driven entirely by the table so
/// the per-type code stays declarative.
pub trait Record: Sized {
    /// Record name, used for error reporting
    const NAME: &'static str;

    /// Field table in declared wire order
    const FIELDS: &'static [Field];

    /// Declared total size of the canonical encoding
    const SIZE: usize;

    /// Borrow the value of the field at `index` of the field table
    fn field(&self, index: usize) -> FieldValue<'_>;

    /// Rebuild a record from a length-validated input buffer
    fn assemble(reader: &mut FieldReader<'_>) -> Self;

    /// Canonical fixed-length encoding
    fn encode(&self) -> Result<Vec<u8>, SszError> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.encode_to(&mut buf)?;
        Ok(buf)
    }

    /// Append the canonical encoding to a caller-supplied buffer, allowing
    /// zero-copy composition into a larger structure. A failed call leaves
    /// the buffer untouched.
    fn encode_to(&self, dst: &mut Vec<u8>) -> Result<(), SszError> {
        // Validate every byte field up front so nothing is appended on failure
        for (index, field) in Self::FIELDS.iter().enumerate() {
            match (field.kind, self.field(index)) {
                (FieldKind::Bytes, FieldValue::Bytes(bytes)) => {
                    if bytes.len() != field.size {
                        return Err(SszError::FieldLengthMismatch {
                            record: Self::NAME,
                            field: field.name,
                            expected: field.size,
                            actual: bytes.len(),
                        });
                    }
                }
                (FieldKind::Uint64, FieldValue::Uint64(_)) => {}
                (kind, value) => {
                    unreachable!("{}.{} declared {:?} but yields {:?}", Self::NAME, field.name, kind, value)
                }
            }
        }
        dst.reserve(Self::SIZE);
        for index in 0..Self::FIELDS.len() {
            match self.field(index) {
                FieldValue::Bytes(bytes) => dst.extend_from_slice(bytes),
                FieldValue::Uint64(value) => dst.extend_from_slice(&value.to_le_bytes()),
            }
        }
        Ok(())
    }

    /// Decode a record from its canonical encoding. The input length must
    /// equal the declared size exactly; the returned record owns freshly
    /// copied storage independent of `buf`.
    fn decode(buf: &[u8]) -> Result<Self, SszError> {
        if buf.len() != Self::SIZE {
            return Err(SszError::InputSizeMismatch {
                record: Self::NAME,
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }
        let mut reader = FieldReader::new(buf, Self::FIELDS);
        let record = Self::assemble(&mut reader);
        debug_assert!(reader.finished(), "{} assemble left fields unread", Self::NAME);
        Ok(record)
    }

    /// 32-byte Merkle commitment over the record's fields
    fn hash_tree_root(&self) -> Result<B256, SszError> {
        merkle::hash_tree_root(self)
    }
}

/// Cursor over a length-validated input buffer, yielding one span per
/// field-table entry in declared order
pub struct FieldReader<'a> {
    buf: &'a [u8],
    fields: &'static [Field],
    index: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8], fields: &'static [Field]) -> Self {
        Self { buf, fields, index: 0 }
    }

    fn next_span(&mut self, kind: FieldKind) -> &'a [u8] {
        let field = &self.fields[self.index];
        debug_assert_eq!(field.kind, kind, "field {} read as wrong kind", field.name);
        self.index += 1;
        &self.buf[field.offset..field.offset + field.size]
    }

    /// Copy the next byte-sequence field into freshly allocated storage
    pub fn bytes(&mut self) -> Bytes {
        Bytes::copy_from_slice(self.next_span(FieldKind::Bytes))
    }

    /// Decode the next fixed-width little-endian integer field
    pub fn uint64(&mut self) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.next_span(FieldKind::Uint64));
        u64::from_le_bytes(raw)
    }

    pub(crate) fn finished(&self) -> bool {
        self.index == self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eth2::{DepositData, DepositDataNoSignature, SigningRoot, VoluntaryExit};

    fn sample_unsigned() -> DepositDataNoSignature {
        DepositDataNoSignature {
            pubkey: vec![0x11u8; 48].into(),
            withdrawal_credentials: vec![0x22u8; 32].into(),
            amount: 32_000_000_000,
        }
    }

    fn sample_deposit() -> DepositData {
        DepositData {
            pubkey: vec![0x11u8; 48].into(),
            withdrawal_credentials: vec![0x22u8; 32].into(),
            amount: 32_000_000_000,
            signature: vec![0x33u8; 96].into(),
        }
    }

    fn sample_signing_root() -> SigningRoot {
        SigningRoot {
            object_root: vec![0x44u8; 32].into(),
            domain: vec![0x55u8; 32].into(),
        }
    }

    fn sample_exit() -> VoluntaryExit {
        VoluntaryExit {
            epoch: 194_048,
            validator_index: 213_987,
        }
    }

    fn layout_is_contiguous<T: Record>() {
        let mut offset = 0;
        for field in T::FIELDS {
            assert_eq!(field.offset, offset, "{}.{} offset", T::NAME, field.name);
            if field.kind == FieldKind::Uint64 {
                assert_eq!(field.size, 8, "{}.{} width", T::NAME, field.name);
            }
            offset += field.size;
        }
        assert_eq!(offset, T::SIZE, "{} declared size", T::NAME);
    }

    #[test]
    fn field_tables_match_declared_sizes() {
        layout_is_contiguous::<DepositDataNoSignature>();
        layout_is_contiguous::<DepositData>();
        layout_is_contiguous::<SigningRoot>();
        layout_is_contiguous::<VoluntaryExit>();
        assert_eq!(DepositDataNoSignature::SIZE, 88);
        assert_eq!(DepositData::SIZE, 184);
        assert_eq!(SigningRoot::SIZE, 64);
        assert_eq!(VoluntaryExit::SIZE, 16);
    }

    fn round_trips<T: Record + PartialEq + std::fmt::Debug>(record: T) {
        let encoded = record.encode().unwrap();
        assert_eq!(encoded.len(), T::SIZE);
        assert_eq!(T::decode(&encoded).unwrap(), record);
    }

    #[test]
    fn encode_decode_round_trip() {
        round_trips(sample_unsigned());
        round_trips(sample_deposit());
        round_trips(sample_signing_root());
        round_trips(sample_exit());
    }

    #[test]
    fn encoded_size_is_independent_of_contents() {
        let mut deposit = sample_deposit();
        deposit.amount = u64::MAX;
        assert_eq!(deposit.encode().unwrap().len(), DepositData::SIZE);
        deposit.amount = 0;
        assert_eq!(deposit.encode().unwrap().len(), DepositData::SIZE);
    }

    // Known-answer: 88 zero-led bytes with the 32 ETH gwei amount in
    // little-endian at offset 80
    #[test]
    fn unsigned_deposit_known_encoding() {
        let record = DepositDataNoSignature {
            pubkey: vec![0u8; 48].into(),
            withdrawal_credentials: vec![0u8; 32].into(),
            amount: 32_000_000_000,
        };
        let encoded = record.encode().unwrap();
        assert_eq!(encoded.len(), 88);
        assert_eq!(&encoded[..80], &[0u8; 80][..]);
        assert_eq!(&encoded[80..], &[0x00, 0x40, 0x59, 0x73, 0x07, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn voluntary_exit_encodes_little_endian() {
        let record = VoluntaryExit { epoch: 1, validator_index: 2 };
        let encoded = record.encode().unwrap();
        assert_eq!(encoded[0..8], [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encoded[8..16], [2, 0, 0, 0, 0, 0, 0, 0]);
    }

    fn rejects_off_by_one<T: Record + std::fmt::Debug>() {
        for wrong in [T::SIZE - 1, T::SIZE + 1] {
            let err = T::decode(&vec![0u8; wrong]).unwrap_err();
            assert_eq!(
                err,
                SszError::InputSizeMismatch { record: T::NAME, expected: T::SIZE, actual: wrong }
            );
        }
    }

    #[test]
    fn decode_rejects_wrong_input_size() {
        rejects_off_by_one::<DepositDataNoSignature>();
        rejects_off_by_one::<DepositData>();
        rejects_off_by_one::<SigningRoot>();
        rejects_off_by_one::<VoluntaryExit>();
    }

    #[test]
    fn encode_rejects_wrong_pubkey_length() {
        for wrong in [47usize, 49] {
            let mut record = sample_unsigned();
            record.pubkey = vec![0u8; wrong].into();
            assert_eq!(
                record.encode().unwrap_err(),
                SszError::FieldLengthMismatch {
                    record: "DepositDataNoSignature",
                    field: "pubkey",
                    expected: 48,
                    actual: wrong,
                }
            );
        }
    }

    #[test]
    fn encode_to_appends_after_existing_content() {
        let record = sample_exit();
        let mut buf = b"prefix".to_vec();
        record.encode_to(&mut buf).unwrap();
        assert_eq!(&buf[..6], b"prefix");
        assert_eq!(&buf[6..], record.encode().unwrap().as_slice());
    }

    #[test]
    fn failed_encode_to_leaves_destination_untouched() {
        let mut record = sample_deposit();
        record.signature = vec![0x33u8; 95].into();
        let mut buf = b"prefix".to_vec();
        assert!(record.encode_to(&mut buf).is_err());
        assert_eq!(buf, b"prefix");
    }
}
