use cryptoxide::digest::Digest;
use cryptoxide::sha2::Sha256;

use super::AddressError;

const CHECKSUM_LEN: usize = 4;

/// Decodes a Base58Check string and returns the payload with the checksum stripped.
pub(super) fn decode_check(encoded: &str) -> Result<Vec<u8>, AddressError> {
    let mut data = bs58::decode(encoded).into_vec()?;
    if data.len() <= CHECKSUM_LEN {
        return Err(AddressError::Checksum);
    }

    let checksum = data.split_off(data.len() - CHECKSUM_LEN);
    if double_sha256(&data)[..CHECKSUM_LEN] != checksum[..] {
        return Err(AddressError::Checksum);
    }
    Ok(data)
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    let mut first = [0u8; 32];
    hasher.input(data);
    hasher.result(&mut first);

    hasher.reset();
    let mut second = [0u8; 32];
    hasher.input(&first);
    hasher.result(&mut second);
    second
}
