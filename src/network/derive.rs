//! Hierarchical key derivation shared by the providers.
//!
//! - secp256k1 chains use BIP-32 (`bip32` crate) and accept hardened and
//!   normal path segments.
//! - ed25519 chains use SLIP-0010, which only defines hardened children.

use std::str::FromStr;

use bip32::DerivationPath;
use bip32::XPrv;
use hmac::Hmac;
use hmac::Mac;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use ripemd::Ripemd160;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;
use zeroize::Zeroize;
use zeroize::Zeroizing;

use super::GenerationError;

type HmacSha512 = Hmac<Sha512>;

const HARDENED: u32 = 0x8000_0000;

/// secp256k1 private key at `path`, and its compressed public key
pub(crate) fn secp256k1_key(
    seed: &[u8],
    path: &str,
) -> Result<(Zeroizing<[u8; 32]>, k256::PublicKey), GenerationError> {
    let derivation_path =
        DerivationPath::from_str(path).map_err(|e| GenerationError::derivation(path, e))?;
    let root = XPrv::new(seed).map_err(|e| GenerationError::derivation("m", e))?;

    let mut child = root;
    for child_number in derivation_path {
        child = child
            .derive_child(child_number)
            .map_err(|e| GenerationError::derivation(path, e))?;
    }

    let key: Zeroizing<[u8; 32]> = Zeroizing::new(child.private_key().to_bytes().into());
    let secret =
        k256::SecretKey::from_slice(&*key).map_err(|e| GenerationError::derivation(path, e))?;
    Ok((key, secret.public_key()))
}

/// 33-byte SEC1 compressed encoding
pub(crate) fn compressed(public_key: &k256::PublicKey) -> [u8; 33] {
    let point = public_key.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    out
}

/// RIPEMD160(SHA256(data))
pub(crate) fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// ed25519 private key at `path` following SLIP-0010.
///
/// Every segment of `path` must be hardened.
pub(crate) fn ed25519_key(seed: &[u8], path: &str) -> Result<Zeroizing<[u8; 32]>, GenerationError> {
    let indices = parse_hardened_path(path)?;

    let (mut key, mut chain_code) = slip10_step(b"ed25519 seed", &[seed])?;
    for index in indices {
        let index_bytes = (index | HARDENED).to_be_bytes();
        let (child_key, child_chain) =
            slip10_step(&chain_code, &[&[0x00][..], &key[..], &index_bytes[..]])?;
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }
    chain_code.zeroize();

    Ok(Zeroizing::new(key))
}

fn slip10_step(hmac_key: &[u8], data: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), GenerationError> {
    let mut mac = HmacSha512::new_from_slice(hmac_key)
        .map_err(|e| GenerationError::derivation("m", e))?;
    for part in data {
        mac.update(part);
    }
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&mac.finalize().into_bytes());

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&buf[..32]);
    chain_code.copy_from_slice(&buf[32..]);
    buf.zeroize();

    Ok((key, chain_code))
}

fn parse_hardened_path(path: &str) -> Result<Vec<u32>, GenerationError> {
    let mut segments = path.split('/');
    if segments.next() != Some("m") {
        return Err(GenerationError::derivation(path, "path must start with m"));
    }

    segments
        .map(|segment| {
            let digits = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    GenerationError::derivation(
                        path,
                        format!("segment {segment} is not hardened; ed25519 requires hardened"),
                    )
                })?;
            let index: u32 = digits
                .parse()
                .map_err(|e| GenerationError::derivation(path, format!("{segment}: {e}")))?;
            if index >= HARDENED {
                return Err(GenerationError::derivation(
                    path,
                    format!("segment {segment} out of range"),
                ));
            }
            Ok(index)
        })
        .collect()
}
