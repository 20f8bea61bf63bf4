//! AES-256-CFB encryption and decryption.
//!
//! CFB is a stream-compatible mode: ciphertext length equals plaintext
//! length and no padding errors are possible. The flip side is that there
//! is no integrity tag — decrypting with the wrong key or IV yields garbage
//! bytes rather than an error, and callers detect a wrong password only by
//! the UTF-8 decode of the output failing.

use aes::Aes256;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use cfb_mode::{Decryptor, Encryptor};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{DerivedKey, IV_LEN};

type Aes256CfbEnc = Encryptor<Aes256>;
type Aes256CfbDec = Decryptor<Aes256>;

/// Generate a fresh random IV from the OS CSPRNG.
///
/// An IV must never be reused with the same key for two different
/// plaintexts; one is generated per encryption call.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypt plaintext with AES-256-CFB.
///
/// Infallible: key and IV lengths are enforced by the type system and CFB
/// accepts input of any length.
pub fn encrypt(key: &DerivedKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    let mut buf = plaintext.to_vec();
    Aes256CfbEnc::new(key.as_bytes().into(), iv.into()).encrypt(&mut buf);
    buf
}

/// Decrypt ciphertext with AES-256-CFB.
///
/// Structurally infallible: a wrong key or IV produces garbage bytes, not
/// an error.
pub fn decrypt(key: &DerivedKey, iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = ciphertext.to_vec();
    Aes256CfbDec::new(key.as_bytes().into(), iv.into()).decrypt(&mut buf);
    buf
}
