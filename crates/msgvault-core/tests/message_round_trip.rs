use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use msgvault_core::storage::SqliteStore;
use msgvault_core::{MessageService, VaultError};

fn service() -> MessageService<SqliteStore> {
    MessageService::new(SqliteStore::open_in_memory().expect("in-memory store should open"))
}

#[test]
fn test_round_trip() {
    let service = service();
    let messages = [
        "hello world",
        "a",
        "multi\nline\nmessage",
        "unicode: héllo wörld ☃",
        "   leading and trailing spaces   ",
    ];

    for (i, message) in messages.iter().enumerate() {
        let password = format!("password-{}", i);
        let outcome = service
            .encrypt(message, &password, None)
            .expect("encrypt should succeed");
        let decrypted = service
            .decrypt(&outcome.encrypted_text, &password)
            .expect("decrypt should succeed");
        assert_eq!(&decrypted, message);
    }
}

#[test]
fn test_wrong_password_never_silently_returns_plaintext() {
    let service = service();
    let message = "the launch code is 0000";

    let outcome = service
        .encrypt(message, "correct-password", None)
        .expect("encrypt should succeed");

    match service.decrypt(&outcome.encrypted_text, "wrong-password") {
        Err(VaultError::WrongPassword) => {}
        Ok(text) => assert_ne!(text, message, "wrong password must not return the plaintext"),
        Err(other) => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_ciphertext_nondeterministic_hash_stable() {
    let first = service();
    let second = service();

    let a = first
        .encrypt("same message", "same-password", None)
        .expect("encrypt should succeed");
    let b = second
        .encrypt("same message", "same-password", None)
        .expect("encrypt should succeed");

    // Fresh salt and IV per call
    assert_ne!(a.encrypted_text, b.encrypted_text);
    // ...but the content hash depends only on the plaintext
    assert_eq!(a.message_hash, b.message_hash);
}

#[test]
fn test_hash_independent_of_password() {
    let first = service();
    let second = service();

    let a = first
        .encrypt("stable message", "password-one", None)
        .expect("encrypt should succeed");
    let b = second
        .encrypt("stable message", "password-two", None)
        .expect("encrypt should succeed");

    assert_eq!(a.message_hash, b.message_hash);
}

#[test]
fn test_malformed_blob_rejected() {
    let service = service();

    let result = service.decrypt("not-base64!!", "any-password");
    assert!(matches!(result, Err(VaultError::MalformedBlob(_))));

    let short = STANDARD.encode(b"short");
    let result = service.decrypt(&short, "any-password");
    assert!(matches!(result, Err(VaultError::MalformedBlob(_))));
}

#[test]
fn test_duplicate_plaintext_rejected() {
    let service = service();

    service
        .encrypt("only once", "password-1", None)
        .expect("first encrypt should succeed");

    // Same plaintext, even under a different password, maps to the same
    // content hash and is refused by the store.
    let result = service.encrypt("only once", "password-2", None);
    match result {
        Err(VaultError::DuplicateMessage(hash)) => {
            assert_eq!(hash, msgvault_core::blob::content_hash(b"only once"));
        }
        other => panic!("expected DuplicateMessage, got {:?}", other),
    }
}

#[test]
fn test_hello_world_scenario() {
    let service = service();

    let outcome = service
        .encrypt("hello world", "correct-horse", Some("greeting"))
        .expect("encrypt should succeed");
    assert_eq!(
        outcome.message_hash,
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );

    let decrypted = service
        .decrypt(&outcome.encrypted_text, "correct-horse")
        .expect("decrypt should succeed");
    assert_eq!(decrypted, "hello world");

    assert!(service
        .decrypt(&outcome.encrypted_text, "wrong-password")
        .is_err());

    let record = service
        .lookup(&outcome.message_hash)
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(record.encrypted_blob, outcome.encrypted_text);
    assert_eq!(record.metadata.as_deref(), Some("greeting"));
}

#[test]
fn test_list_preserves_encryption_order() {
    let service = service();

    let first = service
        .encrypt("first message", "password-1", None)
        .expect("encrypt should succeed");
    let second = service
        .encrypt("second message", "password-2", None)
        .expect("encrypt should succeed");

    let summaries = service.list_all().expect("list should succeed");
    let hashes: Vec<&str> = summaries.iter().map(|s| s.content_hash.as_str()).collect();
    assert_eq!(hashes, vec![&first.message_hash, &second.message_hash]);
}

#[test]
fn test_blob_decodes_to_header_plus_plaintext_length() {
    let service = service();
    let message = "exactly 21 bytes long"; // 21 bytes

    let outcome = service
        .encrypt(message, "some-password", None)
        .expect("encrypt should succeed");

    let decoded = STANDARD
        .decode(&outcome.encrypted_text)
        .expect("blob should be valid base64");
    assert_eq!(decoded.len(), 16 + 16 + message.len());
}
