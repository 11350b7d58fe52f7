//! Token service tests. Tokens are stateless, so these run without any
//! backing infrastructure.

use pasetors::claims::Claims;
use pasetors::keys::SymmetricKey;
use pasetors::version4::V4;
use uuid::Uuid;

use quill::app::tokens::TokenService;

const SECRET: [u8; 32] = *b"0123456789abcdef0123456789abcdef";
const OTHER_SECRET: [u8; 32] = *b"fedcba9876543210fedcba9876543210";

#[test]
fn issued_token_verifies_to_the_same_user() {
    let service = TokenService::new(SECRET, 24);
    let user_id = Uuid::new_v4();

    let token = service.issue(user_id).unwrap();
    let decoded = service.verify(&token).unwrap();

    assert_eq!(decoded, Some(user_id));
}

#[test]
fn garbage_token_is_invalid() {
    let service = TokenService::new(SECRET, 24);
    assert_eq!(service.verify("not-a-token").unwrap(), None);
    assert_eq!(service.verify("").unwrap(), None);
}

#[test]
fn tampered_token_is_invalid() {
    let service = TokenService::new(SECRET, 24);
    let token = service.issue(Uuid::new_v4()).unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    assert_eq!(service.verify(&tampered).unwrap(), None);
}

#[test]
fn token_signed_with_another_key_is_invalid() {
    let issuer = TokenService::new(OTHER_SECRET, 24);
    let verifier = TokenService::new(SECRET, 24);

    let token = issuer.issue(Uuid::new_v4()).unwrap();
    assert_eq!(verifier.verify(&token).unwrap(), None);
}

#[test]
fn token_without_a_user_id_is_invalid() {
    // Well-formed and correctly signed, but the payload carries no subject.
    let mut claims = Claims::new().unwrap();
    claims.issuer("quill").unwrap();
    claims.audience("quill").unwrap();
    let key = SymmetricKey::<V4>::from(&SECRET).unwrap();
    let token = pasetors::local::encrypt(&key, &claims, None, None).unwrap();

    let service = TokenService::new(SECRET, 24);
    assert_eq!(service.verify(&token).unwrap(), None);
}

#[test]
fn token_with_non_uuid_subject_is_invalid() {
    let mut claims = Claims::new().unwrap();
    claims.issuer("quill").unwrap();
    claims.audience("quill").unwrap();
    claims.subject("not-a-user-id").unwrap();
    let key = SymmetricKey::<V4>::from(&SECRET).unwrap();
    let token = pasetors::local::encrypt(&key, &claims, None, None).unwrap();

    let service = TokenService::new(SECRET, 24);
    assert_eq!(service.verify(&token).unwrap(), None);
}
