//! Key and token fixtures shared by the integration tests
//!
//! RSA keys come from the `rsa` crate (slow to generate, so one key per test
//! binary), EC and Ed25519 keys from `aws-lc-rs`. Every token is signed with
//! `aws-lc-rs`.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    EcdsaKeyPair, Ed25519KeyPair, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_FIXED_SIGNING,
    ECDSA_P384_SHA384_FIXED_SIGNING, ECDSA_P521_SHA512_FIXED_SIGNING, RSA_PKCS1_SHA256,
    RSA_PKCS1_SHA384, RSA_PKCS1_SHA512, RSA_PSS_SHA256, RSA_PSS_SHA384, RSA_PSS_SHA512,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use jwtcheck::Jwk;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

pub const CLIENT_ID: &str = "d4b3c2a1-client";
pub const AUD: &str = "https://api.example.com";

// SubjectPublicKeyInfo prefixes; the raw public key bytes follow
const P256_SPKI_PREFIX: &[u8] = &[
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08, 0x2a,
    0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];
const P384_SPKI_PREFIX: &[u8] = &[
    0x30, 0x76, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05, 0x2b,
    0x81, 0x04, 0x00, 0x22, 0x03, 0x62, 0x00,
];
const P521_SPKI_PREFIX: &[u8] = &[
    0x30, 0x81, 0x9b, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x23, 0x03, 0x81, 0x86, 0x00,
];
const ED25519_SPKI_PREFIX: &[u8] = &[
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    pub fn jwk_name(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            Curve::P256 => "ES256",
            Curve::P384 => "ES384",
            Curve::P521 => "ES512",
        }
    }

    fn signing(&self) -> &'static aws_lc_rs::signature::EcdsaSigningAlgorithm {
        match self {
            Curve::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
            Curve::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
            Curve::P521 => &ECDSA_P521_SHA512_FIXED_SIGNING,
        }
    }

    fn spki_prefix(&self) -> &'static [u8] {
        match self {
            Curve::P256 => P256_SPKI_PREFIX,
            Curve::P384 => P384_SPKI_PREFIX,
            Curve::P521 => P521_SPKI_PREFIX,
        }
    }
}

#[derive(Debug, Clone)]
enum Signer {
    Rsa { pkcs8: Vec<u8> },
    Ec { pkcs8: Vec<u8>, curve: Curve },
    Ed25519 { pkcs8: Vec<u8> },
}

/// A key pair with its public half in every supported input form
#[derive(Debug, Clone)]
pub struct KeyFixture {
    /// `PUBLIC KEY` (SPKI) PEM
    pub pem: String,
    /// `RSA PUBLIC KEY` (PKCS#1) PEM, RSA only
    pub pkcs1_pem: Option<String>,
    pub jwk: Jwk,
    signer: Signer,
}

impl KeyFixture {
    /// Sign `data` with the scheme `alg` names
    ///
    /// RSA keys honour the padding and hash of `alg`; EC and Ed25519 keys
    /// always use their own scheme, which lets tests lie in the header.
    pub fn sign(&self, alg: &str, data: &[u8]) -> Vec<u8> {
        let rng = SystemRandom::new();
        match &self.signer {
            Signer::Rsa { pkcs8 } => {
                let keypair = RsaKeyPair::from_pkcs8(pkcs8).unwrap();
                let padding: &'static dyn aws_lc_rs::signature::RsaEncoding = match alg {
                    "RS384" => &RSA_PKCS1_SHA384,
                    "RS512" => &RSA_PKCS1_SHA512,
                    "PS256" => &RSA_PSS_SHA256,
                    "PS384" => &RSA_PSS_SHA384,
                    "PS512" => &RSA_PSS_SHA512,
                    _ => &RSA_PKCS1_SHA256,
                };
                let mut signature = vec![0u8; keypair.public_modulus_len()];
                keypair.sign(padding, &rng, data, &mut signature).unwrap();
                signature
            }
            Signer::Ec { pkcs8, curve } => {
                let keypair = EcdsaKeyPair::from_pkcs8(curve.signing(), pkcs8).unwrap();
                keypair.sign(&rng, data).unwrap().as_ref().to_vec()
            }
            Signer::Ed25519 { pkcs8 } => {
                let keypair = Ed25519KeyPair::from_pkcs8(pkcs8).unwrap();
                keypair.sign(data).as_ref().to_vec()
            }
        }
    }

    /// JWK as a JSON value, the form untyped callers pass around
    pub fn jwk_value(&self) -> Value {
        serde_json::to_value(&self.jwk).unwrap()
    }
}

/// The shared 2048-bit RSA key
pub fn rsa_key() -> &'static KeyFixture {
    static KEY: OnceLock<KeyFixture> = OnceLock::new();
    KEY.get_or_init(generate_rsa_key)
}

/// A second, unrelated RSA key
pub fn other_rsa_key() -> &'static KeyFixture {
    static KEY: OnceLock<KeyFixture> = OnceLock::new();
    KEY.get_or_init(generate_rsa_key)
}

fn generate_rsa_key() -> KeyFixture {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate RSA key");
    let public_key = private_key.to_public_key();

    let pkcs8 = private_key
        .to_pkcs8_der()
        .expect("failed to encode PKCS#8")
        .as_bytes()
        .to_vec();
    let pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .expect("failed to encode SPKI PEM");
    let pkcs1_pem = public_key
        .to_pkcs1_pem(LineEnding::LF)
        .expect("failed to encode PKCS#1 PEM");

    let jwk = Jwk {
        kty: Some("RSA".to_string()),
        kid: Some("rsa-test-key".to_string()),
        alg: Some("RS256".to_string()),
        key_use: Some("sig".to_string()),
        n: Some(URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be())),
        e: Some(URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be())),
        ..Default::default()
    };

    KeyFixture {
        pem,
        pkcs1_pem: Some(pkcs1_pem),
        jwk,
        signer: Signer::Rsa { pkcs8 },
    }
}

pub fn ec_key(curve: Curve) -> KeyFixture {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(curve.signing(), &rng)
        .unwrap()
        .as_ref()
        .to_vec();
    let keypair = EcdsaKeyPair::from_pkcs8(curve.signing(), &pkcs8).unwrap();
    let point = keypair.public_key().as_ref().to_vec();

    let coordinate_len = (point.len() - 1) / 2;
    let jwk = Jwk {
        kty: Some("EC".to_string()),
        crv: Some(curve.jwk_name().to_string()),
        x: Some(URL_SAFE_NO_PAD.encode(&point[1..1 + coordinate_len])),
        y: Some(URL_SAFE_NO_PAD.encode(&point[1 + coordinate_len..])),
        ..Default::default()
    };

    let mut der = curve.spki_prefix().to_vec();
    der.extend_from_slice(&point);

    KeyFixture {
        pem: armor("PUBLIC KEY", &der),
        pkcs1_pem: None,
        jwk,
        signer: Signer::Ec { pkcs8, curve },
    }
}

pub fn ed25519_key() -> KeyFixture {
    let rng = SystemRandom::new();
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)
        .unwrap()
        .as_ref()
        .to_vec();
    let keypair = Ed25519KeyPair::from_pkcs8(&pkcs8).unwrap();
    let public = keypair.public_key().as_ref().to_vec();

    let jwk = Jwk {
        kty: Some("OKP".to_string()),
        crv: Some("Ed25519".to_string()),
        x: Some(URL_SAFE_NO_PAD.encode(&public)),
        ..Default::default()
    };

    let mut der = ED25519_SPKI_PREFIX.to_vec();
    der.extend_from_slice(&public);

    KeyFixture {
        pem: armor("PUBLIC KEY", &der),
        pkcs1_pem: None,
        jwk,
        signer: Signer::Ed25519 { pkcs8 },
    }
}

pub fn armor(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);
    let lines: Vec<&str> = body
        .as_bytes()
        .chunks(64)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect();
    format!(
        "-----BEGIN {label}-----\n{}\n-----END {label}-----\n",
        lines.join("\n")
    )
}

pub fn b64(value: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(value)
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Claims of a token valid for the next hour
pub fn valid_claims() -> Value {
    json!({
        "iss": CLIENT_ID,
        "client_id": CLIENT_ID,
        "aud": AUD,
        "sub": "user-123",
        "iat": now(),
        "exp": now() + 3600,
    })
}

/// Claims of a token that expired an hour ago
pub fn expired_claims() -> Value {
    json!({
        "iss": CLIENT_ID,
        "client_id": CLIENT_ID,
        "aud": AUD,
        "iat": now() - 7200,
        "exp": now() - 3600,
    })
}

/// Sign arbitrary header and claims; `alg` in the header picks the scheme
pub fn encode_token(key: &KeyFixture, header: &Value, claims: &Value) -> String {
    let alg = header["alg"].as_str().unwrap_or("RS256");
    let signing_input = format!("{}.{}", b64(header.to_string()), b64(claims.to_string()));
    let signature = key.sign(alg, signing_input.as_bytes());
    format!("{signing_input}.{}", b64(signature))
}

pub fn token(key: &KeyFixture, alg: &str, claims: &Value) -> String {
    encode_token(key, &json!({ "alg": alg, "typ": "JWT" }), claims)
}

/// Flip one bit in the middle of the decoded signature
pub fn corrupt_signature(token: &str) -> String {
    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x01;
    format!("{signing_input}.{}", b64(bytes))
}

/// Swap in a re-encoded payload, keeping the original header and signature
pub fn replace_payload(token: &str, claims: &Value) -> String {
    let mut parts = token.split('.');
    let header = parts.next().unwrap();
    let _payload = parts.next().unwrap();
    let signature = parts.next().unwrap();
    format!("{header}.{}.{signature}", b64(claims.to_string()))
}
