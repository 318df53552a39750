//! Client side of the Cognito Secure Remote Password handshake.
//!
//! Cognito's `USER_SRP_AUTH` flow is SRP-6a over the 3072-bit group of
//! RFC 5054 with SHA-256. The client sends its public value `A`, Cognito
//! answers with a `PASSWORD_VERIFIER` challenge carrying `B` and a salt, and
//! the client proves knowledge of the password with an HMAC signature keyed
//! by the shared session key. The password itself never leaves the process.

use std::sync::OnceLock;

use base64::prelude::*;
use chrono::{DateTime, Utc};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::auth::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// RFC 5054 3072-bit group prime.
const N_HEX: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1",
    "29024E088A67CC74020BBEA63B139B22514A08798E3404DD",
    "EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245",
    "E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D",
    "C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F",
    "83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9",
    "DE2BCBF6955817183995497CEA956AE515D2261898FA0510",
    "15728E5A8AAAC42DAD33170D04507A33A85521ABDF1CBA64",
    "ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7",
    "ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6B",
    "F12FFA06D98A0864D87602733EC86A64521F2B18177B200C",
    "BBE117577A615D6C770988C0BAD946E208E24FA074E5AB31",
    "43DB5BFCE0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF",
);

/// Group generator.
const G: u32 = 2;

/// Size of the random private value `a`.
const PRIVATE_KEY_BYTES: usize = 128;

/// HKDF `info` Cognito uses to derive the signing key.
const DERIVED_KEY_INFO: &[u8] = b"Caldera Derived Key";

/// Length of the derived signing key.
const DERIVED_KEY_LEN: usize = 16;

/// Format of the `TIMESTAMP` challenge response, e.g. `Tue Jan 9 12:00:00 UTC 2024`.
const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S UTC %Y";

struct Group {
    n: BigUint,
    g: BigUint,
    k: BigUint,
}

fn group() -> &'static Group {
    static GROUP: OnceLock<Group> = OnceLock::new();
    GROUP.get_or_init(|| {
        let n = BigUint::parse_bytes(N_HEX.as_bytes(), 16)
            .expect("RFC 5054 prime is valid hex");
        let g = BigUint::from(G);
        let k = hash_to_int(&[pad(&n).as_slice(), pad(&g).as_slice()]);
        Group { n, g, k }
    })
}

/// Big-endian bytes of `value` with a leading zero byte when the high bit
/// is set, so the value reads as positive.
fn pad(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes.first().is_some_and(|byte| byte & 0x80 != 0) {
        bytes.insert(0, 0);
    }
    bytes
}

fn hash_to_int(parts: &[&[u8]]) -> BigUint {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    BigUint::from_bytes_be(&hasher.finalize())
}

fn parse_hex(name: &str, value: &str) -> Result<BigUint, AuthError> {
    BigUint::parse_bytes(value.as_bytes(), 16).ok_or_else(|| AuthError::InvalidResponse {
        message: format!("{name} in PASSWORD_VERIFIER challenge is not hex"),
    })
}

/// Parameters of a `PASSWORD_VERIFIER` challenge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct PasswordVerifier {
    pub(crate) salt: String,
    pub(crate) srp_b: String,
    pub(crate) secret_block: String,
    pub(crate) user_id_for_srp: String,
}

/// The proof sent back in `RespondToAuthChallenge`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PasswordClaim {
    pub(crate) signature: String,
    pub(crate) timestamp: String,
}

/// One SRP handshake: a private value `a` and its public value `A`.
///
/// A fresh handshake is made for every sign-in.
pub(crate) struct SrpHandshake {
    pool_name: String,
    a: BigUint,
    public: BigUint,
}

impl SrpHandshake {
    /// Starts a handshake for the pool named `pool_name` (the pool id
    /// without its region prefix).
    pub(crate) fn new(pool_name: &str) -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; PRIVATE_KEY_BYTES];
            rng.fill_bytes(&mut bytes);
            let a = BigUint::from_bytes_be(&bytes) % &group().n;
            if let Some(handshake) = Self::with_private_key(pool_name, a) {
                return handshake;
            }
        }
    }

    /// Returns `None` when `a` yields a degenerate public value.
    fn with_private_key(pool_name: &str, a: BigUint) -> Option<Self> {
        let Group { n, g, .. } = group();
        let public = g.modpow(&a, n);
        if public.is_zero() {
            return None;
        }
        Some(Self {
            pool_name: pool_name.to_string(),
            a,
            public,
        })
    }

    /// Returns `A` as lower-case hex, the `SRP_A` auth parameter.
    pub(crate) fn public_key(&self) -> String {
        self.public.to_str_radix(16)
    }

    /// Answers a `PASSWORD_VERIFIER` challenge at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidResponse`] if the challenge parameters are
    /// malformed or `B` is not a usable server value.
    pub(crate) fn password_claim(
        &self,
        challenge: &PasswordVerifier,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<PasswordClaim, AuthError> {
        let Group { n, g, k } = group();

        let server_public = parse_hex("SRP_B", &challenge.srp_b)?;
        if (&server_public % n).is_zero() {
            return Err(AuthError::InvalidResponse {
                message: "SRP_B is zero modulo N".to_string(),
            });
        }
        let salt = parse_hex("SALT", &challenge.salt)?;
        let secret_block = BASE64_STANDARD
            .decode(&challenge.secret_block)
            .map_err(|e| AuthError::InvalidResponse {
                message: format!("SECRET_BLOCK is not base64: {e}"),
            })?;

        let u = hash_to_int(&[
            pad(&self.public).as_slice(),
            pad(&server_public).as_slice(),
        ]);
        if u.is_zero() {
            return Err(AuthError::InvalidResponse {
                message: "SRP scrambling parameter is zero".to_string(),
            });
        }

        let identity = Sha256::digest(
            format!(
                "{}{}:{password}",
                self.pool_name, challenge.user_id_for_srp
            )
            .as_bytes(),
        );
        let x = hash_to_int(&[pad(&salt).as_slice(), identity.as_slice()]);

        // S = (B - k * g^x) ^ (a + u * x) mod N
        let kgx = (k * g.modpow(&x, n)) % n;
        let base = ((server_public % n) + n - kgx) % n;
        let exponent = &self.a + &u * &x;
        let shared = base.modpow(&exponent, n);

        let (hkdf_salt, ikm) = (pad(&u), pad(&shared));
        let mut key = [0u8; DERIVED_KEY_LEN];
        Hkdf::<Sha256>::new(Some(&hkdf_salt[..]), &ikm)
            .expand(DERIVED_KEY_INFO, &mut key)
            .expect("16 bytes is a valid HKDF-SHA256 output length");

        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

        let mut mac =
            HmacSha256::new_from_slice(&key).expect("HMAC can take key of any size");
        mac.update(self.pool_name.as_bytes());
        mac.update(challenge.user_id_for_srp.as_bytes());
        mac.update(&secret_block);
        mac.update(timestamp.as_bytes());
        let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        Ok(PasswordClaim {
            signature,
            timestamp,
        })
    }
}
