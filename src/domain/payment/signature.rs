//! Webhook signature verification.
//!
//! The gateway signs every webhook body with its private key and sends the
//! signature in the `Content-Signature` header:
//!
//! ```text
//! Content-Signature: alg=RS256; digest=<base64url signature>
//! ```
//!
//! Verification is fail-closed: malformed headers, undecodable digests, bad
//! keys and primitive errors all yield `false`. The algorithm named in the
//! header is parsed but never trusted to pick the primitive; the verifier uses
//! the algorithm it was configured with, always over SHA-256.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static ALG_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\balg=([^;\s]*)").expect("valid alg pattern"));

static DIGEST_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdigest=([^;\s]*)").expect("valid digest pattern"));

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";
const PEM_LINE_WIDTH: usize = 64;

/// Which SHA-256 signature scheme the webhook key uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[default]
    Rs256,
    /// RSASSA-PSS with SHA-256.
    Ps256,
    /// ECDSA P-256 with SHA-256.
    Es256,
}

impl SignatureAlgorithm {
    fn as_jwt_algorithm(self) -> Algorithm {
        match self {
            SignatureAlgorithm::Rs256 => Algorithm::RS256,
            SignatureAlgorithm::Ps256 => Algorithm::PS256,
            SignatureAlgorithm::Es256 => Algorithm::ES256,
        }
    }

    fn decoding_key(self, pem: &[u8]) -> jsonwebtoken::errors::Result<DecodingKey> {
        match self {
            SignatureAlgorithm::Rs256 | SignatureAlgorithm::Ps256 => DecodingKey::from_rsa_pem(pem),
            SignatureAlgorithm::Es256 => DecodingKey::from_ec_pem(pem),
        }
    }
}

/// Parameters carried by the `Content-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSignature {
    /// Algorithm name as sent by the gateway. Informational only.
    pub alg: String,
    /// URL-safe Base64 signature.
    pub digest: String,
}

/// Reasons a `Content-Signature` header is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContentSignatureError {
    #[error("Missing required parameter alg")]
    MissingAlgorithm,

    #[error("Missing required parameter digest")]
    MissingDigest,
}

impl ContentSignatureError {
    /// Name of the missing header parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            ContentSignatureError::MissingAlgorithm => "alg",
            ContentSignatureError::MissingDigest => "digest",
        }
    }
}

impl ContentSignature {
    /// Parses `alg=<name>; digest=<value>` (case-insensitive keys).
    pub fn parse(header: &str) -> Result<Self, ContentSignatureError> {
        let alg =
            parameter(&ALG_PARAMETER, header).ok_or(ContentSignatureError::MissingAlgorithm)?;
        let digest =
            parameter(&DIGEST_PARAMETER, header).ok_or(ContentSignatureError::MissingDigest)?;

        Ok(Self {
            alg: alg.to_string(),
            digest: digest.to_string(),
        })
    }

    /// Decoded signature bytes, or `None` if the digest is not valid base64url.
    pub fn signature_bytes(&self) -> Option<Vec<u8>> {
        decode_urlsafe_base64(&self.digest)
    }
}

/// Non-empty value of one header parameter.
fn parameter<'h>(pattern: &Regex, header: &'h str) -> Option<&'h str> {
    pattern
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Decodes URL-safe Base64, tolerating missing padding.
pub fn decode_urlsafe_base64(input: &str) -> Option<Vec<u8>> {
    let mut data: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let remainder = data.len() % 4;
    if remainder != 0 {
        data.push_str(&"===="[remainder..]);
    }

    STANDARD.decode(data).ok()
}

/// Wraps a stored key fragment into a `PUBLIC KEY` PEM document.
///
/// The fragment is the base64 body without header/footer lines. Whitespace is
/// dropped and the body re-wrapped at 64 columns. A value that already carries
/// a PEM header is returned trimmed but otherwise untouched.
pub fn wrap_public_key(fragment: &str) -> String {
    let trimmed = fragment.trim();
    if trimmed.starts_with("-----BEGIN") {
        return trimmed.to_string();
    }

    let body: Vec<char> = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pem = String::with_capacity(body.len() + body.len() / PEM_LINE_WIDTH + 64);
    pem.push_str(PEM_HEADER);
    pem.push('\n');
    for line in body.chunks(PEM_LINE_WIDTH) {
        pem.extend(line);
        pem.push('\n');
    }
    pem.push_str(PEM_FOOTER);
    pem
}

/// The configured public key could not be loaded.
#[derive(Debug, Error)]
#[error("Invalid webhook public key: {0}")]
pub struct SignatureKeyError(#[from] jsonwebtoken::errors::Error);

/// Verifies webhook bodies against one public key.
#[derive(Clone)]
pub struct SignatureVerifier {
    key: DecodingKey,
    algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Loads the public key from PEM.
    pub fn new(
        public_key_pem: &str,
        algorithm: SignatureAlgorithm,
    ) -> Result<Self, SignatureKeyError> {
        let key = algorithm.decoding_key(public_key_pem.as_bytes())?;
        Ok(Self { key, algorithm })
    }

    /// Loads the public key from a stored fragment (PEM body only).
    pub fn from_fragment(
        fragment: &str,
        algorithm: SignatureAlgorithm,
    ) -> Result<Self, SignatureKeyError> {
        Self::new(&wrap_public_key(fragment), algorithm)
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Verifies `body` against a raw `Content-Signature` header value.
    pub fn verify(&self, body: &[u8], signature_header: &str) -> bool {
        match ContentSignature::parse(signature_header) {
            Ok(signature) => self.verify_signature(body, &signature),
            Err(_) => false,
        }
    }

    /// Verifies `body` against already parsed header parameters.
    pub fn verify_signature(&self, body: &[u8], signature: &ContentSignature) -> bool {
        if body.is_empty() {
            return false;
        }

        let Some(raw) = signature.signature_bytes() else {
            return false;
        };
        if raw.is_empty() {
            return false;
        }

        // jsonwebtoken takes the signature as unpadded base64url
        let normalized = URL_SAFE_NO_PAD.encode(raw);
        matches!(
            jsonwebtoken::crypto::verify(
                &normalized,
                body,
                &self.key,
                self.algorithm.as_jwt_algorithm(),
            ),
            Ok(true)
        )
    }
}

/// One-shot verification: RS256 over `body` with a PEM-encoded public key.
pub fn verify(body: &[u8], signature_header: &str, public_key_pem: &str) -> bool {
    match SignatureVerifier::new(public_key_pem, SignatureAlgorithm::Rs256) {
        Ok(verifier) => verifier.verify(body, signature_header),
        Err(_) => false,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const BODY: &[u8] = br#"{"eventType":"InvoicePaid","invoice":{"id":"inv1"}}"#;

    // ══════════════════════════════════════════════════════════════
    // Header Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_extracts_alg_and_digest() {
        let header = ContentSignature::parse("alg=RS256; digest=abc-_def").unwrap();

        assert_eq!(header.alg, "RS256");
        assert_eq!(header.digest, "abc-_def");
    }

    #[test]
    fn parse_header_is_case_insensitive() {
        let header = ContentSignature::parse("ALG=RS256;DIGEST=xyz").unwrap();

        assert_eq!(header.alg, "RS256");
        assert_eq!(header.digest, "xyz");
    }

    #[test]
    fn parse_header_without_digest_fails() {
        let result = ContentSignature::parse("alg=RS256");

        assert_eq!(result, Err(ContentSignatureError::MissingDigest));
    }

    #[test]
    fn parse_header_without_alg_fails() {
        let result = ContentSignature::parse("digest=abc-_def");

        assert_eq!(result, Err(ContentSignatureError::MissingAlgorithm));
        assert_eq!(ContentSignatureError::MissingAlgorithm.parameter(), "alg");
    }

    #[test]
    fn parse_header_accepts_any_parameter_order() {
        let header = ContentSignature::parse("digest=xyz; alg=RS256").unwrap();

        assert_eq!(header.alg, "RS256");
        assert_eq!(header.digest, "xyz");
    }

    #[test]
    fn parse_header_with_empty_digest_fails() {
        let result = ContentSignature::parse("alg=RS256; digest=");

        assert_eq!(result, Err(ContentSignatureError::MissingDigest));
        assert_eq!(ContentSignatureError::MissingDigest.parameter(), "digest");
    }

    #[test]
    fn parse_empty_header_fails() {
        assert!(ContentSignature::parse("").is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Base64url Decoding Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn decode_urlsafe_base64_pads_input() {
        // "hello" -> aGVsbG8 (unpadded)
        assert_eq!(decode_urlsafe_base64("aGVsbG8").unwrap(), b"hello");
        assert_eq!(decode_urlsafe_base64("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn decode_urlsafe_base64_maps_alphabet() {
        // 0xfb 0xff encodes to "+/8" in the standard alphabet
        assert_eq!(decode_urlsafe_base64("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn decode_urlsafe_base64_rejects_garbage() {
        assert!(decode_urlsafe_base64("***not base64***").is_none());
        assert!(decode_urlsafe_base64("a").is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // PEM Wrapping Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn wrap_public_key_adds_header_and_footer() {
        let pem = wrap_public_key(&public_key_fragment());

        assert!(pem.starts_with(PEM_HEADER));
        assert!(pem.ends_with(PEM_FOOTER));
        assert!(pem.lines().all(|line| line.len() <= PEM_LINE_WIDTH));
    }

    #[test]
    fn wrap_public_key_accepts_single_line_fragment() {
        let single_line: String = public_key_fragment().split_whitespace().collect();

        let verifier = SignatureVerifier::from_fragment(&single_line, SignatureAlgorithm::Rs256);

        assert!(verifier.is_ok());
    }

    #[test]
    fn wrap_public_key_keeps_full_pem() {
        let pem = wrap_public_key(PUBLIC_KEY_PEM);
        assert_eq!(pem, PUBLIC_KEY_PEM.trim());
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_matching_signature() {
        let header = sign_header(BODY);

        assert!(verify(BODY, &header, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_mutated_body() {
        let header = sign_header(BODY);
        let mut tampered = BODY.to_vec();
        tampered[5] ^= 0x01;

        assert!(!verify(&tampered, &header, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_other_key() {
        let header = sign_header(BODY);

        assert!(!verify(BODY, &header, OTHER_PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_empty_header() {
        assert!(!verify(BODY, "", PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_header_without_digest() {
        assert!(!verify(BODY, "alg=RS256", PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_non_base64_digest() {
        assert!(!verify(BODY, "alg=RS256; digest=%%%%", PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_valid_base64_that_does_not_verify() {
        let digest = URL_SAFE_NO_PAD.encode([7u8; 256]);
        let header = format!("alg=RS256; digest={}", digest);

        assert!(!verify(BODY, &header, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_rejects_invalid_key() {
        let header = sign_header(BODY);

        assert!(!verify(BODY, &header, "not a key"));
    }

    #[test]
    fn verify_rejects_empty_body() {
        let header = sign_header(b"");

        assert!(!verify(b"", &header, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_accepts_padded_digest() {
        let header = sign_header(BODY);
        let padded = format!("{}==", header);
        // 256-byte RSA signature encodes to 342 unpadded chars, so two pad chars complete it
        assert!(verify(BODY, &padded, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verify_ignores_declared_algorithm_name() {
        let header = sign_header(BODY).replace("alg=RS256", "alg=HS512");

        assert!(verify(BODY, &header, PUBLIC_KEY_PEM));
    }

    #[test]
    fn verifier_from_fragment_verifies() {
        let verifier =
            SignatureVerifier::from_fragment(&public_key_fragment(), SignatureAlgorithm::Rs256)
                .unwrap();

        assert!(verifier.verify(BODY, &sign_header(BODY)));
        assert_eq!(verifier.algorithm(), SignatureAlgorithm::Rs256);
    }

    #[test]
    fn verifier_rejects_rsa_key_for_ec_algorithm() {
        let result = SignatureVerifier::new(PUBLIC_KEY_PEM, SignatureAlgorithm::Es256);

        assert!(result.is_err());
    }
}
