//! Gateway configuration (RBKmoney)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::payment::{validate_segment, SignatureAlgorithm, SignatureVerifier};

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Shop id issued by the gateway
    #[serde(default = "default_shop_id")]
    pub shop_id: String,

    /// API bearer key
    pub api_key: SecretString,

    /// Webhook public key, either the bare base64 body or a full PEM
    pub webhook_key: String,

    /// Algorithm the webhook key signs with
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,

    /// Invoice API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Checkout script URL
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,

    /// Host application id, first order reference segment
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Merchant instance id, second order reference segment
    #[serde(default = "default_merchant_id")]
    pub merchant_id: String,
}

impl GatewayConfig {
    /// Builds the webhook signature verifier from the configured key.
    pub fn webhook_verifier(&self) -> Result<SignatureVerifier, ValidationError> {
        SignatureVerifier::from_fragment(&self.webhook_key, self.signature_algorithm)
            .map_err(|e| ValidationError::InvalidWebhookKey(e.to_string()))
    }

    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.shop_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("RBKMONEY__GATEWAY__SHOP_ID"));
        }
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("RBKMONEY__GATEWAY__API_KEY"));
        }
        if self.webhook_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("RBKMONEY__GATEWAY__WEBHOOK_KEY"));
        }

        validate_url("api_base_url", &self.api_base_url, environment)?;
        validate_url("checkout_url", &self.checkout_url, environment)?;

        validate_segment("tenant", &self.tenant_id)
            .map_err(|_| ValidationError::InvalidReferenceSegment("tenant"))?;
        validate_segment("merchant", &self.merchant_id)
            .map_err(|_| ValidationError::InvalidReferenceSegment("merchant"))?;

        self.webhook_verifier()?;
        Ok(())
    }
}

fn validate_url(
    name: &'static str,
    url: &str,
    environment: &Environment,
) -> Result<(), ValidationError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if *environment == Environment::Production && !url.starts_with("https://") {
        return Err(ValidationError::UrlMustBeHttps(name));
    }
    Ok(())
}

fn default_shop_id() -> String {
    "TEST".to_string()
}

fn default_api_base_url() -> String {
    "https://api.rbk.money/v1/".to_string()
}

fn default_checkout_url() -> String {
    "https://checkout.rbk.money/checkout.js".to_string()
}

fn default_tenant_id() -> String {
    "shop".to_string()
}

fn default_merchant_id() -> String {
    "main".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::signature::test_support::{public_key_fragment, PUBLIC_KEY_PEM};

    fn valid_config() -> GatewayConfig {
        GatewayConfig {
            shop_id: default_shop_id(),
            api_key: SecretString::new("secret-key".to_string()),
            webhook_key: public_key_fragment(),
            signature_algorithm: SignatureAlgorithm::default(),
            api_base_url: default_api_base_url(),
            checkout_url: default_checkout_url(),
            tenant_id: default_tenant_id(),
            merchant_id: default_merchant_id(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_full_pem_is_accepted() {
        let config = GatewayConfig {
            webhook_key: PUBLIC_KEY_PEM.to_string(),
            ..valid_config()
        };
        assert!(config.webhook_verifier().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let output = format!("{:?}", valid_config());
        assert!(!output.contains("secret-key"));
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = GatewayConfig {
            api_key: SecretString::new(String::new()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_missing_webhook_key() {
        let config = GatewayConfig {
            webhook_key: "  ".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_garbage_webhook_key() {
        let config = GatewayConfig {
            webhook_key: "bm90IGEga2V5".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidWebhookKey(_))
        ));
    }

    #[test]
    fn test_validation_short_merchant_id() {
        let config = GatewayConfig {
            merchant_id: "m".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidReferenceSegment("merchant"))
        ));
    }

    #[test]
    fn test_validation_plain_http_only_outside_production() {
        let config = GatewayConfig {
            api_base_url: "http://localhost:9000/v1/".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::UrlMustBeHttps("api_base_url"))
        ));
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = GatewayConfig {
            checkout_url: "checkout.js".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidUrl("checkout_url"))
        ));
    }
}
