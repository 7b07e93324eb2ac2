// Provisioning Inputs
// The runtime injects exactly two values at container start; everything
// else about the launch is static per variant.

use url::Url;

use crate::domain::ApiToken;
use crate::error::BootstrapError;
use crate::port::Environment;

/// Secret credential injected by the host/container runtime
pub const API_TOKEN_VAR: &str = "MINION_API_TOKEN";

/// Upstream API endpoint to target
pub const API_BASE_URL_VAR: &str = "MINION_API_BASE_URL";

/// Validated provisioning inputs.
///
/// Collected once, up front; the procedure never reads ambient environment
/// after this point, which is what makes it testable without a real
/// process environment.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    pub api_token: ApiToken,
    pub api_base_url: Url,
}

impl ProvisioningConfig {
    /// Read and validate both required variables. Fails before any
    /// filesystem side effect happens.
    ///
    /// # Errors
    /// - BootstrapError::MissingVar / EmptyVar for absent or blank values
    /// - BootstrapError::InvalidBaseUrl if the endpoint does not parse
    pub fn from_environment(env: &dyn Environment) -> Result<Self, BootstrapError> {
        let token = require(env, API_TOKEN_VAR)?;
        let base_url = require(env, API_BASE_URL_VAR)?;

        // The adapter parses the same value at startup; rejecting it here
        // only moves an inevitable failure before the credential write.
        let api_base_url = Url::parse(&base_url).map_err(|source| BootstrapError::InvalidBaseUrl {
            value: base_url,
            source,
        })?;

        Ok(Self {
            api_token: ApiToken::new(token),
            api_base_url,
        })
    }
}

fn require(env: &dyn Environment, name: &'static str) -> Result<String, BootstrapError> {
    match env.var(name) {
        None => Err(BootstrapError::MissingVar(name)),
        // Whitespace-only counts as empty: a token of spaces is an
        // injection bug upstream, not a credential.
        Some(value) if value.trim().is_empty() => Err(BootstrapError::EmptyVar(name)),
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::environment::mocks::MapEnvironment;

    fn valid_env() -> MapEnvironment {
        MapEnvironment::new()
            .with(API_TOKEN_VAR, "sk-test123")
            .with(API_BASE_URL_VAR, "https://api.example.com")
    }

    #[test]
    fn test_valid_environment_parses() {
        let config = ProvisioningConfig::from_environment(&valid_env()).unwrap();

        assert_eq!(config.api_token.expose(), "sk-test123");
        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let env = MapEnvironment::new().with(API_BASE_URL_VAR, "https://api.example.com");

        let err = ProvisioningConfig::from_environment(&env).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingVar(API_TOKEN_VAR)));
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        let env = MapEnvironment::new().with(API_TOKEN_VAR, "sk-test123");

        let err = ProvisioningConfig::from_environment(&env).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingVar(API_BASE_URL_VAR)));
    }

    #[test]
    fn test_empty_and_blank_values_are_fatal() {
        let empty = MapEnvironment::new()
            .with(API_TOKEN_VAR, "")
            .with(API_BASE_URL_VAR, "https://api.example.com");
        assert!(matches!(
            ProvisioningConfig::from_environment(&empty).unwrap_err(),
            BootstrapError::EmptyVar(API_TOKEN_VAR)
        ));

        let blank = MapEnvironment::new()
            .with(API_TOKEN_VAR, "sk-test123")
            .with(API_BASE_URL_VAR, "   ");
        assert!(matches!(
            ProvisioningConfig::from_environment(&blank).unwrap_err(),
            BootstrapError::EmptyVar(API_BASE_URL_VAR)
        ));
    }

    #[test]
    fn test_malformed_base_url_is_fatal() {
        let env = MapEnvironment::new()
            .with(API_TOKEN_VAR, "sk-test123")
            .with(API_BASE_URL_VAR, "not a url");

        let err = ProvisioningConfig::from_environment(&env).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidBaseUrl { .. }));
    }
}
