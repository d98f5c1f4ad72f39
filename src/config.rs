use crate::error::ConfigError;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";

/// Credentials for the two external collaborators, read once at startup.
/// A missing key is fatal before the first pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub tavily_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            groq_api_key: require(GROQ_API_KEY)?,
            tavily_api_key: require(TAVILY_API_KEY)?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_is_reported_by_name() {
        let err = require("DEEPBRIEF_TEST_UNSET_CREDENTIAL").unwrap_err();
        assert_eq!(
            err.to_string(),
            "required credential DEEPBRIEF_TEST_UNSET_CREDENTIAL is not set"
        );
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        std::env::set_var("DEEPBRIEF_TEST_BLANK_CREDENTIAL", "  ");
        assert!(require("DEEPBRIEF_TEST_BLANK_CREDENTIAL").is_err());
        std::env::remove_var("DEEPBRIEF_TEST_BLANK_CREDENTIAL");
    }
}
