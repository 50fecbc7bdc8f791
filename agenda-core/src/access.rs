//! Gate in front of the AI features.

use crate::config::AgendaConfig;
use crate::error::AgendaResult;
use crate::gemini::GeminiClient;

/// Holds the Gemini credential, if one has been configured or selected.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    api_key: Option<String>,
}

impl AccessGate {
    pub fn from_config(config: &AgendaConfig) -> Self {
        let mut gate = AccessGate::default();
        if let Some(ref key) = config.gemini_api_key {
            gate.select_credential(key);
        }
        gate
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Use `key` from now on. Blank keys clear the credential.
    pub fn select_credential(&mut self, key: impl AsRef<str>) {
        let key = key.as_ref().trim();
        self.api_key = (!key.is_empty()).then(|| key.to_string());
    }

    /// A client when a credential is present.
    pub fn client(&self, config: &AgendaConfig) -> AgendaResult<Option<GeminiClient>> {
        self.api_key
            .as_deref()
            .map(|key| GeminiClient::new(key, config))
            .transpose()
    }
}
