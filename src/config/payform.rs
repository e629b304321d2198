//! Checkout form branding

use serde::Deserialize;

/// Optional branding shown on the hosted checkout form.
///
/// Blank values are treated as unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayformConfig {
    /// Company name shown in the form header
    pub company_name: Option<String>,

    /// Text under the company name
    pub description: Option<String>,

    /// Pay button label
    pub button_label: Option<String>,

    /// Logo URL
    pub logo_url: Option<String>,
}

impl PayformConfig {
    /// Branding as `data-*` attribute pairs, blank values skipped.
    pub fn data_attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("data-name", &self.company_name),
            ("data-description", &self.description),
            ("data-pay-button-label", &self.button_label),
            ("data-logo", &self.logo_url),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }
}
