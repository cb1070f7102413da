use serde::{Deserialize, Serialize};

use crate::encode::{EmptyPolicy, SalesSeparator};
use crate::{formato606, formato607};

/// Configuration for the export orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// What a Formato 606 export does with an empty period.
    /// Default: header-only file.
    pub empty_purchases: EmptyPolicy,
    /// What a Formato 607 export does with an empty period.
    /// Default: reject with "No hay ventas para exportar".
    pub empty_sales: EmptyPolicy,
    /// Separator of the 607 text export (the 606 text export always uses `|`).
    pub sales_separator: SalesSeparator,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            empty_purchases: formato606::DEFAULT_EMPTY_POLICY,
            empty_sales: formato607::DEFAULT_EMPTY_POLICY,
            sales_separator: SalesSeparator::Comma,
        }
    }
}

/// Builder for [`ExportConfig`].
///
/// # Example
///
/// ```
/// use dgii_formatos::encode::{EmptyPolicy, SalesSeparator};
/// use dgii_formatos::export::ExportConfigBuilder;
///
/// // One uniform empty-period policy for both forms
/// let config = ExportConfigBuilder::new()
///     .empty_policy(EmptyPolicy::Reject)
///     .sales_separator(SalesSeparator::Tab)
///     .build();
/// assert_eq!(config.empty_purchases, EmptyPolicy::Reject);
/// ```
#[derive(Debug, Default)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty_purchases(mut self, policy: EmptyPolicy) -> Self {
        self.config.empty_purchases = policy;
        self
    }

    pub fn empty_sales(mut self, policy: EmptyPolicy) -> Self {
        self.config.empty_sales = policy;
        self
    }

    /// Apply the same empty-period policy to both forms.
    pub fn empty_policy(self, policy: EmptyPolicy) -> Self {
        self.empty_purchases(policy).empty_sales(policy)
    }

    pub fn sales_separator(mut self, separator: SalesSeparator) -> Self {
        self.config.sales_separator = separator;
        self
    }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}
