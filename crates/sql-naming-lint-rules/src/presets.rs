//! Rule presets for common configurations.

use crate::{
    chk_constraint_naming, df_constraint_naming, fk_constraint_naming, function_naming,
    function_parameter_naming, pk_constraint_naming, uc_constraint_naming, view_naming,
    ChkConstraintNaming, DfConstraintNaming, FkConstraintNaming, FunctionNaming,
    FunctionParameterNaming, PkConstraintNaming, UcConstraintNaming, ViewNaming,
};
use sql_naming_lint_core::{Config, RuleBox};
use tracing::{debug, warn};

/// Builds one rule, applying the configured prefix and matcher bounds.
macro_rules! configured {
    ($rule:ty, $module:ident, $config:expr) => {{
        let config: &Config = $config;
        let mut rule = <$rule>::new().lookahead(config.matcher);
        if let Some(prefix) = config.expected_prefix($module::NAME, $module::CODE) {
            debug!("{}: expected prefix '{}'", $module::NAME, prefix);
            rule = rule.expected_prefix(prefix);
        }
        Box::new(rule) as RuleBox
    }};
}

/// Preset configurations for sql-naming-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every naming rule.
    #[default]
    All,
    /// The five constraint rules.
    Constraints,
    /// Function and parameter names.
    Functions,
    /// View names.
    Views,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 4] = [Self::All, Self::Constraints, Self::Functions, Self::Views];

    /// Looks a preset up by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "all" | "custom" => Some(Self::All),
            "constraints" => Some(Self::Constraints),
            "functions" => Some(Self::Functions),
            "views" => Some(Self::Views),
            _ => None,
        }
    }

    /// The configuration name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Constraints => "constraints",
            Self::Functions => "functions",
            Self::Views => "views",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        self.configured(&Config::default())
    }

    /// Returns the rules for this preset with prefixes and matcher bounds
    /// taken from `config`.
    #[must_use]
    pub fn configured(self, config: &Config) -> Vec<RuleBox> {
        let mut rules = Vec::new();
        if matches!(self, Self::All | Self::Constraints) {
            rules.extend([
                configured!(PkConstraintNaming, pk_constraint_naming, config),
                configured!(FkConstraintNaming, fk_constraint_naming, config),
                configured!(ChkConstraintNaming, chk_constraint_naming, config),
                configured!(UcConstraintNaming, uc_constraint_naming, config),
                configured!(DfConstraintNaming, df_constraint_naming, config),
            ]);
        }
        if matches!(self, Self::All | Self::Functions) {
            rules.extend([
                configured!(FunctionNaming, function_naming, config),
                configured!(FunctionParameterNaming, function_parameter_naming, config),
            ]);
        }
        if matches!(self, Self::All | Self::Views) {
            rules.push(configured!(ViewNaming, view_naming, config));
        }
        rules
    }
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::All.rules()
}

/// Returns the constraint rules (CR01-CR05).
#[must_use]
pub fn constraint_rules() -> Vec<RuleBox> {
    Preset::Constraints.rules()
}

/// Returns the function rules (FN01, FN02).
#[must_use]
pub fn function_rules() -> Vec<RuleBox> {
    Preset::Functions.rules()
}

/// Returns the view rule (VW01).
#[must_use]
pub fn view_rules() -> Vec<RuleBox> {
    Preset::Views.rules()
}

/// Returns the rules selected by `config.preset`, configured from `config`.
///
/// An unknown preset name falls back to every rule.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::All,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            warn!("Unknown preset '{}', using all rules", name);
            Preset::All
        }),
    };
    preset.configured(config)
}
