//! # sql-naming-lint-rules
//!
//! Built-in naming rules for sql-naming-lint.
//!
//! Every rule is a thin wrapper around the shared
//! [`NamingRule`](sql_naming_lint_core::NamingRule) evaluator, fixing the
//! construct it judges and the prefix it expects.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CR01 | `constraints.pk_constraint_naming` | Primary key constraint names start with `pk_` |
//! | CR02 | `constraints.fk_constraint_naming` | Foreign key constraint names start with `fk_` |
//! | CR03 | `constraints.chk_constraint_naming` | Check constraint names start with `chk_` |
//! | CR04 | `constraints.uc_constraint_naming` | Unique constraint names start with `uc_` |
//! | CR05 | `constraints.df_constraint_naming` | Default constraint names start with `df_` |
//! | FN01 | `functions.function_naming` | Function names start with `fun_` |
//! | FN02 | `functions.function_parameter_naming` | Function parameter names start with `p_` |
//! | VW01 | `views.view_naming` | View names start with `v_` |
//!
//! ## Usage
//!
//! ```ignore
//! use sql_naming_lint_core::Analyzer;
//! use sql_naming_lint_rules::{PkConstraintNaming, ViewNaming};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./parse-trees")
//!     .rule(PkConstraintNaming::new())
//!     .rule(ViewNaming::new().expected_prefix("vw_"))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chk_constraint_naming;
pub mod df_constraint_naming;
pub mod fk_constraint_naming;
pub mod function_naming;
pub mod function_parameter_naming;
pub mod pk_constraint_naming;
mod presets;
pub mod uc_constraint_naming;
pub mod view_naming;

#[cfg(test)]
mod testing;

pub use chk_constraint_naming::ChkConstraintNaming;
pub use df_constraint_naming::DfConstraintNaming;
pub use fk_constraint_naming::FkConstraintNaming;
pub use function_naming::FunctionNaming;
pub use function_parameter_naming::FunctionParameterNaming;
pub use pk_constraint_naming::PkConstraintNaming;
pub use presets::{
    all_rules, constraint_rules, function_rules, rules_from_config, view_rules, Preset,
};
pub use uc_constraint_naming::UcConstraintNaming;
pub use view_naming::ViewNaming;

/// Re-export core types for convenience.
pub use sql_naming_lint_core::{Rule, Severity, Violation};
