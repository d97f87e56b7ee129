//! The shared naming-rule evaluator.
//!
//! Every naming rule runs the same pipeline: check the node kind, confirm the
//! node binds a name for the rule's construct, extract the name, and compare
//! it to the configured prefix. [`NamingRule`] implements that pipeline once;
//! rules differ only in their [`Construct`] and [`NamingConfig`].

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::trace;

use crate::classifier::{bound_constraint_name, is_create_function};
use crate::extractor::{self, NameCandidate, Subject, Target};
use crate::matcher::{self, KeywordSequence, Lookahead};
use crate::tree::{AncestorPath, NodeKind, SyntaxNode};

/// Node kinds visited by the constraint rules.
pub const CONSTRAINT_KINDS: &[NodeKind] = &[
    NodeKind::NakedIdentifier,
    NodeKind::QuotedIdentifier,
    NodeKind::ObjectReference,
];

/// Node kinds visited by the function-name rule.
pub const FUNCTION_KINDS: &[NodeKind] = &[
    NodeKind::FunctionDefinition,
    NodeKind::CreateFunctionStatement,
];

/// Node kinds visited by the parameter rule.
pub const PARAMETER_KINDS: &[NodeKind] = &[
    NodeKind::FunctionDefinition,
    NodeKind::CreateFunctionStatement,
    NodeKind::Statement,
    NodeKind::CreateStatement,
];

/// Node kinds visited by the view rule.
pub const VIEW_KINDS: &[NodeKind] = &[
    NodeKind::CreateViewStatement,
    NodeKind::CreateMaterializedViewStatement,
];

/// The kind of schema object a rule judges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `CONSTRAINT name PRIMARY KEY`
    PrimaryKey,
    /// `CONSTRAINT name FOREIGN KEY`
    ForeignKey,
    /// `CONSTRAINT name CHECK`
    Check,
    /// `CONSTRAINT name UNIQUE`
    Unique,
    /// `CONSTRAINT name DEFAULT`
    Default,
    /// `CREATE FUNCTION name`
    FunctionName,
    /// Each parameter of `CREATE FUNCTION name (..)`
    FunctionParameter,
    /// `CREATE [MATERIALIZED] VIEW name`
    ViewName,
}

impl Construct {
    /// The five constraint constructs, in classification priority order.
    pub const CONSTRAINTS: [Self; 5] = [
        Self::PrimaryKey,
        Self::ForeignKey,
        Self::Check,
        Self::Unique,
        Self::Default,
    ];

    /// True for the `CONSTRAINT`-bound constructs.
    #[must_use]
    pub fn is_constraint(self) -> bool {
        Self::CONSTRAINTS.contains(&self)
    }

    /// Keywords that open the construct after its name. Empty for
    /// constructs whose name follows its declaring keyword.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::PrimaryKey => &["PRIMARY", "KEY"],
            Self::ForeignKey => &["FOREIGN", "KEY"],
            Self::Check => &["CHECK"],
            Self::Unique => &["UNIQUE"],
            Self::Default => &["DEFAULT"],
            Self::FunctionName | Self::FunctionParameter | Self::ViewName => &[],
        }
    }

    /// Conventional prefix for names of this construct.
    #[must_use]
    pub fn default_prefix(self) -> &'static str {
        match self {
            Self::PrimaryKey => "pk_",
            Self::ForeignKey => "fk_",
            Self::Check => "chk_",
            Self::Unique => "uc_",
            Self::Default => "df_",
            Self::FunctionName => "fun_",
            Self::FunctionParameter => "p_",
            Self::ViewName => "v_",
        }
    }

    /// Node kinds a rule for this construct visits.
    #[must_use]
    pub fn default_kinds(self) -> &'static [NodeKind] {
        match self {
            Self::PrimaryKey | Self::ForeignKey | Self::Check | Self::Unique | Self::Default => {
                CONSTRAINT_KINDS
            }
            Self::FunctionName => FUNCTION_KINDS,
            Self::FunctionParameter => PARAMETER_KINDS,
            Self::ViewName => VIEW_KINDS,
        }
    }

    /// What the extractor looks for.
    #[must_use]
    pub fn subject(self) -> Subject {
        match self {
            Self::PrimaryKey | Self::ForeignKey | Self::Check | Self::Unique | Self::Default => {
                Subject::ConstraintName
            }
            Self::FunctionName => Subject::FunctionName,
            Self::FunctionParameter => Subject::Parameters,
            Self::ViewName => Subject::ViewName,
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey => f.write_str("PRIMARY KEY constraint"),
            Self::ForeignKey => f.write_str("FOREIGN KEY constraint"),
            Self::Check => f.write_str("CHECK constraint"),
            Self::Unique => f.write_str("UNIQUE constraint"),
            Self::Default => f.write_str("DEFAULT constraint"),
            Self::FunctionName => f.write_str("Function"),
            Self::FunctionParameter => f.write_str("Function parameter"),
            Self::ViewName => f.write_str("View"),
        }
    }
}

/// Immutable per-rule settings, fixed when the rule is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Prefix every judged name must start with (compared case-insensitively).
    pub expected_prefix: String,
    /// Keywords that must follow a bound constraint name.
    pub construct_keywords: KeywordSequence,
    /// Node kinds the rule evaluates.
    pub kinds_of_interest: Vec<NodeKind>,
    /// Matcher bounds.
    pub lookahead: Lookahead,
}

impl NamingConfig {
    /// The conventional settings for `construct`.
    #[must_use]
    pub fn for_construct(construct: Construct) -> Self {
        Self {
            expected_prefix: construct.default_prefix().to_string(),
            construct_keywords: KeywordSequence::new(construct.keywords()),
            kinds_of_interest: construct.default_kinds().to_vec(),
            lookahead: Lookahead::default(),
        }
    }
}

/// Why an evaluation produced no finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    /// The node's kind is outside the rule's interest set.
    #[error("{0:?} nodes are not evaluated by this rule")]
    KindNotOfInterest(NodeKind),
    /// The node does not bind a name for the construct.
    #[error("not a bound {0} name")]
    NotBoundName(Construct),
    /// The bound name introduces a different construct.
    #[error("expected `{expected}` after the name, found {found}")]
    ConstructMismatch {
        /// The rule's keyword sequence.
        expected: String,
        /// The construct classified instead, if any.
        found: String,
    },
    /// Every extraction strategy came up empty.
    #[error("no {0} name could be extracted")]
    NameNotFound(Construct),
    /// All extracted names carry the expected prefix.
    #[error("{0} name conforms")]
    Conforming(Construct),
}

/// A non-conforming name, anchored at the node that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding<'t> {
    /// Node the report points at.
    pub anchor: &'t SyntaxNode,
    /// The judged name, after qualified-name reduction.
    pub subject_name: String,
    /// The prefix the name should have started with.
    pub expected_prefix: String,
    /// Human-readable message.
    pub message: String,
}

/// Shared evaluator behind every naming rule.
///
/// Evaluation is a pure function of the node, its ancestors, and the
/// immutable configuration, so one instance may be shared across threads.
#[derive(Debug, Clone)]
pub struct NamingRule {
    construct: Construct,
    config: NamingConfig,
}

impl NamingRule {
    /// Creates an evaluator with the conventional settings for `construct`.
    #[must_use]
    pub fn new(construct: Construct) -> Self {
        Self::with_config(construct, NamingConfig::for_construct(construct))
    }

    /// Creates an evaluator with explicit settings.
    #[must_use]
    pub fn with_config(construct: Construct, config: NamingConfig) -> Self {
        Self { construct, config }
    }

    /// Replaces the expected prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.expected_prefix = prefix.into();
        self
    }

    /// Replaces the matcher bounds.
    #[must_use]
    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.config.lookahead = lookahead;
        self
    }

    /// The judged construct.
    #[must_use]
    pub fn construct(&self) -> Construct {
        self.construct
    }

    /// The settings in force.
    #[must_use]
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Evaluates one visited node, returning at most one finding.
    ///
    /// Never fails: every reason for not reporting is logged at trace level
    /// and mapped to `None`.
    #[must_use]
    pub fn evaluate<'t>(
        &self,
        node: &'t SyntaxNode,
        ancestors: &AncestorPath<'t>,
    ) -> Option<Finding<'t>> {
        match self.decide(node, ancestors) {
            Ok(finding) => Some(finding),
            Err(skip) => {
                trace!("{}: skipped {}: {}", self.construct, node, skip);
                None
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate), exposing the reason for skipping.
    ///
    /// # Errors
    ///
    /// Returns the [`Skip`] reason when the node yields no finding.
    pub fn decide<'t>(
        &self,
        node: &'t SyntaxNode,
        ancestors: &AncestorPath<'t>,
    ) -> Result<Finding<'t>, Skip> {
        if !self.config.kinds_of_interest.contains(&node.kind()) {
            return Err(Skip::KindNotOfInterest(node.kind()));
        }

        match self.construct {
            Construct::FunctionName | Construct::FunctionParameter if !is_create_function(node) => {
                return Err(Skip::NotBoundName(self.construct));
            }
            c if c.is_constraint() => self.confirm_constraint(node, ancestors)?,
            _ => {}
        }

        let target = Target {
            node,
            ancestors,
            lookahead: self.config.lookahead,
        };
        let candidates = extractor::extract(self.construct.subject(), &target);
        if candidates.is_empty() {
            return Err(Skip::NameNotFound(self.construct));
        }

        candidates
            .into_iter()
            .find(|candidate| !self.conforms(&candidate.name))
            .map(|candidate| self.finding(candidate))
            .ok_or(Skip::Conforming(self.construct))
    }

    fn confirm_constraint(&self, node: &SyntaxNode, ancestors: &AncestorPath<'_>) -> Result<(), Skip> {
        let bound =
            bound_constraint_name(node, ancestors).ok_or(Skip::NotBoundName(self.construct))?;

        let siblings = bound.parent.children();
        let candidates = constraint_sequences().iter().map(|(construct, sequence)| {
            let sequence = if *construct == self.construct {
                &self.config.construct_keywords
            } else {
                sequence
            };
            (*construct, sequence)
        });

        match matcher::classify(bound.following(), siblings, candidates, self.config.lookahead) {
            Some(found) if found == self.construct => Ok(()),
            found => Err(Skip::ConstructMismatch {
                expected: self.config.construct_keywords.to_string(),
                found: found.map_or_else(|| "no constraint keywords".to_string(), |c| c.to_string()),
            }),
        }
    }

    fn conforms(&self, name: &str) -> bool {
        name.to_lowercase()
            .starts_with(&self.config.expected_prefix.to_lowercase())
    }

    fn finding<'t>(&self, candidate: NameCandidate<'t>) -> Finding<'t> {
        let message = format!(
            "{} name '{}' should start with '{}'.",
            self.construct, candidate.name, self.config.expected_prefix
        );
        Finding {
            anchor: candidate.anchor,
            subject_name: candidate.name,
            expected_prefix: self.config.expected_prefix.clone(),
            message,
        }
    }
}

fn constraint_sequences() -> &'static [(Construct, KeywordSequence); 5] {
    static SEQUENCES: OnceLock<[(Construct, KeywordSequence); 5]> = OnceLock::new();
    SEQUENCES.get_or_init(|| {
        Construct::CONSTRAINTS.map(|construct| (construct, KeywordSequence::new(construct.keywords())))
    })
}
