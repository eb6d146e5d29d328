//! Import options

use serde::{Deserialize, Serialize};

/// How records without a captured identity are matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// A record with no identity matches an account on the same domain that
    /// has no identity either. Two such accounts collapse into one.
    #[default]
    Lenient,
    /// A record with no identity never matches and is always created
    RequireIdentity,
}

/// Options for an import job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Compute outcomes without writing to the repository
    pub dry_run: bool,
    /// Matching rule for identity-less records
    pub match_policy: MatchPolicy,
}

impl ImportOptions {
    /// Options for a live import
    pub fn live() -> Self {
        Self::default()
    }

    /// Options for a dry run
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Set the dry-run flag
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the match policy
    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}
