//! Reconciliation engine
//!
//! Decides, per normalized record, whether the repository already holds the
//! account (update, merging provenance) or not (create). Dry runs go through
//! the same [`Reconciler::plan`] as live runs and only skip the writes.

mod options;
mod provenance;

pub use options::{ImportOptions, MatchPolicy};
pub use provenance::merge_provenance;

use serde::{Deserialize, Serialize};

use crate::database::{AccountPatch, StoredAccount};
use crate::error::Result;
use crate::model::{NormalizedRecord, SkipReason};

/// Lookup key for an incoming record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKey {
    pub domain: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl MatchKey {
    /// Build the key for a normalized record
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            domain: record.domain.clone(),
            username: record.identity.username.clone(),
            email: record.identity.email.clone(),
        }
    }

    /// Check whether a username or email was captured
    pub fn has_identity(&self) -> bool {
        self.username.is_some() || self.email.is_some()
    }

    /// The match rule
    ///
    /// Same domain, and the key's identity equals the stored identity of the
    /// same kind. A key without identity matches an account without identity.
    pub fn matches(&self, account: &StoredAccount) -> bool {
        if account.domain != self.domain {
            return false;
        }

        match (&self.username, &self.email) {
            (Some(username), _) => account.username.as_deref() == Some(username.as_str()),
            (None, Some(email)) => account.email.as_deref() == Some(email.as_str()),
            (None, None) => account.username.is_none() && account.email.is_none(),
        }
    }
}

/// Storage the engine reconciles against
///
/// Implementations must keep the lookup and the following write for one key
/// atomic with respect to other writers of the same (domain, identity) key.
/// [`AccountRepository::atomically`] is the hook for that; the engine wraps
/// every live row in it.
pub trait AccountRepository {
    /// Find the account matching the key, if any (see [`MatchKey::matches`])
    fn find_matching(&self, key: &MatchKey) -> Result<Option<StoredAccount>>;

    /// Create an account from a record with a single-entry provenance list
    fn create(&mut self, record: &NormalizedRecord) -> Result<StoredAccount>;

    /// Apply a patch and bump the update timestamp
    fn update(&mut self, id: &str, patch: &AccountPatch) -> Result<StoredAccount>;

    /// Run `f` as one unit of work
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        f(self)
    }
}

/// Decision for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// No matching account exists
    Create,
    /// An account matched; apply the patch to it
    Update {
        account_id: String,
        patch: AccountPatch,
    },
}

/// Result of processing one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A new account was (or would be) created. No ID in dry runs.
    Created { account_id: Option<String> },
    /// An existing account was (or would be) updated
    Updated { account_id: String },
    /// The row had no usable URL or domain
    Skipped { reason: SkipReason },
    /// The repository failed for this row
    Errored { message: String },
}

/// Outcome classification without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Created,
    Updated,
    Skipped,
    Errored,
}

impl Outcome {
    /// Classification of this outcome
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Created { .. } => OutcomeKind::Created,
            Outcome::Updated { .. } => OutcomeKind::Updated,
            Outcome::Skipped { .. } => OutcomeKind::Skipped,
            Outcome::Errored { .. } => OutcomeKind::Errored,
        }
    }
}

/// Per-record reconciliation
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ImportOptions,
}

impl Reconciler {
    /// Create a reconciler with the given options
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Decide what to do with a record. Reads only.
    pub fn plan<R: AccountRepository>(&self, record: &NormalizedRecord, repo: &R) -> Result<Plan> {
        let key = MatchKey::from_record(record);

        if self.options.match_policy == MatchPolicy::RequireIdentity && !key.has_identity() {
            return Ok(Plan::Create);
        }

        let plan = match repo.find_matching(&key)? {
            Some(existing) => Plan::Update {
                patch: AccountPatch {
                    url: record.url.clone(),
                    password_stored: record.has_secret,
                    source: merge_provenance(&existing.source, record.source.as_str()),
                },
                account_id: existing.id,
            },
            None => Plan::Create,
        };

        Ok(plan)
    }

    /// Carry out a plan against the repository
    pub fn apply<R: AccountRepository>(&self, plan: Plan, record: &NormalizedRecord, repo: &mut R) -> Result<Outcome> {
        match plan {
            Plan::Create => {
                let account = repo.create(record)?;
                Ok(Outcome::Created { account_id: Some(account.id) })
            }
            Plan::Update { account_id, patch } => {
                repo.update(&account_id, &patch)?;
                Ok(Outcome::Updated { account_id })
            }
        }
    }

    /// Outcome a plan would produce, without writing
    pub fn project(plan: &Plan) -> Outcome {
        match plan {
            Plan::Create => Outcome::Created { account_id: None },
            Plan::Update { account_id, .. } => Outcome::Updated { account_id: account_id.clone() },
        }
    }

    /// Reconcile one record. Repository failures become `Errored`.
    pub fn reconcile<R: AccountRepository>(&self, record: &NormalizedRecord, repo: &mut R) -> Outcome {
        let result = if self.options.dry_run {
            self.plan(record, repo).map(|plan| Self::project(&plan))
        } else {
            repo.atomically(|repo| {
                let plan = self.plan(record, repo)?;
                self.apply(plan, record, repo)
            })
        };

        result.unwrap_or_else(|e| Outcome::Errored { message: e.to_string() })
    }
}
