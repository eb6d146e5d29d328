//! Import pipeline
//!
//! Drives parse -> map -> normalize -> reconcile over a whole export, one
//! row at a time in source order. A row never aborts the batch: unusable rows
//! are skipped, repository failures are recorded and the next row proceeds.

use std::borrow::Borrow;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv::{CsvDocument, CsvParser, RawRow};
use crate::dialect::{SourceDialect, map_row};
use crate::error::{Result, SyncError};
use crate::model::SkipReason;
use crate::normalize::Normalizer;
use crate::reconcile::{AccountRepository, ImportOptions, Outcome, OutcomeKind, Reconciler};

/// Outcome of one source row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// 1-based line in the source file
    pub line: usize,
    /// Normalized domain, when the row got that far
    pub domain: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Per-job report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub dialect: SourceDialect,
    pub dry_run: bool,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errored: usize,
    /// "line N: message" for every errored row
    pub errors: Vec<String>,
    /// One entry per data row, in source order
    pub outcomes: Vec<RowOutcome>,
}

impl ImportSummary {
    fn new(dialect: SourceDialect, dry_run: bool) -> Self {
        Self {
            dialect,
            dry_run,
            created: 0,
            updated: 0,
            skipped: 0,
            errored: 0,
            errors: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Rows that were (or would be) created or updated
    pub fn imported(&self) -> usize {
        self.created + self.updated
    }

    /// Number of data rows seen
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// True if any row failed at the repository
    pub fn has_errors(&self) -> bool {
        self.errored > 0
    }

    /// Serialize for callers that report over JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SyncError::InvalidOperation(e.to_string()))
    }

    fn record(&mut self, row: RowOutcome) {
        match &row.outcome {
            Outcome::Created { .. } => self.created += 1,
            Outcome::Updated { .. } => self.updated += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Errored { message } => {
                self.errored += 1;
                self.errors.push(format!("line {}: {}", row.line, message));
            }
        }
        self.outcomes.push(row);
    }
}

/// Import job configuration plus the pipeline stages
#[derive(Debug, Clone, Default)]
pub struct Importer {
    parser: CsvParser,
    normalizer: Normalizer,
    reconciler: Reconciler,
}

impl Importer {
    /// Create an importer with the built-in parser and category table
    pub fn new(options: ImportOptions) -> Self {
        Self {
            parser: CsvParser::default(),
            normalizer: Normalizer::default(),
            reconciler: Reconciler::new(options),
        }
    }

    /// Use a different normalizer (e.g. a substitute category table)
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Use a different CSV parser
    pub fn with_parser(mut self, parser: CsvParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn options(&self) -> &ImportOptions {
        self.reconciler.options()
    }

    /// Import CSV text exported in the given dialect
    pub fn import_csv<R: AccountRepository>(&self, repo: &mut R, content: &str, dialect: SourceDialect) -> ImportSummary {
        let document = self.parser.parse_document(content);
        self.import_rows(repo, document.rows, dialect)
    }

    /// Import an already parsed document
    pub fn import_document<R: AccountRepository>(
        &self,
        repo: &mut R,
        document: &CsvDocument,
        dialect: SourceDialect,
    ) -> ImportSummary {
        self.import_rows(repo, &document.rows, dialect)
    }

    /// Rows passed by value are dropped, and their values wiped, as soon as
    /// they are processed.
    fn import_rows<R, I>(&self, repo: &mut R, rows: I, dialect: SourceDialect) -> ImportSummary
    where
        R: AccountRepository,
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Borrow<RawRow>,
    {
        let rows = rows.into_iter();
        let dry_run = self.options().dry_run;
        info!(dialect = %dialect, dry_run, rows = rows.len(), "import started");

        let mut summary = ImportSummary::new(dialect, dry_run);
        for row in rows {
            let outcome = self.process_row(repo, row.borrow(), dialect);
            debug!(
                line = outcome.line,
                domain = outcome.domain.as_deref().unwrap_or(""),
                outcome = ?outcome.outcome.kind(),
                "row processed"
            );
            summary.record(outcome);
        }

        info!(
            dialect = %dialect,
            dry_run,
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            errored = summary.errored,
            "import finished"
        );
        summary
    }

    /// Read and import a CSV file exported in the given dialect
    pub fn import_file<R: AccountRepository>(&self, repo: &mut R, path: &Path, dialect: SourceDialect) -> Result<ImportSummary> {
        let document = self.parser.parse_file(path)?;
        Ok(self.import_rows(repo, document.rows, dialect))
    }

    /// Read and import a CSV file, detecting the dialect from its headers
    ///
    /// Falls back to the default mapping when the headers are not recognized.
    pub fn import_file_auto<R: AccountRepository>(&self, repo: &mut R, path: &Path) -> Result<ImportSummary> {
        let document = self.parser.parse_file(path)?;
        let dialect = SourceDialect::detect(&document.headers).unwrap_or_else(|| {
            warn!(path = %path.display(), "could not detect dialect, using default mapping");
            SourceDialect::DEFAULT
        });
        Ok(self.import_rows(repo, document.rows, dialect))
    }

    /// Run one row through the pipeline
    pub fn process_row<R: AccountRepository>(&self, repo: &mut R, row: &RawRow, dialect: SourceDialect) -> RowOutcome {
        let skipped = |reason: SkipReason| RowOutcome {
            line: row.line(),
            domain: None,
            outcome: Outcome::Skipped { reason },
        };

        let fields = match map_row(row, dialect) {
            Ok(fields) => fields,
            Err(reason) => return skipped(reason),
        };

        let record = match self.normalizer.normalize(fields, dialect) {
            Ok(record) => record,
            Err(reason) => return skipped(reason),
        };

        let outcome = self.reconciler.reconcile(&record, repo);
        if outcome.kind() == OutcomeKind::Errored {
            warn!(line = row.line(), domain = %record.domain, "row failed at the repository");
        }

        RowOutcome {
            line: row.line(),
            domain: Some(record.domain),
            outcome,
        }
    }
}
