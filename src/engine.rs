//! Core linter engine

use crate::ast::{Document, ElementNode, ParseError};
use crate::config::Config;
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::rule::Rule;
use crate::rules;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extension of serialized element trees
pub const DOCUMENT_EXTENSION: &str = "json";

/// Node type reported for element diagnostics
const ELEMENT_NODE_TYPE: &str = "JSXOpeningElement";

/// Result of linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,

    /// Files processed
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }

    fn push(&mut self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
        }
        self.diagnostics.push(diag);
    }

    fn finish_file(&mut self) {
        self.files_processed = 1;
        self.files_with_errors = usize::from(self.error_count > 0);
        self.files_with_warnings = usize::from(self.warning_count > 0);
    }

    /// Order diagnostics by file, line, then column
    fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }
}

/// The main linter engine
pub struct Engine {
    config: Config,
    rules: Vec<Box<dyn Rule>>,
}

impl Engine {
    /// Create an engine running the built-in rules enabled by `config`
    pub fn new(config: Config) -> Self {
        let rules = rules::builtin_rules(&config);
        Self { config, rules }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Whether a path looks like a serialized element tree
    pub fn is_lintable(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.config.engine.parallel() && files.len() > 1 {
            let jobs = if self.config.engine.jobs() > 0 {
                self.config.engine.jobs()
            } else {
                num_cpus::get()
            };
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect()),
                Err(e) => {
                    log::warn!("Falling back to sequential linting: {}", e);
                    files.iter().map(|f| self.lint_file(f)).collect()
                }
            }
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }
        combined.sort();

        combined.duration = start.elapsed();
        combined
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        if !Self::is_lintable(path) {
            log::debug!("Skipping {}: not a .{} file", path.display(), DOCUMENT_EXTENSION);
            return LintResult::default();
        }

        log::debug!("Linting {}", path.display());

        match Document::load(path) {
            Ok(document) => self.lint_document(&document, path),
            Err(ParseError::Io(e)) => Self::failed_file(
                path,
                "file-read-error",
                &format!("Failed to read file: {}", e),
            ),
            Err(e) => Self::failed_file(path, "parse-error", &format!("Parse error: {}", e)),
        }
    }

    fn failed_file(path: &Path, rule_id: &str, message: &str) -> LintResult {
        log::warn!("{}: {}", path.display(), message);
        let mut result = LintResult::default();
        result.push(Diagnostic::new(
            rule_id,
            Severity::Error,
            message,
            Location::whole_file(path),
        ));
        result.finish_file();
        result
    }

    /// Lint an already-loaded document; `path` is used for locations only
    pub fn lint_document(&self, document: &Document, path: &Path) -> LintResult {
        let start = Instant::now();
        let mut result = LintResult::default();

        for element in document.iter() {
            for diag in self.check_element(element, document, path) {
                result.push(diag);
            }
        }

        result.finish_file();
        result.duration = start.elapsed();
        result
    }

    /// Run every rule against one element
    pub fn check_element(
        &self,
        element: &ElementNode,
        document: &Document,
        path: &Path,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            let meta = rule.meta();
            let Some(violation) = rule.check(element) else {
                continue;
            };

            let severity = self
                .config
                .get_severity_override(meta.id)
                .unwrap_or(meta.severity);
            let location = Location::of_span(path, element.span);

            let mut diag = Diagnostic::new(meta.id, severity, &violation.message, location)
                .with_help(meta.description)
                .with_note(ELEMENT_NODE_TYPE);

            if let Some(line) = document.get_source_line(element.span.line) {
                diag = diag.with_source_line(line);
            }
            if let Some(fix) = violation.fix {
                diag = diag.with_fix(fix);
            }

            diagnostics.push(diag);
        }

        diagnostics
    }
}
