//! Project scaffolder
//!
//! Writes happen in a staging directory created next to the final project
//! (same filesystem), which is promoted with a single `rename`. Until that
//! rename nothing is visible at the final path; after it the project is
//! complete.

use crate::error::ScaffoldError;
use crate::layout::{ProjectLayout, ScaffoldOptions};
use crate::locks::PathLocks;
use crate::result::GenerationResult;
use crate::templates::{render_deploy_script, render_test_stub};
use cogen_ident::{Archetype, SanitizedName};
use cogen_parser::ParsedContract;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::time::Instant;

/// Prefix of staging directories inside the output directory
pub const STAGING_PREFIX: &str = ".cogen-staging-";

/// Materializes parsed contracts as project directories
#[derive(Debug, Clone, Default)]
pub struct ProjectScaffolder {
    options: ScaffoldOptions,
    locks: Arc<PathLocks>,
}

impl ProjectScaffolder {
    /// Create scaffolder with its own lock map
    #[must_use]
    pub fn new(options: ScaffoldOptions) -> Self {
        Self {
            options,
            locks: Arc::new(PathLocks::new()),
        }
    }

    /// Share an existing lock map
    #[inline]
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<PathLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Get options
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    /// Get lock map
    #[inline]
    #[must_use]
    pub fn locks(&self) -> &Arc<PathLocks> {
        &self.locks
    }

    /// Layout for `name` under `output_dir`
    #[must_use]
    pub fn layout(&self, output_dir: &Path, name: &SanitizedName) -> ProjectLayout {
        ProjectLayout::new(output_dir, name, &self.options)
    }

    /// Write the project described by `layout`
    ///
    /// `deadline` is checked before every write and before promotion;
    /// once the staging directory has been renamed into place the call
    /// succeeds regardless of the deadline.
    ///
    /// # Errors
    /// - `InvalidIdentifier` if `name` fails the identifier rules
    /// - `LayoutMismatch` if `layout` was derived for another name
    /// - `Collision` if the project root exists or is locked
    /// - `WriteFailure` on any I/O error (staging is discarded)
    /// - `Cancelled` if the deadline passes before promotion
    pub fn materialize(
        &self,
        layout: &ProjectLayout,
        parsed: &ParsedContract,
        name: &SanitizedName,
        deadline: Option<Instant>,
    ) -> Result<GenerationResult, ScaffoldError> {
        name.validate()?;
        if layout.root.file_name() != Some(OsStr::new(name.as_str())) {
            return Err(ScaffoldError::LayoutMismatch {
                expected: name.clone(),
                root: layout.root.clone(),
            });
        }

        check_deadline(deadline)?;

        let _lock = self
            .locks
            .try_acquire(&layout.root)
            .ok_or_else(|| collision(&layout.root))?;
        if layout.root.symlink_metadata().is_ok() {
            return Err(collision(&layout.root));
        }

        fs::create_dir_all(&layout.output_dir)
            .map_err(|e| ScaffoldError::write_failure(&layout.output_dir, e))?;
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&layout.output_dir)
            .map_err(|e| ScaffoldError::write_failure(&layout.output_dir, e))?;
        let staged = layout.rebased(staging.path());

        tracing::debug!(
            root = %layout.root.display(),
            staging = %staging.path().display(),
            "staging project"
        );

        for dir in staged.directories() {
            fs::create_dir_all(dir).map_err(|e| ScaffoldError::write_failure(dir, e))?;
        }

        let syntax = self.options.script_syntax();
        let source = parsed.renamed_source(name);
        write_file(&staged.contract_file, &source, deadline)?;
        write_file(
            &staged.deploy_script,
            &render_deploy_script(name, &parsed.constructor_params, syntax),
            deadline,
        )?;
        if let Some(test_file) = &staged.test_file {
            write_file(
                test_file,
                &render_test_stub(name, &parsed.constructor_params, syntax),
                deadline,
            )?;
        }

        check_deadline(deadline)?;
        if layout.root.symlink_metadata().is_ok() {
            return Err(collision(&layout.root));
        }
        promote(&staged.root, &layout.root)?;

        // `staging` is now empty; dropping it removes the directory
        drop(staging);

        let result = GenerationResult {
            project_path: layout.root.clone(),
            contract_file: layout.contract_file.clone(),
            deploy_script_file: layout.deploy_script.clone(),
            test_file: layout.test_file.clone(),
            contract_name: name.clone(),
            archetype: Archetype::from_source(&source),
            source_hash: blake3::hash(source.as_bytes()).to_hex().to_string(),
            generated_at: chrono::Utc::now(),
        };

        tracing::info!(
            project = %result.project_path.display(),
            contract = %result.contract_name,
            files = result.files().count(),
            "project materialized"
        );

        Ok(result)
    }
}

fn collision(path: &Path) -> ScaffoldError {
    ScaffoldError::Collision {
        path: path.to_path_buf(),
    }
}

/// Rename the staged root into place
///
/// A target that appeared after the last check is a collision, not an I/O
/// failure.
fn promote(staged: &Path, root: &Path) -> Result<(), ScaffoldError> {
    fs::rename(staged, root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists || root.symlink_metadata().is_ok() {
            tracing::warn!(root = %root.display(), error = %e, "project root appeared during promotion");
            collision(root)
        } else {
            ScaffoldError::write_failure(root, e)
        }
    })
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), ScaffoldError> {
    match deadline {
        Some(deadline) if Instant::now() >= deadline => Err(ScaffoldError::Cancelled),
        _ => Ok(()),
    }
}

fn write_file(path: &Path, contents: &str, deadline: Option<Instant>) -> Result<(), ScaffoldError> {
    check_deadline(deadline)?;
    fs::write(path, contents).map_err(|e| ScaffoldError::write_failure(path, e))
}
