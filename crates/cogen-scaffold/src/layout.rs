//! Project layout
//!
//! ```text
//! <output_dir>/<Name>/
//!   contracts/<Name>.<source_ext>
//!   scripts/deploy-<Name>.<script_ext>
//!   tests/<Name>.test.<script_ext>      (optional)
//! ```

use crate::templates::ScriptSyntax;
use cogen_ident::SanitizedName;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Contract source directory
pub const CONTRACTS_DIR: &str = "contracts";
/// Deployment script directory
pub const SCRIPTS_DIR: &str = "scripts";
/// Test stub directory
pub const TESTS_DIR: &str = "tests";

/// Only supported contract source extension
pub const SOURCE_EXT: &str = "sol";

/// Artifact options
///
/// `source_ext` must be [`SOURCE_EXT`]; `script_ext` must map to a
/// [`ScriptSyntax`] (`js`, `cjs`, `mjs` or `ts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldOptions {
    /// Contract source extension, without the dot
    pub source_ext: String,
    /// Script extension, without the dot
    pub script_ext: String,
    /// Whether to write a test stub
    pub include_tests: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            source_ext: SOURCE_EXT.to_string(),
            script_ext: "js".to_string(),
            include_tests: true,
        }
    }
}

impl ScaffoldOptions {
    /// Enable or disable the test stub
    #[inline]
    #[must_use]
    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    /// Set the script extension
    #[inline]
    #[must_use]
    pub fn with_script_ext(mut self, ext: impl Into<String>) -> Self {
        self.script_ext = ext.into();
        self
    }

    /// Module syntax for `script_ext`; CommonJS if unsupported
    #[must_use]
    pub fn script_syntax(&self) -> ScriptSyntax {
        ScriptSyntax::for_extension(&self.script_ext).unwrap_or_default()
    }

    /// Check both extensions
    ///
    /// # Errors
    /// Returns a message naming the first unsupported extension.
    pub fn check_extensions(&self) -> Result<(), String> {
        if self.source_ext != SOURCE_EXT {
            return Err(format!("source_ext must be {SOURCE_EXT:?}, got {:?}", self.source_ext));
        }
        if ScriptSyntax::for_extension(&self.script_ext).is_none() {
            return Err(format!(
                "script_ext must be one of \"js\", \"cjs\", \"mjs\", \"ts\", got {:?}",
                self.script_ext
            ));
        }
        Ok(())
    }
}

/// Absolute path with `.` and `..` resolved without touching the
/// filesystem
#[must_use]
pub fn absolute_lexical(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Paths of one generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    /// Directory the project is created in
    pub output_dir: PathBuf,
    /// `<output_dir>/<Name>`
    pub root: PathBuf,
    /// `<root>/contracts`
    pub contracts_dir: PathBuf,
    /// `<root>/scripts`
    pub scripts_dir: PathBuf,
    /// `<root>/tests`
    pub tests_dir: PathBuf,
    /// Contract source file
    pub contract_file: PathBuf,
    /// Deployment script
    pub deploy_script: PathBuf,
    /// Test stub, if enabled
    pub test_file: Option<PathBuf>,
}

impl ProjectLayout {
    /// Derive every path from the output directory and name
    ///
    /// `output_dir` is made absolute with `.` and `..` resolved, so every
    /// spelling of one directory yields the same root.
    #[must_use]
    pub fn new(output_dir: impl AsRef<Path>, name: &SanitizedName, options: &ScaffoldOptions) -> Self {
        let output_dir = absolute_lexical(output_dir.as_ref());
        let root = output_dir.join(name.as_str());
        let contracts_dir = root.join(CONTRACTS_DIR);
        let scripts_dir = root.join(SCRIPTS_DIR);
        let tests_dir = root.join(TESTS_DIR);

        Self {
            contract_file: contracts_dir.join(format!("{name}.{}", options.source_ext)),
            deploy_script: scripts_dir.join(format!("deploy-{name}.{}", options.script_ext)),
            test_file: options
                .include_tests
                .then(|| tests_dir.join(format!("{name}.test.{}", options.script_ext))),
            output_dir,
            root,
            contracts_dir,
            scripts_dir,
            tests_dir,
        }
    }

    /// Same layout under a different output directory
    #[must_use]
    pub fn rebased(&self, output_dir: &Path) -> Self {
        let move_path = |path: &Path| match path.strip_prefix(&self.output_dir) {
            Ok(rel) => output_dir.join(rel),
            Err(_) => path.to_path_buf(),
        };

        Self {
            output_dir: output_dir.to_path_buf(),
            root: move_path(&self.root),
            contracts_dir: move_path(&self.contracts_dir),
            scripts_dir: move_path(&self.scripts_dir),
            tests_dir: move_path(&self.tests_dir),
            contract_file: move_path(&self.contract_file),
            deploy_script: move_path(&self.deploy_script),
            test_file: self.test_file.as_deref().map(move_path),
        }
    }

    /// Directories to create, parents first
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        [
            Some(self.contracts_dir.as_path()),
            Some(self.scripts_dir.as_path()),
            self.test_file.as_ref().map(|_| self.tests_dir.as_path()),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogen_ident::sanitize;

    #[test]
    fn paths_follow_artifact_layout() {
        let name = sanitize("NFT-Treasury");
        let layout = ProjectLayout::new("/out", &name, &ScaffoldOptions::default());

        assert_eq!(layout.root, Path::new("/out/NFTTreasury"));
        assert_eq!(layout.contract_file, Path::new("/out/NFTTreasury/contracts/NFTTreasury.sol"));
        assert_eq!(
            layout.deploy_script,
            Path::new("/out/NFTTreasury/scripts/deploy-NFTTreasury.js")
        );
        assert_eq!(
            layout.test_file.as_deref(),
            Some(Path::new("/out/NFTTreasury/tests/NFTTreasury.test.js"))
        );
        assert_eq!(layout.directories().count(), 3);
    }

    #[test]
    fn tests_can_be_disabled() {
        let options = ScaffoldOptions::default().with_tests(false).with_script_ext("ts");
        let layout = ProjectLayout::new("out", &sanitize("vault"), &options);

        assert!(layout.test_file.is_none());
        assert!(layout.deploy_script.is_absolute());
        assert!(layout.deploy_script.ends_with("out/Vault/scripts/deploy-Vault.ts"));
        assert_eq!(options.script_syntax(), ScriptSyntax::EsModule);
        assert_eq!(layout.directories().count(), 2);
    }

    #[test]
    fn rebase_moves_every_path() {
        let layout = ProjectLayout::new("/out", &sanitize("vault"), &ScaffoldOptions::default());
        let staged = layout.rebased(Path::new("/out/.stage"));

        assert_eq!(staged.root, Path::new("/out/.stage/Vault"));
        assert_eq!(staged.contract_file, Path::new("/out/.stage/Vault/contracts/Vault.sol"));
        assert_eq!(
            staged.test_file.as_deref(),
            Some(Path::new("/out/.stage/Vault/tests/Vault.test.js"))
        );
    }

    #[test]
    fn spellings_of_one_directory_share_a_root() {
        let name = sanitize("vault");
        let options = ScaffoldOptions::default();
        let plain = ProjectLayout::new("/tmp/x", &name, &options);
        let dotted = ProjectLayout::new("/tmp/x/sub/.././", &name, &options);

        assert_eq!(dotted.root, plain.root);
        assert_eq!(dotted.output_dir, Path::new("/tmp/x"));
    }

    #[test]
    fn lexical_normalization() {
        assert_eq!(absolute_lexical(Path::new("/a/./b/../c")), Path::new("/a/c"));
        assert!(absolute_lexical(Path::new("rel")).is_absolute());
    }

    #[test]
    fn extensions_are_checked() {
        assert!(ScaffoldOptions::default().check_extensions().is_ok());
        assert!(ScaffoldOptions::default().with_script_ext("ts").check_extensions().is_ok());
        assert!(ScaffoldOptions::default().with_script_ext("py").check_extensions().is_err());

        let vyper = ScaffoldOptions {
            source_ext: "vy".into(),
            ..ScaffoldOptions::default()
        };
        assert!(vyper.check_extensions().is_err());
    }
}
