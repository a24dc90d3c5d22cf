//! Directory walking and package loading.

use super::Package;
use super::constraint::BuildTags;
use super::parse::parse_header;
use crate::core::{GazelleError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Enumerates the Go packages of a directory tree.
///
/// Directories are visited depth first, parents before children, children in
/// lexical order. Directories starting with `.` or `_` and `testdata`
/// directories are skipped together with their subtrees.
#[derive(Debug, Clone)]
pub struct Walker {
    tags: BuildTags,
}

impl Walker {
    /// Creates a walker selecting files with `build_tags`, or with the host's
    /// GOOS and GOARCH when `build_tags` is empty.
    pub fn new(build_tags: &[String]) -> Self {
        Self {
            tags: BuildTags::new(build_tags),
        }
    }

    /// Calls `f` for every buildable Go package under `root`.
    ///
    /// The first error, from the walk or from `f`, stops the walk and is returned.
    pub fn walk<F>(&self, root: &Path, mut f: F) -> Result<()>
    where
        F: FnMut(Package) -> Result<()>,
    {
        let entries =
            WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| !is_skipped_dir(e));
        for entry in entries {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                GazelleError::walker(path, e)
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(pkg) = self.load_package(entry.path())? {
                f(pkg)?;
            }
        }
        Ok(())
    }

    /// Loads the Go package in `dir`, or `None` when it has no buildable Go files.
    pub fn load_package(&self, dir: &Path) -> Result<Option<Package>> {
        let mut file_names: Vec<String> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| GazelleError::walker(dir, e))? {
            let entry = entry.map_err(|e| GazelleError::walker(dir, e))?;
            let file_type = entry.file_type().map_err(|e| GazelleError::walker(entry.path(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if file_type.is_dir() || !name.ends_with(".go") || name.starts_with(['.', '_']) {
                continue;
            }
            file_names.push(name);
        }
        file_names.sort();

        let mut pkg = Package {
            dir: dir.to_path_buf(),
            ..Package::default()
        };
        let mut imports = BTreeSet::new();
        let mut test_imports = BTreeSet::new();
        let mut xtest_imports = BTreeSet::new();
        let mut name: Option<String> = None;
        let mut first_file = String::new();

        for file_name in file_names {
            if !self.tags.matches_file_name(&file_name) {
                trace!("Excluding {} by file name", file_name);
                continue;
            }
            let path = dir.join(&file_name);
            let src = fs::read_to_string(&path).map_err(|e| GazelleError::walker(&path, e))?;
            let header = parse_header(&src).map_err(|e| GazelleError::walker(&path, e))?;
            if !self.tags.matches_constraint(header.constraint.as_ref()) {
                trace!("Excluding {} by build constraint", file_name);
                continue;
            }
            if header.package == "documentation" {
                continue;
            }

            let is_test = file_name.ends_with("_test.go");
            let (pkg_name, is_xtest) = match header.package.strip_suffix("_test") {
                Some(base) if is_test && name.as_deref() != Some(header.package.as_str()) => {
                    (base.to_string(), true)
                }
                _ => (header.package.clone(), false),
            };
            let existing = name.get_or_insert_with(|| {
                first_file.clone_from(&file_name);
                pkg_name.clone()
            });
            if *existing != pkg_name {
                return Err(GazelleError::MultiplePackages {
                    dir: dir.display().to_string(),
                    names: format!("{existing} ({first_file}), {pkg_name} ({file_name})"),
                });
            }

            let (files, scope) = if is_xtest {
                (&mut pkg.xtest_go_files, &mut xtest_imports)
            } else if is_test {
                (&mut pkg.test_go_files, &mut test_imports)
            } else {
                (&mut pkg.go_files, &mut imports)
            };
            files.push(file_name);
            scope.extend(header.imports);
        }

        let Some(name) = name else {
            return Ok(None);
        };
        pkg.name = name;
        pkg.imports = imports.into_iter().collect();
        pkg.test_imports = test_imports.into_iter().collect();
        pkg.xtest_imports = xtest_imports.into_iter().collect();
        debug!("Loaded package {} from {}", pkg.name, dir.display());
        Ok(Some(pkg))
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with(['.', '_']) || name == "testdata"
}
