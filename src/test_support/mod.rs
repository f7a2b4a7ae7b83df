//! Test utilities for Deppy unit tests.
//!
//! Provides fixture trees, git repositories built with `git2`, and a
//! [`StaticLoader`] that answers package queries from a fixture GOPATH
//! without a Go toolchain.
//!
//! # Example
//!
//! ```rust,ignore
//! use deppy::test_support::{file, git, make_tree, pkg, StaticLoader};
//!
//! let src = gopath.join("src");
//! make_tree(&src, &[file("C/main.go", pkg("main", &["D"])), git("C", None)]);
//! let loader = StaticLoader::new(vec![gopath], src.join("C"));
//! ```

pub mod fixtures;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use git2::{IndexAddOption, ObjectType, Repository, Signature};
use walkdir::WalkDir;

use crate::core::package::PackageError;
use crate::core::Package;
use crate::rewrite::scan_imports;
use crate::sources::PackageLoader;
use crate::vcs::to_slash;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Open the repository at `path`, initializing it if there is none.
pub fn git_init(path: &Path) -> Repository {
    std::fs::create_dir_all(path).unwrap();
    Repository::open(path).unwrap_or_else(|_| Repository::init(path).unwrap())
}

/// Stage every file in the working tree and commit, returning the commit id.
pub fn git_commit_all(repo: &Repository, message: &str) -> String {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Deppy Test", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
        .to_string()
}

/// Put a lightweight tag on HEAD.
pub fn git_tag(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel(ObjectType::Commit).unwrap();
    repo.tag_lightweight(name, &head, false).unwrap();
}

/// Current HEAD commit id of the repository at `path`.
pub fn git_head(path: &Path) -> String {
    let repo = Repository::open(path).unwrap();
    let id = repo.head().unwrap().peel_to_commit().unwrap().id();
    id.to_string()
}

/// A package loader over a fixture GOPATH.
///
/// Mirrors what `go list -e -json` reports for GOPATH workspaces: a package
/// is a directory below `<root>/src` holding `.go` files, and `Deps` is the
/// transitive closure of its imports. Paths that are not found are treated
/// as standard library packages when their first element has no dot, and
/// reported as load errors otherwise. Files constrained by
/// `//go:build ignore` are listed as ignored and not scanned.
pub struct StaticLoader {
    gopath: Vec<PathBuf>,
    cwd: PathBuf,
    version: String,
}

struct ScannedDir {
    go_files: Vec<String>,
    ignored_go_files: Vec<String>,
    test_go_files: Vec<String>,
    imports: Vec<String>,
    test_imports: Vec<String>,
}

impl StaticLoader {
    pub fn new(gopath: Vec<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        StaticLoader {
            gopath,
            cwd: cwd.into(),
            version: "go1.21.0".to_string(),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    fn locate(&self, import_path: &str) -> Option<(PathBuf, PathBuf)> {
        self.gopath.iter().find_map(|root| {
            let dir = root.join("src").join(import_path);
            has_go_files(&dir).then(|| (root.clone(), dir))
        })
    }

    fn import_path_of(&self, dir: &Path) -> Option<String> {
        self.gopath.iter().find_map(|root| {
            dir.strip_prefix(root.join("src"))
                .ok()
                .map(to_slash)
        })
    }

    fn package(&self, import_path: &str) -> Result<Package> {
        let Some((root, dir)) = self.locate(import_path) else {
            let first = import_path.split('/').next().unwrap_or_default();
            if first.contains('.') {
                let mut pkg = Package::new(import_path, "");
                pkg.error = Some(PackageError {
                    err: format!("cannot find package \"{import_path}\""),
                });
                return Ok(pkg);
            }
            let mut pkg = Package::new(import_path, Path::new("/goroot/src").join(import_path));
            pkg.standard = true;
            return Ok(pkg);
        };

        let scanned = scan_dir(&dir)?;
        let mut pkg = Package::new(import_path, dir);
        pkg.root = root;
        pkg.deps = self.closure(&scanned.imports)?;
        pkg.go_files = scanned.go_files;
        pkg.ignored_go_files = scanned.ignored_go_files;
        pkg.test_go_files = scanned.test_go_files;
        pkg.test_imports = scanned.test_imports;
        Ok(pkg)
    }

    fn closure(&self, imports: &[String]) -> Result<Vec<String>> {
        let mut seen = BTreeSet::new();
        let mut stack = imports.to_vec();

        while let Some(path) = stack.pop() {
            if !seen.insert(path.clone()) {
                continue;
            }
            if let Some((_, dir)) = self.locate(&path) {
                stack.extend(scan_dir(&dir)?.imports);
            }
        }

        Ok(seen.into_iter().collect())
    }

    fn expand(&self, pattern: &str) -> Result<Vec<Package>> {
        if pattern != "." && !pattern.starts_with("./") {
            return Ok(vec![self.package(pattern)?]);
        }

        let rel = pattern.trim_start_matches('.').trim_start_matches('/');
        if let Some(base) = rel.strip_suffix("...") {
            let base = self.cwd.join(base.trim_end_matches('/'));
            return self.walk(&base).iter().map(|p| self.package(p)).collect();
        }

        let dir = self.cwd.join(rel);
        match self.import_path_of(&dir) {
            Some(path) if has_go_files(&dir) => Ok(vec![self.package(&path)?]),
            _ => {
                let mut pkg = Package::new(pattern, dir.clone());
                pkg.error = Some(PackageError {
                    err: format!("no Go files in {}", dir.display()),
                });
                Ok(vec![pkg])
            }
        }
    }

    fn walk(&self, base: &Path) -> Vec<String> {
        WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                e.depth() == 0
                    || !(name.starts_with('.') || name.starts_with('_') || name == "testdata")
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir() && has_go_files(e.path()))
            .filter_map(|e| self.import_path_of(e.path()))
            .collect()
    }
}

impl PackageLoader for StaticLoader {
    fn load(&self, patterns: &[String]) -> Result<Vec<Package>> {
        let mut pkgs: Vec<Package> = Vec::new();
        for pattern in patterns {
            for pkg in self.expand(pattern)? {
                if !pkgs.iter().any(|p| p.import_path == pkg.import_path) {
                    pkgs.push(pkg);
                }
            }
        }
        Ok(pkgs)
    }

    fn toolchain_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }
}

fn has_go_files(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .any(|e| e.path().is_file() && e.file_name().to_string_lossy().ends_with(".go"))
        })
        .unwrap_or(false)
}

fn scan_dir(dir: &Path) -> Result<ScannedDir> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".go"))
        .collect();
    names.sort();

    let mut scanned = ScannedDir {
        go_files: Vec::new(),
        ignored_go_files: Vec::new(),
        test_go_files: Vec::new(),
        imports: Vec::new(),
        test_imports: Vec::new(),
    };

    for name in names {
        let path = dir.join(&name);
        let src = std::fs::read_to_string(&path)?;
        if src.lines().any(|l| l.trim() == "//go:build ignore") {
            scanned.ignored_go_files.push(name);
            continue;
        }
        let imports = scan_imports(&path.display().to_string(), &src)?
            .into_iter()
            .map(|s| s.path);

        if name.ends_with("_test.go") {
            scanned.test_imports.extend(imports);
            scanned.test_go_files.push(name);
        } else {
            scanned.imports.extend(imports);
            scanned.go_files.push(name);
        }
    }

    scanned.imports.sort();
    scanned.imports.dedup();
    scanned.test_imports.sort();
    scanned.test_imports.dedup();
    Ok(scanned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_static_loader() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        make_tree(
            &src,
            &[
                file("C/main.go", pkg("main", &["D", "fmt"])),
                file("C/main_test.go", pkg("main", &["testing", "E"])),
                file("C/sub/sub.go", pkg("sub", &[])),
                file("C/gen.go", "//go:build ignore\n\npackage main\n\nimport \"G\"\n"),
                file("C/Deps/_workspace/src/D/d.go", pkg("D", &[])),
                file("D/d.go", pkg("D", &["T"])),
                file("T/t.go", pkg("T", &[])),
            ],
        );

        let loader = StaticLoader::new(vec![tmp.path().to_path_buf()], src.join("C"));

        let pkgs = loader.load(&[".".to_string()]).unwrap();
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].import_path, "C");
        assert_eq!(pkgs[0].deps, vec!["D", "T", "fmt"]);
        assert_eq!(pkgs[0].test_imports, vec!["E", "testing"]);
        assert_eq!(pkgs[0].ignored_go_files, vec!["gen.go"]);
        assert_eq!(pkgs[0].root, tmp.path());

        let all: Vec<_> = loader
            .load(&["./...".to_string()])
            .unwrap()
            .into_iter()
            .map(|p| p.import_path)
            .collect();
        assert_eq!(all, vec!["C", "C/sub"]);

        let other = loader
            .load(&["fmt".to_string(), "example.com/missing".to_string()])
            .unwrap();
        assert!(other[0].standard);
        assert!(other[1].error_message().is_some());

        let empty = StaticLoader::new(vec![tmp.path().to_path_buf()], src.join("C/Deps"));
        let pkgs = empty.load(&[".".to_string()]).unwrap();
        assert!(pkgs[0].error_message().unwrap().starts_with("no Go files"));
    }

    #[test]
    fn test_git_helpers() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "a").unwrap();

        let repo = git_init(tmp.path());
        let first = git_commit_all(&repo, "first");
        git_tag(&repo, "v1");
        assert_eq!(git_head(tmp.path()), first);

        std::fs::write(tmp.path().join("b.txt"), "b").unwrap();
        let second = git_commit_all(&repo, "second");
        assert_ne!(first, second);
    }
}
