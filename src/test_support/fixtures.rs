//! File tree fixtures.
//!
//! A fixture is a flat list of [`Node`]s applied in order below a root
//! directory. Paths use `/` and are relative to the root.

use std::path::Path;

use super::{git_commit_all, git_init, git_tag};

/// One entry of a fixture tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A regular file with the given contents
    File { path: String, body: String },

    /// A symbolic link pointing at `target`
    Symlink { path: String, target: String },

    /// A path that must not exist (only meaningful to [`check_tree`])
    Absent { path: String },

    /// Commit everything below `dir` to a git repository there, creating
    /// the repository if needed, and optionally tag the commit
    Git { dir: String, tag: Option<String> },
}

pub fn file(path: &str, body: impl Into<String>) -> Node {
    Node::File {
        path: path.to_string(),
        body: body.into(),
    }
}

pub fn symlink(path: &str, target: &str) -> Node {
    Node::Symlink {
        path: path.to_string(),
        target: target.to_string(),
    }
}

pub fn absent(path: &str) -> Node {
    Node::Absent {
        path: path.to_string(),
    }
}

pub fn git(dir: &str, tag: Option<&str>) -> Node {
    Node::Git {
        dir: dir.to_string(),
        tag: tag.map(str::to_string),
    }
}

/// Go source for package `name` importing `imports`, in gofmt layout.
pub fn pkg(name: &str, imports: &[&str]) -> String {
    let mut out = format!("package {name}\n\nimport (\n");
    for import in imports {
        out.push_str(&format!("\t\"{import}\"\n"));
    }
    out.push_str(")\n");
    out
}

/// Create the fixture below `root`.
pub fn make_tree(root: &Path, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::File { path, body } => {
                let path = root.join(path);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(&path, body).unwrap();
            }
            Node::Symlink { path, target } => {
                let path = root.join(path);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                crate::util::fs::symlink(Path::new(target), &path).unwrap();
            }
            Node::Absent { path } => panic!("make_tree: absent node {path}"),
            Node::Git { dir, tag } => {
                let repo = git_init(&root.join(dir));
                git_commit_all(&repo, "deppy fixture");
                if let Some(tag) = tag {
                    git_tag(&repo, tag);
                }
            }
        }
    }
}

/// Assert that the tree below `root` matches the fixture.
pub fn check_tree(root: &Path, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::File { path, body } => {
                let got = std::fs::read_to_string(root.join(path))
                    .unwrap_or_else(|e| panic!("check_tree: {path}: {e}"));
                assert_eq!(&got, body, "check_tree: contents of {path}");
            }
            Node::Symlink { path, target } => {
                let got = std::fs::read_link(root.join(path))
                    .unwrap_or_else(|e| panic!("check_tree: {path}: {e}"));
                assert_eq!(got, Path::new(target), "check_tree: target of {path}");
            }
            Node::Absent { path } => {
                assert!(
                    std::fs::symlink_metadata(root.join(path)).is_err(),
                    "check_tree: {path} should be absent"
                );
            }
            Node::Git { dir, .. } => panic!("check_tree: git node {dir}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pkg_template() {
        assert_eq!(
            pkg("main", &["D", "fmt"]),
            "package main\n\nimport (\n\t\"D\"\n\t\"fmt\"\n)\n"
        );
        assert_eq!(pkg("D", &[]), "package D\n\nimport (\n)\n");
    }

    #[test]
    fn test_make_and_check_tree() {
        let tmp = TempDir::new().unwrap();
        let nodes = vec![
            file("D/main.go", pkg("D", &[])),
            file("D/extra.go", "var x int\n"),
            symlink("D/link.go", "main.go"),
            git("D", Some("v1.0")),
        ];
        make_tree(tmp.path(), &nodes);

        check_tree(
            tmp.path(),
            &[
                file("D/main.go", pkg("D", &[])),
                file("D/extra.go", "var x int\n"),
                symlink("D/link.go", "main.go"),
                absent("D/missing.go"),
            ],
        );
        assert!(tmp.path().join("D/.git").is_dir());
    }
}
