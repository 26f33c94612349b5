// SPDX-License-Identifier: MIT

//! Glob expansion: `*` within one path component, `**` for any descendant
//! (files and directories, hidden entries skipped), and `{a,b,c}` brace
//! alternation in a basename (spec.md §4.2).
//!
//! Ported from the original's `generic.iglob`/`_iglobstar`/`_glob1`
//! (`examples/original_source/generic/__init__.py`), expressed as plain
//! recursion over `std::fs` instead of Python generators.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const MAGIC_CHARS: [char; 4] = ['*', '?', '[', '{'];

fn has_magic(s: &str) -> bool {
    s.contains(MAGIC_CHARS)
}

/// Expand a single glob pattern into the set of matching paths.
///
/// `yield_even_if_missing` mirrors the original's "yield even if not
/// existing" branch, used only when resolving a filelist path rather than
/// an ordinary target pattern.
pub fn expand(pathname: &str, yield_even_if_missing: bool) -> Vec<PathBuf> {
    let path = Path::new(pathname);
    let dirname = path.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if !has_magic(pathname) {
        if !basename.is_empty() {
            if path_lexists(path) || yield_even_if_missing {
                return vec![PathBuf::from(pathname)];
            }
        } else if Path::new(&dirname).is_dir() {
            return vec![PathBuf::from(pathname)];
        }
        return Vec::new();
    }

    let dirname = if dirname.is_empty() { ".".to_string() } else { dirname };

    let dirs: Vec<String> = if has_magic(&dirname) {
        expand(&dirname, false)
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect()
    } else {
        vec![dirname]
    };

    let mut out = Vec::new();
    for dir in dirs {
        if basename == "**" {
            out.extend(iglobstar(Path::new(&dir)));
        } else {
            for name in glob1(Path::new(&dir), &basename) {
                out.push(Path::new(&dir).join(name));
            }
        }
    }
    out
}

fn path_lexists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// `**`: yield the directory itself plus every descendant file and
/// directory, recursively, skipping any entry whose name starts with `.`
/// (and not descending into hidden directories).
fn iglobstar(dirname: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if !dirname.is_dir() {
        return out;
    }
    out.push(dirname.to_path_buf());
    walk(dirname, &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = path.is_dir();
        out.push(path.clone());
        if is_dir {
            subdirs.push(path);
        }
    }
    for sub in subdirs {
        walk(&sub, out);
    }
}

/// Match a single basename pattern (after brace expansion) against the
/// entries of one directory.
fn glob1(dirname: &Path, basename: &str) -> Vec<String> {
    let variants = expand_braces(basename);
    let entries = match fs::read_dir(dirname) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };
    let mut out = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if variants.iter().any(|pat| matches_component(&name, pat)) {
            out.push(name);
        }
    }
    out
}

/// Expand `{a,b,c}` alternation into every combination with the literal
/// text around it, joined into every accumulator (spec.md §4.2).
pub fn expand_braces(pattern: &str) -> Vec<String> {
    if let Some(open) = pattern.find('{') {
        if let Some(rel_close) = pattern[open..].find('}') {
            let close = open + rel_close;
            let prefix = &pattern[..open];
            let inner = &pattern[open + 1..close];
            let suffix = &pattern[close + 1..];
            let tails = expand_braces(suffix);
            let mut out = Vec::new();
            for alt in inner.split(',') {
                for tail in &tails {
                    out.push(format!("{prefix}{alt}{tail}"));
                }
            }
            return out;
        }
    }
    vec![pattern.to_string()]
}

fn matches_component(name: &str, pattern: &str) -> bool {
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }
    match translate(pattern) {
        Ok(re) => re.is_match(name),
        Err(_) => false,
    }
}

/// Translate a shell/fnmatch-style wildcard pattern (`*`, `?`, `[seq]`)
/// into an anchored regex. Shared by component-wise glob matching and the
/// `ignores` fnmatch filter (spec.md §4.2).
pub fn translate(pattern: &str) -> Result<Regex, regex::Error> {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                if let Some(end) = chars[i..].iter().position(|&c| c == ']').filter(|&p| p > 0) {
                    let class: String = chars[i..=i + end].iter().collect();
                    out.push_str(&class);
                    i += end;
                } else {
                    out.push_str("\\[");
                }
            }
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out.push('$');
    Regex::new(&out)
}

#[cfg(test)]
#[path = "glob_tests.rs"]
mod tests;
