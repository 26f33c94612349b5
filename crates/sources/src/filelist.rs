// SPDX-License-Identifier: MIT

//! Filelist redirection: a pattern prefixed `-f <path>` (or `-F <path>`)
//! is replaced by the lines of `<path>`, read recursively (spec.md §4.2).
//!
//! Ported from the original's `generic.filelist_reader.iter_filelist_reader`
//! (`examples/original_source/generic/filelist_reader.py`), with the
//! bounded-recursion diagnostic SPEC_FULL.md adds (supplement 6).

use crate::error::{TargetError, MAX_FILELIST_DEPTH};
use std::path::{Path, PathBuf};

/// If `pattern` is a filelist redirection (`-f <path>` / `-F <path>`),
/// return the referenced path; otherwise `None`.
pub fn redirection_target(pattern: &str) -> Option<&str> {
    let trimmed = pattern.trim_start();
    for prefix in ["-f ", "-F "] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return Some(rest.trim());
        }
    }
    None
}

/// Read a filelist, recursively following nested `-f`/`-F` redirections,
/// and return every target token it yields — including the filelist
/// file's own path (so the filelist is itself watched for changes), as
/// the original does.
pub fn read(filelist: &str) -> Result<Vec<String>, TargetError> {
    read_recursive(filelist, 0, None)
}

fn read_recursive(filelist: &str, depth: usize, parent: Option<&Path>) -> Result<Vec<String>, TargetError> {
    if depth >= MAX_FILELIST_DEPTH {
        return Err(TargetError::FilelistTooDeep(PathBuf::from(filelist)));
    }
    if !Path::new(filelist).exists() {
        let location = parent
            .map(|p| format!(" (referenced from {})", p.display()))
            .unwrap_or_default();
        return Err(TargetError::FilelistMissing(PathBuf::from(filelist), location));
    }

    let mut out = vec![filelist.to_string()];
    let contents = std::fs::read_to_string(filelist)
        .map_err(|_| TargetError::FilelistMissing(PathBuf::from(filelist), String::new()))?;

    for raw_line in contents.lines() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace().peekable();
        while let Some(token) = tokens.next() {
            let token = expand_env(token);
            if token.is_empty() {
                continue;
            }
            if token == "-f" || token == "-F" {
                if let Some(next) = tokens.next() {
                    let next = expand_env(next);
                    out.extend(read_recursive(&next, depth + 1, Some(Path::new(filelist)))?);
                }
            } else if let Some(rest) = token.strip_prefix("+incdir+") {
                out.extend(rest.split('+').filter(|s| !s.is_empty()).map(str::to_string));
            } else if token.starts_with(['+', '-']) {
                // unrecognized option token: discarded
            } else {
                out.push(token);
            }
        }
    }

    Ok(out)
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

pub fn expand_env(token: &str) -> String {
    if !token.contains('$') {
        return token.to_string();
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' {
            let mut name = String::new();
            if chars.peek() == Some(&'{') {
                chars.next();
                for c2 in chars.by_ref() {
                    if c2 == '}' {
                        break;
                    }
                    name.push(c2);
                }
            } else {
                while let Some(&c2) = chars.peek() {
                    if c2.is_alphanumeric() || c2 == '_' {
                        name.push(c2);
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            out.push_str(&std::env::var(&name).unwrap_or_default());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "filelist_tests.rs"]
mod tests;
