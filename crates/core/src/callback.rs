// SPDX-License-Identifier: MIT

//! Static callback configuration (spec.md §3, §4.5).
//!
//! A [`Callback`] is immutable once built at configuration time and reused
//! across invocations; per-invocation runtime state (pid, returncode, log
//! path, timestamps) lives in `gman-engine`, which is the layer that
//! actually spawns processes.

use crate::hier_name::HierName;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default handler timeout (spec.md §4.5: "Handler callbacks ... run
/// synchronously with a per-callback timeout (default 30 s)").
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

/// An in-process function callback. Its return value exists only to let
/// callers reuse ordinary function signatures; the worker that runs it
/// always reports success once it completes (spec.md §9: "A
/// function-backed Worker's ... `ReturnCode` is always 0 once complete").
pub type FunctionHandle = Arc<dyn Fn() -> i32 + Send + Sync>;

/// A callback's command is either a shell-split argv or an in-process
/// function handle (spec.md §9 "Dynamic command dispatch").
#[derive(Clone)]
pub enum Command {
    Argv(Vec<String>),
    Function(FunctionHandle),
}

impl Command {
    /// Shell-split a command-line string once, matching the original's
    /// `shlex.split(cmd)` at `CallBack.__init__` time.
    pub fn parse(cmd: &str) -> Result<Self, shell_words::ParseError> {
        Ok(Command::Argv(shell_words::split(cmd)?))
    }

    pub fn function(f: impl Fn() -> i32 + Send + Sync + 'static) -> Self {
        Command::Function(Arc::new(f))
    }

    /// A human-readable rendering of the command, used in logs.
    pub fn display(&self) -> String {
        match self {
            Command::Argv(argv) => argv.join(" "),
            Command::Function(_) => "<function>".to_string(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Argv(argv) => f.debug_tuple("Argv").field(argv).finish(),
            Command::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// What a callback's `join` label matches against. An empty string or the
/// `*` sentinel joins *all* previously started callbacks; anything else
/// joins only callbacks whose basename equals the label (spec.md §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinLabel {
    All,
    Named(String),
}

impl JoinLabel {
    pub const UNIVERSAL_SENTINEL: &'static str = "*";

    pub fn parse(label: &str) -> Self {
        if label.is_empty() || label == Self::UNIVERSAL_SENTINEL {
            JoinLabel::All
        } else {
            JoinLabel::Named(label.to_string())
        }
    }

    /// Whether a predecessor with the given basename matches this label.
    pub fn matches(&self, predecessor_basename: &str) -> bool {
        match self {
            JoinLabel::All => true,
            JoinLabel::Named(name) => name == predecessor_basename,
        }
    }
}

/// A single pipeline step: name, command, environment, working directory,
/// and fork/join concurrency flags.
#[derive(Clone)]
pub struct Callback {
    pub name: HierName,
    pub command: Command,
    pub env: HashMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
    pub fork: bool,
    pub join: Option<JoinLabel>,
}

impl Callback {
    pub fn new(name: HierName, command: Command) -> Self {
        Self {
            name,
            command,
            env: HashMap::new(),
            cwd: None,
            timeout: DEFAULT_HANDLER_TIMEOUT,
            fork: false,
            join: None,
        }
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }

    pub fn with_fork(mut self, fork: bool) -> Self {
        self.fork = fork;
        self
    }

    pub fn with_join(mut self, join: Option<JoinLabel>) -> Self {
        self.join = join;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A log-file-safe basename: the callback's hierarchical basename with
    /// spaces replaced by underscores (spec.md §5 "Shared resources").
    pub fn log_basename(&self) -> String {
        self.name.basename().replace(' ', "_")
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("command", &self.command)
            .field("fork", &self.fork)
            .field("join", &self.join)
            .finish()
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
