// SPDX-License-Identifier: MIT

//! Builds the runtime Monitor/EventRouter/CallbackPipeline graph from a
//! parsed `RawConfig` (spec.md §6; SUPPLEMENTED FROM ORIGINAL SOURCE).
//!
//! Grounded line-for-line on `main.constructor`
//! (`examples/original_source/main.py`): per-job env merge order,
//! `continue_on_error` default, and the `file`/`svn`/scheduler-fallback
//! monitor-type dispatch.

use crate::env_checker;
use crate::error::ConfigError;
use crate::raw::{RawCallback, RawConfig, RawJob};
use gman_core::{Callback, Clock, Command, EventKind, HierName, JoinLabel, Schedule};
use gman_engine::{EventRouter, Monitor, ScratchDir};
use gman_sources::ChangeSource;
use std::collections::HashMap;
use std::sync::Arc;

pub struct BuiltConfig {
    pub debug: bool,
    pub monitors: Vec<Monitor>,
}

/// Build every job's Monitor from a parsed document. Jobs are processed
/// in sorted-name order so `list-targets`/`list-schedule` output (and any
/// configuration error) is deterministic.
pub fn build(
    raw: RawConfig,
    scratch_dir: Arc<ScratchDir>,
    clock: Arc<dyn Clock>,
) -> Result<BuiltConfig, ConfigError> {
    let project = raw.project.ok_or(ConfigError::MissingProject)?;
    let os_env: HashMap<String, String> = std::env::vars().collect();
    let global_env = env_checker::check(&raw.env)?;

    let mut job_names: Vec<&String> = raw.jobs.keys().collect();
    job_names.sort();

    let mut monitors = Vec::with_capacity(job_names.len());
    for job_name in job_names {
        let job = &raw.jobs[job_name];
        let monitor = build_job(
            &project,
            job_name,
            job,
            &os_env,
            &global_env,
            scratch_dir.clone(),
            clock.clone(),
        )?;
        monitors.push(monitor);
    }

    Ok(BuiltConfig {
        debug: raw.debug,
        monitors,
    })
}

fn build_job(
    project: &str,
    job_name: &str,
    job: &RawJob,
    os_env: &HashMap<String, String>,
    global_env: &HashMap<String, String>,
    scratch_dir: Arc<ScratchDir>,
    clock: Arc<dyn Clock>,
) -> Result<Monitor, ConfigError> {
    let job_env = env_checker::check(&job.job_config.env)?;
    let mut base_env = os_env.clone();
    base_env.extend(global_env.clone());
    base_env.extend(job_env);

    let job_hier = HierName::new(format!("{project}/{job_name}"));

    if job.on_events.is_empty() {
        return Err(ConfigError::EmptyOnEvents(job_name.to_string()));
    }

    let source = build_source(job_name, job)?;

    let mut pipelines = HashMap::with_capacity(job.on_events.len());
    for (kind_str, raw_callbacks) in &job.on_events {
        let kind = parse_event_kind(job_name, kind_str)?;
        let callbacks = raw_callbacks
            .iter()
            .map(|rc| build_callback(job_name, &job_hier, kind_str, rc, &base_env))
            .collect::<Result<Vec<_>, _>>()?;
        let continue_on_error = job.job_config.continue_on_error;
        pipelines.insert(
            kind,
            gman_engine::CallbackPipeline::new(callbacks, continue_on_error),
        );
    }

    let error_handler = job
        .on_error
        .as_ref()
        .map(|rc| build_callback(job_name, &job_hier, "on_error", rc, &base_env))
        .transpose()?;
    let success_handler = job
        .on_success
        .as_ref()
        .map(|rc| build_callback(job_name, &job_hier, "on_success", rc, &base_env))
        .transpose()?;

    let router = EventRouter::new(pipelines, error_handler, success_handler, scratch_dir);

    let schedule =
        Schedule::parse(&job.monitor.schedule, clock.now()).map_err(|source| ConfigError::InvalidSchedule {
            job: job_name.to_string(),
            schedule: job.monitor.schedule.clone(),
            source,
        })?;

    Ok(Monitor::new(job_hier, schedule, source, router, clock))
}

fn build_source(job_name: &str, job: &RawJob) -> Result<Option<Box<dyn ChangeSource>>, ConfigError> {
    match job.monitor.kind.as_str() {
        "" => Ok(None),
        "file" => {
            if job.monitor.targets.is_empty() {
                return Err(ConfigError::MissingTargets(job_name.to_string(), "file".to_string()));
            }
            let extensions = if job.monitor.extensions.is_empty() {
                None
            } else {
                Some(job.monitor.extensions.clone())
            };
            let source = gman_sources::FilesystemSource::new(
                &job.monitor.targets,
                &job.monitor.ignores,
                job.monitor.recursive,
                extensions,
            )
            .map_err(|source| ConfigError::Target {
                job: job_name.to_string(),
                source,
            })?;
            Ok(Some(Box::new(source)))
        }
        "svn" => {
            if job.monitor.targets.is_empty() {
                return Err(ConfigError::MissingTargets(job_name.to_string(), "svn".to_string()));
            }
            let paths = gman_sources::resolve_patterns(&job.monitor.targets, &job.monitor.ignores)
                .map_err(|source| ConfigError::Target {
                    job: job_name.to_string(),
                    source,
                })?;
            let source = gman_sources::VersionControlSource::new(&paths, &job.monitor.depth);
            Ok(Some(Box::new(source)))
        }
        other => Err(ConfigError::UnknownMonitorType(job_name.to_string(), other.to_string())),
    }
}

fn parse_event_kind(job_name: &str, kind: &str) -> Result<EventKind, ConfigError> {
    match kind {
        "added" => Ok(EventKind::Added),
        "removed" => Ok(EventKind::Removed),
        "modified" => Ok(EventKind::Modified),
        "any" => Ok(EventKind::Any),
        other => Err(ConfigError::UnknownEventKind(job_name.to_string(), other.to_string())),
    }
}

fn build_callback(
    job_name: &str,
    job_hier: &HierName,
    label: &str,
    raw: &RawCallback,
    base_env: &HashMap<String, String>,
) -> Result<Callback, ConfigError> {
    if raw.fork && raw.join.is_some() {
        return Err(ConfigError::ForkJoinConflict(job_name.to_string()));
    }

    let callback_env = env_checker::check(&raw.env)?;
    let mut env = base_env.clone();
    env.extend(callback_env);

    let command = Command::parse(&raw.cmd).map_err(|source| ConfigError::InvalidCommand {
        job: job_name.to_string(),
        cmd: raw.cmd.clone(),
        source,
    })?;

    let name = job_hier.join(label).join(&raw.name);
    let join = raw.join.as_deref().map(JoinLabel::parse);

    Ok(Callback::new(name, command)
        .with_env(env)
        .with_fork(raw.fork)
        .with_join(join))
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
