// SPDX-License-Identifier: MIT

//! Cron expression evaluator (spec.md §4.1).
//!
//! Accepts an extended, second-precision cron expression (or one of the
//! standard `@hourly`-style macros) and the shorthand
//! `every <n>? (second|minute|hour)s?` form, mapped to the seven-field
//! expressions documented in spec.md §4.1.

use crate::error::ScheduleError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// A parsed schedule together with the next time it is due to fire.
#[derive(Debug, Clone)]
pub struct Schedule {
    inner: cron::Schedule,
    next_run: DateTime<Utc>,
}

impl Schedule {
    /// Parse `spec` and compute the first fire time strictly after `now`.
    pub fn parse(spec: &str, now: DateTime<Utc>) -> Result<Self, ScheduleError> {
        let expr = normalize(spec)?;
        let inner = cron::Schedule::from_str(&expr)
            .map_err(|e| ScheduleError::InvalidCron(spec.to_string(), e.to_string()))?;
        let next_run = inner
            .after(&now)
            .next()
            .ok_or_else(|| ScheduleError::InvalidCron(spec.to_string(), "no occurrences".into()))?;
        Ok(Self { inner, next_run })
    }

    /// The next time this schedule is due to fire.
    pub fn next_run(&self) -> DateTime<Utc> {
        self.next_run
    }

    /// True once `now` has reached or passed `next_run`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_run
    }

    /// Compute the earliest fire time strictly after `t` without mutating
    /// `self`. Used both by `fire()` and by the `list-schedule` CLI preview.
    pub fn next_after(&self, t: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        self.inner
            .after(&t)
            .next()
            .ok_or_else(|| ScheduleError::InvalidCron("<schedule>".into(), "no occurrences".into()))
    }

    /// Advance `next_run` to `next_after(next_run)`, as the Monitor does on
    /// every fire (spec.md §4.1: "the Monitor calls `next_after(current_next_run)`
    /// (not `now`) so missed ticks under load are still enumerable").
    pub fn fire(&mut self) -> Result<DateTime<Utc>, ScheduleError> {
        let fired = self.next_run;
        self.next_run = self.next_after(self.next_run)?;
        Ok(fired)
    }

    /// Preview the next `count` fire times from the current `next_run`,
    /// inclusive, without mutating `self`. Used by `list-schedule`.
    pub fn upcoming(&self, count: usize) -> Result<Vec<DateTime<Utc>>, ScheduleError> {
        let mut out = Vec::with_capacity(count);
        if count == 0 {
            return Ok(out);
        }
        let mut cursor = self.next_run;
        out.push(cursor);
        for _ in 1..count {
            cursor = self.next_after(cursor)?;
            out.push(cursor);
        }
        Ok(out)
    }
}

/// Translate shorthand/macro forms into a seven-field cron expression,
/// otherwise return the input string unchanged for direct cron parsing.
fn normalize(spec: &str) -> Result<String, ScheduleError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::Empty);
    }

    if let Some(rest) = trimmed
        .to_ascii_lowercase()
        .strip_prefix("every")
        .map(|_| trimmed[5..].trim().to_string())
    {
        return parse_every_shorthand(trimmed, &rest);
    }

    if let Some(expr) = macro_expr(trimmed) {
        return Ok(expr.to_string());
    }

    Ok(trimmed.to_string())
}

fn macro_expr(spec: &str) -> Option<&'static str> {
    match spec.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Some("0 0 0 1 1 * *"),
        "@monthly" => Some("0 0 0 1 * * *"),
        "@weekly" => Some("0 0 0 * * SUN *"),
        "@daily" | "@midnight" => Some("0 0 0 * * * *"),
        "@hourly" => Some("0 0 * * * * *"),
        _ => None,
    }
}

fn parse_every_shorthand(original: &str, rest: &str) -> Result<String, ScheduleError> {
    let mut tokens = rest.split_whitespace();
    let first = tokens
        .next()
        .ok_or_else(|| ScheduleError::InvalidShorthand(original.to_string()))?;

    let (count, unit) = if let Ok(n) = first.parse::<u32>() {
        let unit = tokens
            .next()
            .ok_or_else(|| ScheduleError::InvalidShorthand(original.to_string()))?;
        (Some(n), unit)
    } else {
        (None, first)
    };

    if tokens.next().is_some() {
        return Err(ScheduleError::InvalidShorthand(original.to_string()));
    }

    let unit = unit.trim_end_matches('s');

    let expr = match (unit, count) {
        ("second", None) => "* * * * * * *".to_string(),
        ("second", Some(n)) if n > 0 => format!("*/{n} * * * * * *"),
        ("minute", None) => "0 * * * * * *".to_string(),
        ("minute", Some(n)) if n > 0 => format!("0 */{n} * * * * *"),
        ("hour", None) => "0 0 * * * * *".to_string(),
        ("hour", Some(n)) if n > 0 => format!("0 0 */{n} * * * *"),
        _ => return Err(ScheduleError::InvalidShorthand(original.to_string())),
    };

    Ok(expr)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
