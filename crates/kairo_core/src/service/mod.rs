//! Core use-case services.
//!
//! # Responsibility
//! - Compute full slice replacements for user intents and dispatch them.
//! - Keep UI/FFI layers decoupled from reducer and storage details.

pub mod inbox_service;
pub mod onboarding_service;
pub mod settings_service;
pub mod task_service;
pub mod ui_service;

use std::collections::BTreeSet;

/// Picks a fresh id: the current time in ms, bumped past every existing id.
///
/// When the largest id is already `i64::MAX`, the first unused id at or
/// after `now_ms` is taken instead. `None` only when that range is full.
pub fn next_id(existing: impl IntoIterator<Item = i64>, now_ms: i64) -> Option<i64> {
    let taken: BTreeSet<i64> = existing.into_iter().collect();
    match taken.last() {
        None => Some(now_ms),
        Some(&max) if max < now_ms => Some(now_ms),
        Some(&max) => max.checked_add(1).or_else(|| {
            let mut candidate = now_ms;
            while taken.contains(&candidate) {
                candidate = candidate.checked_add(1)?;
            }
            Some(candidate)
        }),
    }
}
