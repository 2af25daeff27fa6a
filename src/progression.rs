//! Linear progression for user-authored templates.
//!
//! Templates arrive as loosely-shaped JSON (bare exercise names, partial
//! set objects); normalization recovers whatever is usable and never
//! errors, since the data is user-authored and may be incomplete.
//! Progression itself is a pure computation over the normalized form.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::{ProgressionRule, TemplateExercise, TemplateSet};

pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Normalize a raw template exercise list.
    ///
    /// Accepts an array of bare strings or structured objects. Anything
    /// that is not an array yields an empty list; entries without a usable
    /// name are discarded; every surviving exercise carries a `sets` vec,
    /// possibly empty.
    pub fn normalize_template_exercises(raw: &Value) -> Vec<TemplateExercise> {
        match raw.as_array() {
            Some(entries) => entries.iter().filter_map(Self::normalize_entry).collect(),
            None => Vec::new(),
        }
    }

    fn normalize_entry(entry: &Value) -> Option<TemplateExercise> {
        match entry {
            Value::String(name) => {
                let name = name.trim();
                if name.is_empty() {
                    None
                } else {
                    Some(TemplateExercise::new(name, Vec::new()))
                }
            }
            Value::Object(obj) => {
                let name = obj.get("name").and_then(Value::as_str)?.trim();
                if name.is_empty() {
                    return None;
                }
                let sets = obj
                    .get("sets")
                    .and_then(Value::as_array)
                    .map(|sets| sets.iter().map(Self::normalize_set).collect())
                    .unwrap_or_default();
                Some(TemplateExercise::new(name, sets))
            }
            _ => None,
        }
    }

    /// Missing or malformed fields fall back to zero rather than failing
    fn normalize_set(set: &Value) -> TemplateSet {
        let weight = set
            .get("weight")
            .and_then(Self::decimal_value)
            .unwrap_or(Decimal::ZERO);
        let reps = set
            .get("reps")
            .and_then(Value::as_u64)
            .and_then(|r| u32::try_from(r).ok())
            .unwrap_or(0);
        let duration_seconds = set
            .get("durationSeconds")
            .or_else(|| set.get("duration_seconds"))
            .and_then(Value::as_u64)
            .and_then(|d| u32::try_from(d).ok());
        TemplateSet {
            weight,
            reps,
            duration_seconds,
        }
    }

    fn decimal_value(value: &Value) -> Option<Decimal> {
        if let Some(i) = value.as_i64() {
            return Some(Decimal::from(i));
        }
        if let Some(f) = value.as_f64() {
            return Decimal::from_f64(f);
        }
        value.as_str().and_then(|s| s.trim().parse().ok())
    }

    /// Apply per-exercise linear progression rules for the given week.
    ///
    /// Rules match by case-insensitive name. Duration-bearing sets pass
    /// through untouched. The effective base is the rule's override weight
    /// when present, else the template weight; `base + increment * (week-1)`
    /// is applied only when the increment is non-zero and there is either
    /// an override or a positive template weight, which keeps un-loadable
    /// placeholder sets (weight 0) from being progressed. A zero or absent
    /// increment still lets an override base replace the weight outright.
    pub fn build_progressed_exercises(
        exercises: &[TemplateExercise],
        rules: &[ProgressionRule],
        week: u32,
    ) -> Vec<TemplateExercise> {
        exercises
            .iter()
            .map(|exercise| {
                match rules.iter().find(|rule| rule.matches(&exercise.name)) {
                    Some(rule) => TemplateExercise {
                        name: exercise.name.clone(),
                        sets: exercise
                            .sets
                            .iter()
                            .map(|set| Self::progress_set(set, rule, week))
                            .collect(),
                    },
                    None => exercise.clone(),
                }
            })
            .collect()
    }

    fn progress_set(set: &TemplateSet, rule: &ProgressionRule, week: u32) -> TemplateSet {
        if set.is_timed() {
            return set.clone();
        }

        let base = rule.base_weight.unwrap_or(set.weight);
        let increment = rule.increment.unwrap_or(Decimal::ZERO);
        let progressible =
            !increment.is_zero() && (rule.base_weight.is_some() || set.weight > Decimal::ZERO);

        let weight = if progressible {
            // Checked arithmetic: an overflowed weight keeps the original
            // rather than surfacing an error
            increment
                .checked_mul(Decimal::from(week.saturating_sub(1)))
                .and_then(|step| base.checked_add(step))
                .unwrap_or(set.weight)
        } else {
            base
        };

        TemplateSet {
            weight,
            reps: set.reps,
            duration_seconds: set.duration_seconds,
        }
    }
}
