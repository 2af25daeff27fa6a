//! Terminal rendering for generated programs and tracked data.
//!
//! Pure string building; callers print. Weights are labeled with the
//! configured display units but never converted.

use colored::*;
use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::ProgramDefinition;
use crate::models::{Exercise, SetWeight, SetsPrescription, TemplateExercise, Units, WorkoutDay};
use crate::recovery::{FatigueSnapshot, Readiness};
use crate::storage::BodyweightEntry;

#[derive(Tabled)]
struct SetRow {
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Set")]
    set: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Reps")]
    reps: String,
}

#[derive(Tabled)]
struct ProgramRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Program")]
    name: &'static str,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Days/Week")]
    days: u32,
    #[tabled(rename = "Length")]
    length: String,
}

#[derive(Tabled)]
struct BodyweightRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Trend (7)")]
    trend: String,
}

/// Render a generated week, one table per training day
pub fn render_workout_days(days: &[WorkoutDay], units: Units) -> String {
    let mut out = String::new();
    for day in days {
        let header = format!("{} ({})", day.day, day.focus);
        out.push_str(&format!("{}\n", header.cyan().bold()));

        let rows: Vec<SetRow> = day
            .exercises
            .iter()
            .flat_map(|exercise| exercise_rows(exercise, units))
            .collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push_str("\n\n");
    }
    out
}

fn exercise_rows(exercise: &Exercise, units: Units) -> Vec<SetRow> {
    match &exercise.sets {
        SetsPrescription::Sets(sets) => sets
            .iter()
            .enumerate()
            .map(|(i, set)| SetRow {
                exercise: exercise.name.clone(),
                set: (i + 1).to_string(),
                weight: weight_cell(&set.weight, units),
                reps: set.reps.to_string(),
            })
            .collect(),
        SetsPrescription::Note(text) => vec![SetRow {
            exercise: exercise.name.clone(),
            set: String::new(),
            weight: String::new(),
            reps: text.clone(),
        }],
    }
}

fn weight_cell(weight: &SetWeight, units: Units) -> String {
    match weight {
        SetWeight::Load(_) => format!("{} {}", weight, units),
        _ => weight.to_string(),
    }
}

/// Render the program catalog as a table
pub fn render_program_list(programs: &[ProgramDefinition]) -> String {
    let rows: Vec<ProgramRow> = programs
        .iter()
        .map(|program| ProgramRow {
            key: program.key,
            name: program.name,
            level: program.level.to_string(),
            days: program.days_per_week,
            length: match program.total_weeks {
                Some(weeks) => format!("{} weeks", weeks),
                None => format!("{}-week cycle", program.cycle_weeks),
            },
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a custom template's exercises and sets
pub fn render_template(exercises: &[TemplateExercise], units: Units) -> String {
    let rows: Vec<SetRow> = exercises
        .iter()
        .flat_map(|exercise| {
            exercise.sets.iter().enumerate().map(|(i, set)| SetRow {
                exercise: exercise.name.clone(),
                set: (i + 1).to_string(),
                weight: if set.is_timed() {
                    "-".to_string()
                } else {
                    format!("{} {}", set.weight.normalize(), units)
                },
                reps: match set.duration_seconds {
                    Some(seconds) if seconds > 0 => format!("{}s", seconds),
                    _ => set.reps.to_string(),
                },
            })
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render bodyweight history with a trailing 7-entry moving average
pub fn render_bodyweight(entries: &[BodyweightEntry]) -> String {
    let rows: Vec<BodyweightRow> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let window = &entries[i.saturating_sub(6)..=i];
            let mean = window.iter().map(|e| e.weight).sum::<Decimal>()
                / Decimal::from(window.len() as u64);
            BodyweightRow {
                date: entry.date.to_string(),
                weight: entry.weight.normalize().to_string(),
                trend: mean.round_dp(1).normalize().to_string(),
            }
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line readiness summary, colored by status
pub fn render_fatigue(snapshot: &FatigueSnapshot) -> String {
    let status = match snapshot.readiness {
        Readiness::Fresh => "Fresh".blue().bold(),
        Readiness::Ready => "Ready".green().bold(),
        Readiness::Strained => "Strained".yellow().bold(),
        Readiness::NoData => "No Data".dimmed(),
    };
    let ratio = snapshot
        .ratio
        .map(|r| r.round_dp(2).normalize().to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} (acute {} / chronic {} = {})",
        status,
        snapshot.acute.round_dp(0).normalize(),
        snapshot.chronic.round_dp(0).normalize(),
        ratio
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::{Exercise, PrescribedSet, TemplateSet};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_workout_days() {
        let days = vec![WorkoutDay::new(
            "Day 1",
            "Squat",
            vec![
                Exercise::structured(
                    "Squat",
                    vec![PrescribedSet::load(dec!(205), 5), PrescribedSet::amrap(dec!(255), 5)],
                ),
                Exercise::note("Assistance", "Your choice"),
            ],
        )];
        let out = render_workout_days(&days, Units::Lb);
        assert!(out.contains("Day 1 (Squat)"));
        assert!(out.contains("205 lb"));
        assert!(out.contains("5+"));
        assert!(out.contains("Your choice"));
    }

    #[test]
    fn test_render_program_list_all_programs() {
        let out = render_program_list(catalog::PROGRAMS);
        assert!(out.contains("531"));
        assert!(out.contains("Beginner"));
        assert!(out.contains("4-week cycle"));
    }

    #[test]
    fn test_render_template_marks_timed_sets() {
        let exercises = vec![TemplateExercise::new(
            "Row Erg",
            vec![TemplateSet::timed(dec!(0), 1, 600), TemplateSet::new(dec!(95), 10)],
        )];
        let out = render_template(&exercises, Units::Kg);
        assert!(out.contains("600s"));
        assert!(out.contains("95 kg"));
    }

    #[test]
    fn test_render_bodyweight_trend() {
        let entries: Vec<BodyweightEntry> = (0..3u32)
            .map(|i| BodyweightEntry {
                date: NaiveDate::from_ymd_opt(2024, 6, 1 + i).unwrap(),
                weight: dec!(180) + Decimal::from(i),
            })
            .collect();
        let out = render_bodyweight(&entries);
        // Third row averages 180, 181, 182
        assert!(out.contains("181"));
    }

    #[test]
    fn test_render_fatigue_no_data() {
        let snapshot = FatigueSnapshot::compute(&[], NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let out = render_fatigue(&snapshot);
        assert!(out.contains("No Data"));
        assert!(out.contains("-"));
    }
}
