use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Experience level a program is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ProgramLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramLevel::Beginner => write!(f, "Beginner"),
            ProgramLevel::Intermediate => write!(f, "Intermediate"),
            ProgramLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

/// The four primary barbell lifts tracked by every catalog program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
    Ohp,
}

impl Lift {
    pub const ALL: [Lift; 4] = [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Ohp];

    /// Display name used in generated prescriptions
    pub fn name(&self) -> &'static str {
        match self {
            Lift::Squat => "Squat",
            Lift::Bench => "Bench Press",
            Lift::Deadlift => "Deadlift",
            Lift::Ohp => "Overhead Press",
        }
    }

    /// Pull this lift's one-rep max out of a `RepMaxes`
    pub fn max_in(&self, maxes: &RepMaxes) -> Decimal {
        match self {
            Lift::Squat => maxes.squat,
            Lift::Bench => maxes.bench,
            Lift::Deadlift => maxes.deadlift,
            Lift::Ohp => maxes.ohp,
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One-rep maxes for the four primary barbell lifts.
///
/// Immutable input to every program generator; the engine never writes
/// back to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepMaxes {
    pub squat: Decimal,
    pub bench: Decimal,
    pub deadlift: Decimal,
    pub ohp: Decimal,
}

/// Weight of a prescribed set.
///
/// Wire format: a JSON number for a concrete load, the string `"BW"` for
/// bodyweight movements, and `null` when the load is left to the lifter
/// (accessory work).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SetWeight {
    Load(Decimal),
    Bodyweight,
    #[default]
    Unspecified,
}

impl fmt::Display for SetWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetWeight::Load(w) => write!(f, "{}", w.normalize()),
            SetWeight::Bodyweight => write!(f, "BW"),
            SetWeight::Unspecified => write!(f, "-"),
        }
    }
}

impl Serialize for SetWeight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SetWeight::Load(w) => {
                let w = w.normalize();
                if w.scale() == 0 {
                    if let Some(v) = w.to_i64() {
                        return serializer.serialize_i64(v);
                    }
                }
                match w.to_f64() {
                    Some(v) => serializer.serialize_f64(v),
                    None => serializer.serialize_str(&w.to_string()),
                }
            }
            SetWeight::Bodyweight => serializer.serialize_str("BW"),
            SetWeight::Unspecified => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for SetWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WeightVisitor;

        impl<'de> Visitor<'de> for WeightVisitor {
            type Value = SetWeight;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number, the string \"BW\", or null")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SetWeight, E> {
                Ok(SetWeight::Load(Decimal::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SetWeight, E> {
                Ok(SetWeight::Load(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<SetWeight, E> {
                Decimal::from_f64(v)
                    .map(SetWeight::Load)
                    .ok_or_else(|| E::custom(format!("weight out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SetWeight, E> {
                if v.eq_ignore_ascii_case("bw") {
                    return Ok(SetWeight::Bodyweight);
                }
                v.parse::<Decimal>()
                    .map(SetWeight::Load)
                    .map_err(|_| E::custom(format!("invalid weight: {}", v)))
            }

            fn visit_unit<E: de::Error>(self) -> Result<SetWeight, E> {
                Ok(SetWeight::Unspecified)
            }

            fn visit_none<E: de::Error>(self) -> Result<SetWeight, E> {
                Ok(SetWeight::Unspecified)
            }
        }

        deserializer.deserialize_any(WeightVisitor)
    }
}

/// Rep target of a prescribed set.
///
/// Wire format: a JSON number for a fixed count, `"5+"` for an AMRAP set
/// with a base target, `"10RM"` for a work-up-to rep max, and any other
/// string for a free-text scheme such as `"3x10"` or `"MR10"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetReps {
    Count(u32),
    Amrap(u32),
    RepMax(u32),
    Scheme(String),
}

impl fmt::Display for SetReps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetReps::Count(n) => write!(f, "{}", n),
            SetReps::Amrap(n) => write!(f, "{}+", n),
            SetReps::RepMax(n) => write!(f, "{}RM", n),
            SetReps::Scheme(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for SetReps {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SetReps::Count(n) => serializer.serialize_u32(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for SetReps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RepsVisitor;

        impl<'de> Visitor<'de> for RepsVisitor {
            type Value = SetReps;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a rep count, an AMRAP marker like \"5+\", or a rep scheme string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SetReps, E> {
                u32::try_from(v)
                    .map(SetReps::Count)
                    .map_err(|_| E::custom(format!("invalid rep count: {}", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SetReps, E> {
                u32::try_from(v)
                    .map(SetReps::Count)
                    .map_err(|_| E::custom(format!("invalid rep count: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SetReps, E> {
                Ok(SetReps::parse_marker(v))
            }
        }

        deserializer.deserialize_any(RepsVisitor)
    }
}

impl SetReps {
    /// Classify a textual rep marker. Unrecognized text is kept verbatim as
    /// a free-text scheme rather than rejected, since accessory
    /// prescriptions are user-authored.
    pub fn parse_marker(text: &str) -> SetReps {
        let trimmed = text.trim();
        if let Some(prefix) = trimmed.strip_suffix('+') {
            if let Ok(n) = prefix.parse::<u32>() {
                return SetReps::Amrap(n);
            }
        }
        let upper = trimmed.to_ascii_uppercase();
        if let Some(prefix) = upper.strip_suffix("RM") {
            if let Ok(n) = prefix.parse::<u32>() {
                return SetReps::RepMax(n);
            }
        }
        SetReps::Scheme(trimmed.to_string())
    }
}

/// A single prescribed set: how much weight, for how many reps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedSet {
    #[serde(default)]
    pub weight: SetWeight,
    pub reps: SetReps,
}

impl PrescribedSet {
    /// Concrete load for a fixed rep count
    pub fn load(weight: Decimal, reps: u32) -> Self {
        PrescribedSet {
            weight: SetWeight::Load(weight),
            reps: SetReps::Count(reps),
        }
    }

    /// Concrete load with an AMRAP rep target (`"5+"`)
    pub fn amrap(weight: Decimal, target: u32) -> Self {
        PrescribedSet {
            weight: SetWeight::Load(weight),
            reps: SetReps::Amrap(target),
        }
    }

    /// Work up to a rep max at a guide load (`"10RM"`)
    pub fn rep_max(weight: Decimal, target: u32) -> Self {
        PrescribedSet {
            weight: SetWeight::Load(weight),
            reps: SetReps::RepMax(target),
        }
    }

    /// Bodyweight set for a fixed rep count
    pub fn bodyweight(reps: u32) -> Self {
        PrescribedSet {
            weight: SetWeight::Bodyweight,
            reps: SetReps::Count(reps),
        }
    }
}

/// Either a structured list of sets or a free-text accessory block.
///
/// A string-valued prescription is not tracked set-by-set; it carries the
/// whole instruction (e.g. `"3x15+ Lat Pulldown"`) verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetsPrescription {
    Sets(Vec<PrescribedSet>),
    Note(String),
}

impl SetsPrescription {
    /// Structured sets, if this prescription has them
    pub fn sets(&self) -> Option<&[PrescribedSet]> {
        match self {
            SetsPrescription::Sets(sets) => Some(sets),
            SetsPrescription::Note(_) => None,
        }
    }
}

/// One exercise within a training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: SetsPrescription,
}

impl Exercise {
    pub fn structured(name: impl Into<String>, sets: Vec<PrescribedSet>) -> Self {
        Exercise {
            name: name.into(),
            sets: SetsPrescription::Sets(sets),
        }
    }

    pub fn note(name: impl Into<String>, text: impl Into<String>) -> Self {
        Exercise {
            name: name.into(),
            sets: SetsPrescription::Note(text.into()),
        }
    }
}

/// One training session of a generated program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Session label, e.g. "Day 1"
    pub day: String,
    /// What the session centers on, e.g. "Squat" or "Volume"
    pub focus: String,
    pub exercises: Vec<Exercise>,
}

impl WorkoutDay {
    pub fn new(day: impl Into<String>, focus: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        WorkoutDay {
            day: day.into(),
            focus: focus.into(),
            exercises,
        }
    }
}

/// A single set inside a user-authored template.
///
/// Duration-bearing sets describe timed (cardio) work and are exempt from
/// weight progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub weight: Decimal,
    pub reps: u32,
    #[serde(
        default,
        alias = "durationSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_seconds: Option<u32>,
}

impl TemplateSet {
    pub fn new(weight: Decimal, reps: u32) -> Self {
        TemplateSet {
            weight,
            reps,
            duration_seconds: None,
        }
    }

    pub fn timed(weight: Decimal, reps: u32, duration_seconds: u32) -> Self {
        TemplateSet {
            weight,
            reps,
            duration_seconds: Some(duration_seconds),
        }
    }

    /// True when this set is timed work rather than load-bearing
    pub fn is_timed(&self) -> bool {
        matches!(self.duration_seconds, Some(d) if d > 0)
    }
}

/// One exercise of a user-authored template, normalized so that `sets` is
/// always present (possibly empty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<TemplateSet>,
}

impl TemplateExercise {
    pub fn new(name: impl Into<String>, sets: Vec<TemplateSet>) -> Self {
        TemplateExercise {
            name: name.into(),
            sets,
        }
    }
}

/// Per-exercise linear progression rule for a custom program.
///
/// Matched to template exercises by case-insensitive name equality. A
/// `base_weight` overrides the template's weight as the progression anchor;
/// `increment` is the weekly step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRule {
    pub exercise_name: String,
    #[serde(default)]
    pub base_weight: Option<Decimal>,
    #[serde(default)]
    pub increment: Option<Decimal>,
}

impl ProgressionRule {
    pub fn matches(&self, exercise_name: &str) -> bool {
        self.exercise_name.eq_ignore_ascii_case(exercise_name)
    }
}

/// Allowed custom program lengths. Wire format: the week count (4, 8, 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramLength {
    FourWeeks,
    EightWeeks,
    TwelveWeeks,
}

impl ProgramLength {
    pub fn weeks(&self) -> u32 {
        match self {
            ProgramLength::FourWeeks => 4,
            ProgramLength::EightWeeks => 8,
            ProgramLength::TwelveWeeks => 12,
        }
    }
}

impl TryFrom<u32> for ProgramLength {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(ProgramLength::FourWeeks),
            8 => Ok(ProgramLength::EightWeeks),
            12 => Ok(ProgramLength::TwelveWeeks),
            _ => Err(format!(
                "program length must be 4, 8 or 12 weeks, got {}",
                value
            )),
        }
    }
}

impl fmt::Display for ProgramLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} weeks", self.weeks())
    }
}

impl Serialize for ProgramLength {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.weeks())
    }
}

impl<'de> Deserialize<'de> for ProgramLength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let weeks = u32::deserialize(deserializer)?;
        ProgramLength::try_from(weeks).map_err(de::Error::custom)
    }
}

/// A user's instance of a custom program: a template plus progression rules
/// and the week counter advanced by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProgram {
    pub id: Uuid,
    /// Owner scoping for every storage fetch
    pub owner: String,
    pub template_id: Uuid,
    pub name: String,
    pub length: ProgramLength,
    /// 1-based; the program is complete once this exceeds `length.weeks()`
    pub current_week: u32,
    pub rules: Vec<ProgressionRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomProgram {
    pub fn new(
        owner: impl Into<String>,
        template_id: Uuid,
        name: impl Into<String>,
        length: ProgramLength,
        rules: Vec<ProgressionRule>,
    ) -> Self {
        let now = Utc::now();
        CustomProgram {
            id: Uuid::new_v4(),
            owner: owner.into(),
            template_id,
            name: name.into(),
            length,
            current_week: 1,
            rules,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user's assignment to a catalog program, tracking which week they are on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAssignment {
    pub owner: String,
    pub program_key: String,
    /// 1-based week within the program's cycle
    pub current_week: u32,
    pub updated_at: DateTime<Utc>,
}

/// Display units for rendered weights. A label only: generated numbers are
/// unit-agnostic and never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Lb,
    Kg,
}

impl Default for Units {
    fn default() -> Self {
        Units::Lb
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Lb => write!(f, "lb"),
            Units::Kg => write!(f, "kg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_set_weight_wire_formats() {
        let load = SetWeight::Load(dec!(205));
        assert_eq!(serde_json::to_string(&load).unwrap(), "205");

        let offset = SetWeight::Load(dec!(182.5));
        assert_eq!(serde_json::to_string(&offset).unwrap(), "182.5");

        let bw = SetWeight::Bodyweight;
        assert_eq!(serde_json::to_string(&bw).unwrap(), "\"BW\"");

        let open = SetWeight::Unspecified;
        assert_eq!(serde_json::to_string(&open).unwrap(), "null");
    }

    #[test]
    fn test_set_weight_deserialization() {
        let w: SetWeight = serde_json::from_str("205").unwrap();
        assert_eq!(w, SetWeight::Load(dec!(205)));

        let w: SetWeight = serde_json::from_str("182.5").unwrap();
        assert_eq!(w, SetWeight::Load(dec!(182.5)));

        let w: SetWeight = serde_json::from_str("\"BW\"").unwrap();
        assert_eq!(w, SetWeight::Bodyweight);

        let w: SetWeight = serde_json::from_str("\"bw\"").unwrap();
        assert_eq!(w, SetWeight::Bodyweight);

        let w: SetWeight = serde_json::from_str("null").unwrap();
        assert_eq!(w, SetWeight::Unspecified);
    }

    #[test]
    fn test_set_reps_wire_formats() {
        assert_eq!(serde_json::to_string(&SetReps::Count(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&SetReps::Amrap(1)).unwrap(), "\"1+\"");
        assert_eq!(
            serde_json::to_string(&SetReps::RepMax(10)).unwrap(),
            "\"10RM\""
        );
        assert_eq!(
            serde_json::to_string(&SetReps::Scheme("3x10".to_string())).unwrap(),
            "\"3x10\""
        );
    }

    #[test]
    fn test_set_reps_marker_parsing() {
        assert_eq!(SetReps::parse_marker("5+"), SetReps::Amrap(5));
        assert_eq!(SetReps::parse_marker("1+"), SetReps::Amrap(1));
        assert_eq!(SetReps::parse_marker("10RM"), SetReps::RepMax(10));
        assert_eq!(SetReps::parse_marker("10rm"), SetReps::RepMax(10));
        assert_eq!(
            SetReps::parse_marker("MR10"),
            SetReps::Scheme("MR10".to_string())
        );
        assert_eq!(
            SetReps::parse_marker("3x10"),
            SetReps::Scheme("3x10".to_string())
        );
    }

    #[test]
    fn test_set_reps_round_trip() {
        for reps in [
            SetReps::Count(3),
            SetReps::Amrap(5),
            SetReps::RepMax(10),
            SetReps::Scheme("MR10".to_string()),
        ] {
            let json = serde_json::to_string(&reps).unwrap();
            let back: SetReps = serde_json::from_str(&json).unwrap();
            assert_eq!(back, reps);
        }
    }

    #[test]
    fn test_prescribed_set_serialization() {
        let set = PrescribedSet::amrap(dec!(255), 1);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "{\"weight\":255,\"reps\":\"1+\"}");
    }

    #[test]
    fn test_prescribed_set_missing_weight_defaults_unspecified() {
        let set: PrescribedSet = serde_json::from_str("{\"reps\":\"3x10\"}").unwrap();
        assert_eq!(set.weight, SetWeight::Unspecified);
        assert_eq!(set.reps, SetReps::Scheme("3x10".to_string()));
    }

    #[test]
    fn test_sets_prescription_untagged() {
        let structured: SetsPrescription =
            serde_json::from_str("[{\"weight\":100,\"reps\":5}]").unwrap();
        assert!(structured.sets().is_some());

        let note: SetsPrescription = serde_json::from_str("\"3x15+ Lat Pulldown\"").unwrap();
        assert_eq!(note.sets(), None);
        assert_eq!(
            note,
            SetsPrescription::Note("3x15+ Lat Pulldown".to_string())
        );
    }

    #[test]
    fn test_template_set_duration_alias() {
        let set: TemplateSet =
            serde_json::from_str("{\"weight\":0,\"reps\":1,\"durationSeconds\":600}").unwrap();
        assert_eq!(set.duration_seconds, Some(600));
        assert!(set.is_timed());

        let set: TemplateSet = serde_json::from_str("{\"weight\":135,\"reps\":5}").unwrap();
        assert_eq!(set.duration_seconds, None);
        assert!(!set.is_timed());
    }

    #[test]
    fn test_zero_duration_is_not_timed() {
        let set = TemplateSet {
            weight: dec!(135),
            reps: 5,
            duration_seconds: Some(0),
        };
        assert!(!set.is_timed());
    }

    #[test]
    fn test_progression_rule_case_insensitive_match() {
        let rule = ProgressionRule {
            exercise_name: "Bench Press".to_string(),
            base_weight: Some(dec!(135)),
            increment: Some(dec!(5)),
        };
        assert!(rule.matches("bench press"));
        assert!(rule.matches("BENCH PRESS"));
        assert!(!rule.matches("Incline Bench Press"));
    }

    #[test]
    fn test_program_length_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProgramLength::EightWeeks).unwrap(),
            "8"
        );
        let length: ProgramLength = serde_json::from_str("12").unwrap();
        assert_eq!(length, ProgramLength::TwelveWeeks);
        assert!(serde_json::from_str::<ProgramLength>("6").is_err());
    }

    #[test]
    fn test_lift_max_lookup() {
        let maxes = RepMaxes {
            squat: dec!(300),
            bench: dec!(200),
            deadlift: dec!(350),
            ohp: dec!(120),
        };
        assert_eq!(Lift::Squat.max_in(&maxes), dec!(300));
        assert_eq!(Lift::Ohp.max_in(&maxes), dec!(120));
        assert_eq!(Lift::Bench.name(), "Bench Press");
    }

    #[test]
    fn test_workout_day_serialization() {
        let day = WorkoutDay::new(
            "Day 1",
            "Squat",
            vec![
                Exercise::structured("Squat", vec![PrescribedSet::load(dec!(205), 5)]),
                Exercise::note("Accessories", "3x10 your choice"),
            ],
        );
        let json = serde_json::to_string(&day).unwrap();
        let back: WorkoutDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }
}
