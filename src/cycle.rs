//! Week state transitions for custom programs and catalog assignments.
//!
//! Generators stay stateless; all week bookkeeping happens here through
//! explicit transitions that return the updated instance. Custom programs
//! run to a fixed length and then refuse to advance; catalog assignments
//! wrap back to week 1 at the end of their cycle.

use chrono::Utc;
use thiserror::Error;

use crate::models::{CustomProgram, ProgramAssignment};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("program already complete (week {current_week} of {weeks})")]
    ProgramComplete { current_week: u32, weeks: u32 },
}

impl CustomProgram {
    /// A program is complete once its week counter has moved past the final
    /// programmed week.
    pub fn is_complete(&self) -> bool {
        self.current_week > self.length.weeks()
    }

    /// Advance to the next week, refusing once the program is complete.
    ///
    /// Completing the final week leaves `current_week` at `weeks + 1`, the
    /// terminal state `is_complete` reports.
    pub fn advance_week(mut self) -> Result<CustomProgram, ProgressionError> {
        if self.is_complete() {
            return Err(ProgressionError::ProgramComplete {
                current_week: self.current_week,
                weeks: self.length.weeks(),
            });
        }
        self.current_week += 1;
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// Restart from week 1. Rules and template linkage are untouched.
    pub fn reset(mut self) -> CustomProgram {
        self.current_week = 1;
        self.updated_at = Utc::now();
        self
    }
}

impl ProgramAssignment {
    pub fn new(owner: impl Into<String>, program_key: impl Into<String>) -> Self {
        ProgramAssignment {
            owner: owner.into(),
            program_key: program_key.into(),
            current_week: 1,
            updated_at: Utc::now(),
        }
    }

    /// Advance one week, wrapping back to week 1 after the last week of the
    /// cycle. Catalog programs have no terminal state.
    pub fn advance(mut self, cycle_weeks: u32) -> ProgramAssignment {
        let next = self.current_week.saturating_add(1);
        self.current_week = if cycle_weeks > 0 && next > cycle_weeks {
            1
        } else {
            next
        };
        self.updated_at = Utc::now();
        self
    }

    pub fn reset(mut self) -> ProgramAssignment {
        self.current_week = 1;
        self.updated_at = Utc::now();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgramLength;
    use uuid::Uuid;

    fn program(length: ProgramLength, current_week: u32) -> CustomProgram {
        let now = Utc::now();
        CustomProgram {
            id: Uuid::new_v4(),
            owner: "athlete-1".to_string(),
            template_id: Uuid::new_v4(),
            name: "Garage LP".to_string(),
            length,
            current_week,
            rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_advance_through_program() {
        let mut p = program(ProgramLength::FourWeeks, 1);
        for expected in [2, 3, 4, 5] {
            p = p.advance_week().unwrap();
            assert_eq!(p.current_week, expected);
        }
        assert!(p.is_complete());
    }

    #[test]
    fn test_completion_boundary() {
        // Final programmed week is still in progress
        let p = program(ProgramLength::FourWeeks, 4);
        assert!(!p.is_complete());
        let p = program(ProgramLength::FourWeeks, 5);
        assert!(p.is_complete());
    }

    #[test]
    fn test_advance_past_complete_errors() {
        let p = program(ProgramLength::FourWeeks, 5);
        let err = p.advance_week().unwrap_err();
        assert_eq!(
            err,
            ProgressionError::ProgramComplete {
                current_week: 5,
                weeks: 4
            }
        );
    }

    #[test]
    fn test_reset_returns_to_week_one() {
        let p = program(ProgramLength::TwelveWeeks, 9);
        let p = p.reset();
        assert_eq!(p.current_week, 1);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_assignment_wraps_at_cycle_end() {
        let mut a = ProgramAssignment::new("athlete-1", "531");
        for expected in [2, 3, 4, 1, 2] {
            a = a.advance(4);
            assert_eq!(a.current_week, expected);
        }
    }

    #[test]
    fn test_assignment_without_cycle_counts_up() {
        let a = ProgramAssignment::new("athlete-1", "stronglifts").advance(0);
        assert_eq!(a.current_week, 2);
    }

    #[test]
    fn test_assignment_reset() {
        let a = ProgramAssignment::new("athlete-1", "madcow")
            .advance(12)
            .advance(12)
            .reset();
        assert_eq!(a.current_week, 1);
    }
}
