use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::error::LiftrsError;
use crate::models::{CustomProgram, ProgramAssignment, ProgramLength, TemplateExercise};
use crate::progression::ProgressionCalculator;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
    #[error("week advance conflict for program {program_id}")]
    WeekConflict { program_id: String },
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A stored workout template: the exercise list progression runs over
#[derive(Debug, Clone)]
pub struct StoredTemplate {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
    pub created_at: DateTime<Utc>,
}

/// A generated workout persisted for history and fatigue tracking
#[derive(Debug, Clone)]
pub struct StoredWorkout {
    pub id: Uuid,
    pub owner: String,
    pub template_id: Uuid,
    pub name: String,
    pub week: u32,
    pub exercises: Vec<TemplateExercise>,
    pub created_at: DateTime<Utc>,
}

/// One bodyweight log entry; at most one per owner per day
#[derive(Debug, Clone, PartialEq)]
pub struct BodyweightEntry {
    pub date: NaiveDate,
    pub weight: Decimal,
}

/// Result of an atomic week advance
#[derive(Debug, Clone)]
pub struct StartedWeek {
    /// The week that was just generated
    pub week: u32,
    pub template_id: Uuid,
    pub workout_id: Uuid,
}

/// SQLite-backed store. All reads are owner-scoped.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Create or open a store at the specified path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        // WAL mode for better concurrent access
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS templates (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                exercises_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                template_id TEXT NOT NULL,
                name TEXT NOT NULL,
                week INTEGER NOT NULL,
                exercises_json TEXT NOT NULL,
                created_at TEXT NOT NULL,

                FOREIGN KEY (template_id) REFERENCES templates (id)
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS custom_programs (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                template_id TEXT NOT NULL,
                name TEXT NOT NULL,
                weeks INTEGER NOT NULL,
                current_week INTEGER NOT NULL DEFAULT 1,
                rules_json TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,

                FOREIGN KEY (template_id) REFERENCES templates (id)
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS bodyweight_log (
                owner TEXT NOT NULL,
                date TEXT NOT NULL,
                weight TEXT NOT NULL,

                PRIMARY KEY (owner, date)
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS assignments (
                owner TEXT PRIMARY KEY,
                program_key TEXT NOT NULL,
                current_week INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_templates_owner ON templates (owner)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_workouts_owner_created ON workouts (owner, created_at)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_programs_owner ON custom_programs (owner)",
            [],
        )?;

        Ok(())
    }

    /// Store a new template and return it with its generated id
    pub fn store_template(
        &mut self,
        owner: &str,
        name: &str,
        exercises: &[TemplateExercise],
    ) -> Result<StoredTemplate, StorageError> {
        let template = StoredTemplate {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: name.to_string(),
            exercises: exercises.to_vec(),
            created_at: Utc::now(),
        };
        Self::insert_template_on(&self.conn, &template)?;
        Ok(template)
    }

    /// Load a template by id, scoped to its owner
    pub fn load_template(&self, owner: &str, id: Uuid) -> Result<StoredTemplate, StorageError> {
        Self::template_on(&self.conn, owner, id)
    }

    /// Store a custom program definition
    pub fn store_program(&mut self, program: &CustomProgram) -> Result<(), StorageError> {
        let rules_json = serde_json::to_string(&program.rules).map_err(json_err)?;
        self.conn.execute(
            r#"
            INSERT INTO custom_programs (
                id, owner, template_id, name, weeks, current_week, rules_json, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                program.id.to_string(),
                program.owner,
                program.template_id.to_string(),
                program.name,
                program.length.weeks(),
                program.current_week,
                rules_json,
                program.created_at.to_rfc3339(),
                program.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load a custom program by id, scoped to its owner
    pub fn load_program(&self, owner: &str, id: Uuid) -> Result<CustomProgram, StorageError> {
        Self::program_on(&self.conn, owner, id)
    }

    /// List an owner's custom programs, oldest first
    pub fn list_programs(&self, owner: &str) -> Result<Vec<CustomProgram>, StorageError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, owner, template_id, name, weeks, current_week, rules_json, created_at, updated_at
            FROM custom_programs
            WHERE owner = ?1
            ORDER BY created_at
            "#,
        )?;
        let rows = stmt.query_map(params![owner], program_row)?;

        let mut programs = Vec::new();
        for row in rows {
            programs.push(program_from_parts(row?)?);
        }
        Ok(programs)
    }

    /// Atomically generate the current week of a custom program and advance it.
    ///
    /// One transaction: load program and template, reject if complete, derive
    /// the week's exercises through the progression engine, insert the derived
    /// template and workout, then bump `current_week` guarded by the week the
    /// program was loaded at. A concurrent advance makes the guarded UPDATE
    /// touch zero rows; the whole transaction rolls back with `WeekConflict`
    /// and no week is applied twice.
    pub fn start_next_week(
        &mut self,
        owner: &str,
        program_id: Uuid,
    ) -> Result<StartedWeek, LiftrsError> {
        let tx = self.conn.transaction().map_err(StorageError::from)?;

        let program = Self::program_on(&tx, owner, program_id)?;
        let template = Self::template_on(&tx, owner, program.template_id)?;

        let week = program.current_week;
        let advanced = program.clone().advance_week()?;

        let exercises = ProgressionCalculator::build_progressed_exercises(
            &template.exercises,
            &program.rules,
            week,
        );

        let derived = StoredTemplate {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: format!("{} week {}", program.name, week),
            exercises,
            created_at: Utc::now(),
        };
        Self::insert_template_on(&tx, &derived)?;

        let workout = StoredWorkout {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            template_id: derived.id,
            name: derived.name.clone(),
            week,
            exercises: derived.exercises.clone(),
            created_at: derived.created_at,
        };
        Self::insert_workout_on(&tx, &workout)?;

        let rows = tx
            .execute(
                r#"
                UPDATE custom_programs
                SET current_week = ?1, updated_at = ?2
                WHERE id = ?3 AND owner = ?4 AND current_week = ?5
                "#,
                params![
                    advanced.current_week,
                    advanced.updated_at.to_rfc3339(),
                    program.id.to_string(),
                    owner,
                    week,
                ],
            )
            .map_err(StorageError::from)?;
        if rows == 0 {
            return Err(StorageError::WeekConflict {
                program_id: program.id.to_string(),
            }
            .into());
        }

        tx.commit().map_err(StorageError::from)?;
        debug!(program = %program.id, week, "started next week");

        Ok(StartedWeek {
            week,
            template_id: derived.id,
            workout_id: workout.id,
        })
    }

    /// Rewind a custom program to week 1. Stored workouts are kept.
    pub fn reset_program(
        &mut self,
        owner: &str,
        program_id: Uuid,
    ) -> Result<CustomProgram, StorageError> {
        let rows = self.conn.execute(
            "UPDATE custom_programs SET current_week = 1, updated_at = ?1 WHERE id = ?2 AND owner = ?3",
            params![Utc::now().to_rfc3339(), program_id.to_string(), owner],
        )?;
        if rows == 0 {
            return Err(StorageError::NotFound {
                entity: "program".to_string(),
                id: program_id.to_string(),
            });
        }
        Self::program_on(&self.conn, owner, program_id)
    }

    /// Most recently generated workouts, newest first
    pub fn recent_workouts(&self, owner: &str, limit: u32) -> Result<Vec<StoredWorkout>, StorageError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, owner, template_id, name, week, exercises_json, created_at
            FROM workouts
            WHERE owner = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![owner, limit], workout_row)?;

        let mut workouts = Vec::new();
        for row in rows {
            workouts.push(workout_from_parts(row?)?);
        }
        Ok(workouts)
    }

    /// Record a bodyweight entry; a second entry on the same day replaces it
    pub fn log_bodyweight(
        &mut self,
        owner: &str,
        date: NaiveDate,
        weight: Decimal,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO bodyweight_log (owner, date, weight) VALUES (?1, ?2, ?3)",
            params![owner, date.to_string(), weight.to_string()],
        )?;
        Ok(())
    }

    /// The most recent bodyweight entries in chronological order
    pub fn bodyweight_history(
        &self,
        owner: &str,
        limit: u32,
    ) -> Result<Vec<BodyweightEntry>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, weight FROM bodyweight_log WHERE owner = ?1 ORDER BY date DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![owner, limit], |row| {
            Ok((row.get::<_, String>("date")?, row.get::<_, String>("weight")?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (date, weight) = row?;
            entries.push(BodyweightEntry {
                date: parse_date(&date)?,
                weight: parse_decimal(&weight)?,
            });
        }
        entries.reverse();
        Ok(entries)
    }

    /// Assign the owner to a catalog program starting at week 1, replacing
    /// any previous assignment
    pub fn assign_program(
        &mut self,
        owner: &str,
        program_key: &str,
    ) -> Result<ProgramAssignment, StorageError> {
        let assignment = ProgramAssignment::new(owner, program_key);
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO assignments (owner, program_key, current_week, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                assignment.owner,
                assignment.program_key,
                assignment.current_week,
                assignment.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(assignment)
    }

    pub fn load_assignment(&self, owner: &str) -> Result<Option<ProgramAssignment>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT owner, program_key, current_week, updated_at FROM assignments WHERE owner = ?1",
                params![owner],
                |row| {
                    Ok((
                        row.get::<_, String>("owner")?,
                        row.get::<_, String>("program_key")?,
                        row.get::<_, u32>("current_week")?,
                        row.get::<_, String>("updated_at")?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((owner, program_key, current_week, updated_at)) => Ok(Some(ProgramAssignment {
                owner,
                program_key,
                current_week,
                updated_at: parse_timestamp(&updated_at)?,
            })),
            None => Ok(None),
        }
    }

    /// Advance the owner's catalog assignment by one week, wrapping at the
    /// end of the program's cycle
    pub fn advance_assignment(
        &mut self,
        owner: &str,
        cycle_weeks: u32,
    ) -> Result<ProgramAssignment, StorageError> {
        let assignment = self
            .load_assignment(owner)?
            .ok_or_else(|| StorageError::NotFound {
                entity: "assignment".to_string(),
                id: owner.to_string(),
            })?;
        let advanced = assignment.advance(cycle_weeks);
        self.conn.execute(
            "UPDATE assignments SET current_week = ?1, updated_at = ?2 WHERE owner = ?3",
            params![
                advanced.current_week,
                advanced.updated_at.to_rfc3339(),
                advanced.owner,
            ],
        )?;
        Ok(advanced)
    }

    fn insert_template_on(conn: &Connection, template: &StoredTemplate) -> Result<(), StorageError> {
        let exercises_json = serde_json::to_string(&template.exercises).map_err(json_err)?;
        conn.execute(
            r#"
            INSERT INTO templates (id, owner, name, exercises_json, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                template.id.to_string(),
                template.owner,
                template.name,
                exercises_json,
                template.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn insert_workout_on(conn: &Connection, workout: &StoredWorkout) -> Result<(), StorageError> {
        let exercises_json = serde_json::to_string(&workout.exercises).map_err(json_err)?;
        conn.execute(
            r#"
            INSERT INTO workouts (id, owner, template_id, name, week, exercises_json, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                workout.id.to_string(),
                workout.owner,
                workout.template_id.to_string(),
                workout.name,
                workout.week,
                exercises_json,
                workout.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn template_on(conn: &Connection, owner: &str, id: Uuid) -> Result<StoredTemplate, StorageError> {
        let row = conn
            .query_row(
                r#"
                SELECT id, owner, name, exercises_json, created_at
                FROM templates
                WHERE id = ?1 AND owner = ?2
                "#,
                params![id.to_string(), owner],
                |row| {
                    Ok((
                        row.get::<_, String>("id")?,
                        row.get::<_, String>("owner")?,
                        row.get::<_, String>("name")?,
                        row.get::<_, String>("exercises_json")?,
                        row.get::<_, String>("created_at")?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, owner, name, exercises_json, created_at)) => Ok(StoredTemplate {
                id: parse_uuid(&id)?,
                owner,
                name,
                exercises: parse_exercises(&exercises_json)?,
                created_at: parse_timestamp(&created_at)?,
            }),
            None => Err(StorageError::NotFound {
                entity: "template".to_string(),
                id: id.to_string(),
            }),
        }
    }

    fn program_on(conn: &Connection, owner: &str, id: Uuid) -> Result<CustomProgram, StorageError> {
        let row = conn
            .query_row(
                r#"
                SELECT id, owner, template_id, name, weeks, current_week, rules_json, created_at, updated_at
                FROM custom_programs
                WHERE id = ?1 AND owner = ?2
                "#,
                params![id.to_string(), owner],
                program_row,
            )
            .optional()?;

        match row {
            Some(parts) => program_from_parts(parts),
            None => Err(StorageError::NotFound {
                entity: "program".to_string(),
                id: id.to_string(),
            }),
        }
    }
}

type ProgramParts = (
    String,
    String,
    String,
    String,
    u32,
    u32,
    String,
    String,
    String,
);

fn program_row(row: &rusqlite::Row) -> rusqlite::Result<ProgramParts> {
    Ok((
        row.get("id")?,
        row.get("owner")?,
        row.get("template_id")?,
        row.get("name")?,
        row.get("weeks")?,
        row.get("current_week")?,
        row.get("rules_json")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}

fn program_from_parts(parts: ProgramParts) -> Result<CustomProgram, StorageError> {
    let (id, owner, template_id, name, weeks, current_week, rules_json, created_at, updated_at) =
        parts;
    Ok(CustomProgram {
        id: parse_uuid(&id)?,
        owner,
        template_id: parse_uuid(&template_id)?,
        name,
        length: ProgramLength::try_from(weeks).map_err(StorageError::Serialization)?,
        current_week,
        rules: serde_json::from_str(&rules_json).map_err(json_err)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

type WorkoutParts = (String, String, String, String, u32, String, String);

fn workout_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutParts> {
    Ok((
        row.get("id")?,
        row.get("owner")?,
        row.get("template_id")?,
        row.get("name")?,
        row.get("week")?,
        row.get("exercises_json")?,
        row.get("created_at")?,
    ))
}

fn workout_from_parts(parts: WorkoutParts) -> Result<StoredWorkout, StorageError> {
    let (id, owner, template_id, name, week, exercises_json, created_at) = parts;
    Ok(StoredWorkout {
        id: parse_uuid(&id)?,
        owner,
        template_id: parse_uuid(&template_id)?,
        name,
        week,
        exercises: parse_exercises(&exercises_json)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn json_err(e: serde_json::Error) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn parse_uuid(raw: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(raw).map_err(|e| StorageError::Serialization(format!("bad uuid {:?}: {}", raw, e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization(format!("bad timestamp {:?}: {}", raw, e)))
}

fn parse_date(raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| StorageError::Serialization(format!("bad date {:?}: {}", raw, e)))
}

fn parse_decimal(raw: &str) -> Result<Decimal, StorageError> {
    raw.parse()
        .map_err(|e| StorageError::Serialization(format!("bad decimal {:?}: {}", raw, e)))
}

fn parse_exercises(raw: &str) -> Result<Vec<TemplateExercise>, StorageError> {
    serde_json::from_str(raw).map_err(json_err)
}
