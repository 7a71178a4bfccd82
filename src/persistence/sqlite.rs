use super::{PersistenceResult, ScheduleStore};
use crate::metadata::ScheduleMetadata;
use crate::phase::Phase;
use crate::schedule::Schedule;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteScheduleStore {
    connection: Mutex<Connection>,
}

impl SqliteScheduleStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        // Phase order is significant; position is the list index.
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS schedule_metadata (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                metadata_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS phases (
                position INTEGER PRIMARY KEY,
                phase_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_metadata(
        &self,
        tx: &rusqlite::Transaction,
        metadata: &ScheduleMetadata,
    ) -> PersistenceResult<()> {
        let json = serde_json::to_string(metadata)?;
        tx.execute("DELETE FROM schedule_metadata", [])?;
        tx.execute(
            "INSERT INTO schedule_metadata (id, metadata_json) VALUES (1, ?1)",
            params![json],
        )?;
        Ok(())
    }

    fn save_phases(&self, tx: &rusqlite::Transaction, schedule: &Schedule) -> PersistenceResult<()> {
        tx.execute("DELETE FROM phases", [])?;
        let mut stmt = tx.prepare("INSERT INTO phases (position, phase_json) VALUES (?1, ?2)")?;
        for (position, phase) in schedule.phases().iter().enumerate() {
            let json = serde_json::to_string(phase)?;
            stmt.execute(params![position as i64, json])?;
        }
        Ok(())
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn save_schedule(&self, schedule: &Schedule) -> PersistenceResult<()> {
        super::validate_schedule(schedule)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        self.save_metadata(&tx, schedule.metadata())?;
        self.save_phases(&tx, schedule)?;
        tx.commit()?;
        Ok(())
    }

    fn load_schedule(&self) -> PersistenceResult<Option<Schedule>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT metadata_json FROM schedule_metadata WHERE id = 1")?;
        let metadata_json_opt: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(metadata_json) = metadata_json_opt else {
            return Ok(None);
        };

        let metadata: ScheduleMetadata = serde_json::from_str(&metadata_json)?;

        let mut stmt = conn.prepare("SELECT phase_json FROM phases ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut phases = Vec::new();
        for json in rows {
            let json = json?;
            let phase: Phase = serde_json::from_str(&json)?;
            phases.push(phase);
        }

        super::validate_phases(&phases)?;

        Ok(Some(Schedule::from_parts(metadata, phases)))
    }
}
