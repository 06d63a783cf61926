//! Scripted stub engine implementing the capability traits.
//!
//! Tests share one `StubState` handle with the engine they hand to the
//! connection, so they can script step outcomes and inspect exactly which
//! primitives were invoked.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use sqlite_typed::{EngineConnection, EngineStatement, SqliteTypedError, Step};

/// One scripted outcome for a `step` call.
#[derive(Debug, Clone)]
pub enum StepScript {
    Row,
    Done,
    Busy,
    Fail(String),
}

/// A value recorded by a stub bind call.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Int(i32),
    Int64(i64),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct StubState {
    /// Outcomes consumed per `step`; once exhausted, steps return `Done`.
    pub step_script: VecDeque<StepScript>,
    /// SQL passed to `exec_raw`, in call order (BEGIN/COMMIT/ROLLBACK etc.).
    pub raw_sql: Vec<String>,
    /// `exec_raw` payloads that should fail.
    pub fail_raw_sql: Vec<String>,
    /// When set, `prepare` fails with this message.
    pub fail_prepare: Option<String>,
    /// 1-based reset call numbers that should report failure.
    pub fail_reset_calls: Vec<usize>,
    /// Canned values served to column reads of the current row.
    pub row: Vec<Bound>,
    /// Recorded `(ordinal, value)` pairs from bind calls.
    pub binds: Vec<(usize, Bound)>,
    /// Column ordinals read, in call order.
    pub column_reads: Vec<usize>,
    /// Total-changes counter; bumped by `changes_per_done` on each `Done`.
    pub total_changes: u64,
    pub changes_per_done: u64,
    pub prepares: usize,
    pub steps: usize,
    pub resets: usize,
}

pub type SharedState = Rc<RefCell<StubState>>;

pub fn shared_state() -> SharedState {
    Rc::new(RefCell::new(StubState::default()))
}

pub struct StubEngine {
    state: SharedState,
}

impl StubEngine {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl EngineConnection for StubEngine {
    type Statement<'conn>
        = StubStatement
    where
        Self: 'conn;

    fn prepare(&self, _sql: &str) -> Result<Self::Statement<'_>, SqliteTypedError> {
        let mut state = self.state.borrow_mut();
        state.prepares += 1;
        if let Some(message) = &state.fail_prepare {
            return Err(SqliteTypedError::PrepareError(message.clone()));
        }
        Ok(StubStatement {
            state: Rc::clone(&self.state),
        })
    }

    fn exec_raw(&self, sql: &str) -> Result<(), SqliteTypedError> {
        let mut state = self.state.borrow_mut();
        state.raw_sql.push(sql.to_owned());
        if state.fail_raw_sql.iter().any(|s| s == sql) {
            return Err(SqliteTypedError::ExecutionError(format!(
                "scripted failure for {sql}"
            )));
        }
        Ok(())
    }

    fn total_changes(&self) -> u64 {
        self.state.borrow().total_changes
    }
}

pub struct StubStatement {
    state: SharedState,
}

impl StubStatement {
    fn record_bind(&mut self, ordinal: usize, value: Bound) -> Result<(), SqliteTypedError> {
        self.state.borrow_mut().binds.push((ordinal, value));
        Ok(())
    }

    fn read(&self, col: usize) -> Option<Bound> {
        let mut state = self.state.borrow_mut();
        state.column_reads.push(col);
        state.row.get(col).cloned()
    }
}

impl EngineStatement for StubStatement {
    fn bind_int(&mut self, ordinal: usize, value: i32) -> Result<(), SqliteTypedError> {
        self.record_bind(ordinal, Bound::Int(value))
    }

    fn bind_int64(&mut self, ordinal: usize, value: i64) -> Result<(), SqliteTypedError> {
        self.record_bind(ordinal, Bound::Int64(value))
    }

    fn bind_double(&mut self, ordinal: usize, value: f64) -> Result<(), SqliteTypedError> {
        self.record_bind(ordinal, Bound::Double(value))
    }

    fn bind_text(&mut self, ordinal: usize, value: &str) -> Result<(), SqliteTypedError> {
        self.record_bind(ordinal, Bound::Text(value.to_owned()))
    }

    fn bind_blob(&mut self, ordinal: usize, value: &[u8]) -> Result<(), SqliteTypedError> {
        self.record_bind(ordinal, Bound::Blob(value.to_vec()))
    }

    fn step(&mut self) -> Result<Step, SqliteTypedError> {
        let mut state = self.state.borrow_mut();
        state.steps += 1;
        match state.step_script.pop_front() {
            Some(StepScript::Row) => Ok(Step::Row),
            Some(StepScript::Busy) => Ok(Step::Busy),
            Some(StepScript::Fail(message)) => Err(SqliteTypedError::ExecutionError(message)),
            Some(StepScript::Done) | None => {
                state.total_changes += state.changes_per_done;
                Ok(Step::Done)
            }
        }
    }

    fn reset(&mut self) -> bool {
        let mut state = self.state.borrow_mut();
        state.resets += 1;
        let call = state.resets;
        !state.fail_reset_calls.contains(&call)
    }

    fn column_int(&self, col: usize) -> i32 {
        match self.read(col) {
            Some(Bound::Int(v)) => v,
            _ => 0,
        }
    }

    fn column_int64(&self, col: usize) -> i64 {
        match self.read(col) {
            Some(Bound::Int64(v)) => v,
            _ => 0,
        }
    }

    fn column_double(&self, col: usize) -> f64 {
        match self.read(col) {
            Some(Bound::Double(v)) => v,
            _ => 0.0,
        }
    }

    fn column_text(&self, col: usize) -> String {
        match self.read(col) {
            Some(Bound::Text(v)) => v,
            _ => String::new(),
        }
    }

    fn column_blob(&self, col: usize) -> Vec<u8> {
        match self.read(col) {
            Some(Bound::Blob(v)) => v,
            _ => Vec::new(),
        }
    }
}
