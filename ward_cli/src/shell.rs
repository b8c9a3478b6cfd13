//! Numbered text menu over a line-oriented reader and writer.

use std::io::{BufRead, Write};
use std::str::FromStr;
use ward_core::*;

const MENU: &str = "
===== WARD REGISTRY =====
1. Admit Normal Patient
2. Admit Emergency Patient
3. Discharge Patient
4. Search Patient by ID
5. Undo
6. Redo
7. Display Discharged Patients (by ID)
8. Display Archive (newest first)
9. Sort Waiting Patients
0. Exit";

/// Outcome of reading a field from the user
enum Field<T> {
    Value(T),
    Invalid(String),
    Eof,
}

pub struct Shell<R, W> {
    input: R,
    out: W,
    scheduler: AdmissionScheduler,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, scheduler: AdmissionScheduler) -> Self {
        Self {
            input,
            out,
            scheduler,
        }
    }

    /// Run the menu until `0` or end of input, handing back the registry
    pub fn run(mut self) -> Result<AdmissionScheduler> {
        loop {
            writeln!(self.out, "{}", MENU)?;
            let choice = match self.prompt("Enter choice: ")? {
                Some(line) => line,
                None => break,
            };

            let keep_going = match choice.as_str() {
                "1" => self.admit(Priority::Normal)?,
                "2" => self.admit(Priority::Emergency)?,
                "3" => self.discharge()?,
                "4" => self.search()?,
                "5" => self.undo()?,
                "6" => self.redo()?,
                "7" => self.show_discharged()?,
                "8" => self.show_archive()?,
                "9" => self.sort_waiting()?,
                "0" => false,
                other => {
                    writeln!(self.out, "Invalid choice: {}", other)?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.out.flush()?;
        Ok(self.scheduler)
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        // Raw bytes so a stray non-UTF-8 byte can't end the session
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> Result<Field<T>> {
        Ok(match self.prompt(label)? {
            None => Field::Eof,
            Some(line) => match line.parse() {
                Ok(value) => Field::Value(value),
                Err(_) => Field::Invalid(line),
            },
        })
    }

    fn admit(&mut self, priority: Priority) -> Result<bool> {
        let id: PatientId = match self.prompt_parsed("Enter ID: ")? {
            Field::Value(id) => id,
            Field::Invalid(raw) => return self.invalid_number(&raw),
            Field::Eof => return Ok(false),
        };
        let name = match self.prompt("Enter Name: ")? {
            Some(name) => name,
            None => return Ok(false),
        };
        let severity: Severity = match self.prompt_parsed("Enter Severity (1-10): ")? {
            Field::Value(severity) => severity,
            Field::Invalid(raw) => return self.invalid_number(&raw),
            Field::Eof => return Ok(false),
        };
        let department = match self.prompt("Enter Department: ")? {
            Some(department) => department,
            None => return Ok(false),
        };

        self.scheduler
            .admit(PatientIntake::new(id, name, severity, department), priority);

        match priority {
            Priority::Emergency => writeln!(self.out, "Emergency patient admitted!")?,
            Priority::Normal => writeln!(self.out, "Patient admitted normally.")?,
        }
        Ok(true)
    }

    fn discharge(&mut self) -> Result<bool> {
        match self.scheduler.discharge() {
            Ok(record) => {
                writeln!(self.out, "Patient discharged & archived.")?;
                writeln!(self.out, "  ID: {} Name: {}", record.id, record.name)?;
            }
            Err(Error::EmptyRegistry) => writeln!(self.out, "No patients to discharge.")?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn search(&mut self) -> Result<bool> {
        let id: PatientId = match self.prompt_parsed("Enter ID to search: ")? {
            Field::Value(id) => id,
            Field::Invalid(raw) => return self.invalid_number(&raw),
            Field::Eof => return Ok(false),
        };

        match self.scheduler.find_by_id(id) {
            Ok(record) => writeln!(
                self.out,
                "Found: {} Severity: {}",
                record.name, record.severity
            )?,
            Err(Error::NotFound(_)) => writeln!(self.out, "Patient not found.")?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn undo(&mut self) -> Result<bool> {
        match self.scheduler.undo() {
            Ok(op) => {
                let kind = op.kind;
                writeln!(self.out, "Undo operation performed: {}", kind)?;
            }
            Err(Error::HistoryEmpty(_)) => writeln!(self.out, "Nothing to undo.")?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn redo(&mut self) -> Result<bool> {
        match self.scheduler.redo() {
            Ok(op) => {
                let kind = op.kind;
                writeln!(self.out, "Redo operation performed: {}", kind)?;
            }
            Err(Error::HistoryEmpty(_)) => writeln!(self.out, "Nothing to redo.")?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn show_discharged(&mut self) -> Result<bool> {
        let mut any = false;
        for record in self.scheduler.discharged() {
            writeln!(self.out, "ID: {} Name: {}", record.id, record.name)?;
            any = true;
        }
        if !any {
            writeln!(self.out, "No discharged patients.")?;
        }
        Ok(true)
    }

    fn show_archive(&mut self) -> Result<bool> {
        if self.scheduler.archive().is_empty() {
            writeln!(self.out, "Archive is empty.")?;
        }
        for record in self.scheduler.archive() {
            writeln!(
                self.out,
                "ID: {} Name: {} Department: {} ({})",
                record.id, record.name, record.department, record.priority
            )?;
        }
        Ok(true)
    }

    fn sort_waiting(&mut self) -> Result<bool> {
        let key: SortKey =
            match self.prompt_parsed("Sort by (1=severity, 2=arrival, 3=department): ")? {
                Field::Value(key) => key,
                Field::Invalid(raw) => {
                    writeln!(self.out, "Invalid sort key: {}", raw)?;
                    return Ok(true);
                }
                Field::Eof => return Ok(false),
            };

        let view = sorted_view(self.scheduler.waiting(), key);
        if view.is_empty() {
            writeln!(self.out, "No patients waiting.")?;
        }
        for record in view {
            writeln!(
                self.out,
                "ID: {} Name: {} Severity: {} Department: {} Arrival: {}",
                record.id, record.name, record.severity, record.department, record.arrival_time
            )?;
        }
        Ok(true)
    }

    fn invalid_number(&mut self, raw: &str) -> Result<bool> {
        tracing::debug!("Rejected non-numeric input {:?}", raw);
        writeln!(self.out, "Invalid number: {}", raw)?;
        Ok(true)
    }
}
