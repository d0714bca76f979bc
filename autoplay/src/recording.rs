use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use quizboard::Step;
use serde::{Deserialize, Serialize};

/// Writes one JSON file per game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    events: Vec<RecordedEvent>,
}

/// Something that happened during a game, stamped with the engine clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Rolled {
        player: String,
        roll: u8,
    },
    Step {
        step: Step,
    },
    GradeSelected {
        grade: String,
        question_id: Option<u32>,
    },
    Answered {
        question_id: u32,
        option: usize,
        correct: bool,
    },
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            events: Vec::new(),
        })
    }

    pub fn store(&mut self, at: Duration, kind: EventKind) {
        self.events.push(RecordedEvent {
            at_ms: at.as_millis() as u64,
            kind,
        });
    }

    /// Writes the events stored since the last call and starts a new game file.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &std::mem::take(&mut self.events))?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}
