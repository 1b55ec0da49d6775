// src/logger/report.rs
//! Stage report logging: pipeline.log plus metrics.csv

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Appends human-readable stage summaries to pipeline.log
pub struct PipelineLogger {
    file: File,
    start_time: Instant,
}

impl PipelineLogger {
    pub fn new(output_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        let log_path = output_dir.join("pipeline.log");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            file,
            start_time: Instant::now(),
        })
    }

    /// Log a stage summary line
    pub fn log_stage(&mut self, stage: &str, summary: &str) {
        let elapsed = self.start_time.elapsed().as_secs();
        let line = format!("[{:>6}s] {} | {}\n", elapsed, stage.to_uppercase(), summary);
        let _ = self.file.write_all(line.as_bytes());
        let _ = self.file.flush();
    }

    /// Log a generic message
    pub fn log_message(&mut self, msg: &str) {
        let elapsed = self.start_time.elapsed().as_secs();
        let line = format!("[{:>6}s] {}\n", elapsed, msg);
        let _ = self.file.write_all(line.as_bytes());
        let _ = self.file.flush();
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// CSV of per-stage counters for later analysis
pub struct StageCsv {
    file: File,
}

impl StageCsv {
    const HEADER: &'static str = "stage,files_in,files_ok,files_failed,tokens,secs";

    /// Opens (or creates) metrics.csv for append, writing the header once
    pub fn open_append(output_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join("metrics.csv");

        let needs_header = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        if needs_header {
            writeln!(file, "{}", Self::HEADER)?;
        }

        Ok(Self { file })
    }

    /// Record one stage's counters
    pub fn record(
        &mut self,
        stage: &str,
        files_in: usize,
        files_ok: usize,
        files_failed: usize,
        tokens: usize,
        secs: u64,
    ) {
        let _ = writeln!(
            self.file,
            "{},{},{},{},{},{}",
            stage, files_in, files_ok, files_failed, tokens, secs
        );
        let _ = self.file.flush();
    }
}
