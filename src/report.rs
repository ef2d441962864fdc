//! Run reporting and snapshot persistence.
//!
//! The engine emits progress through two sinks: an append-only
//! [`ReportSink`] on the reporting cadence, and a [`SnapshotSink`] on a
//! slower cadence that persists the best individual's rendering.
//! Snapshot failures are logged and the run continues; the fitness
//! trajectory matters more than any single artifact.

use crate::error::EvoError;
use crate::fitness::Rasterizer;
use crate::genome::Polygon;
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Timestamp format used in snapshot file names.
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// One progress record per reporting interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRecord {
    /// Scheduler's current polygon count.
    pub complexity: usize,
    /// Generation counter.
    pub generation: u64,
    /// Best fitness in the run so far.
    pub best_fitness: f64,
}

/// Append-only progress log.
pub trait ReportSink {
    fn report(&mut self, record: &ReportRecord) -> Result<(), EvoError>;
}

/// Persists the best individual's rendering on the snapshot cadence.
pub trait SnapshotSink {
    /// Writes one snapshot and returns the path of the artifact.
    fn save(
        &mut self,
        polygons: &[Polygon],
        generation: u64,
        fitness: f64,
    ) -> Result<PathBuf, EvoError>;
}

/// Report writer producing a comma-delimited file plus a console line.
///
/// File lines are `complexity , generation , fitness`; the console line
/// carries the wall-clock delta since the previous report.
pub struct FileReport {
    writer: BufWriter<File>,
    last_report: Instant,
}

impl FileReport {
    /// Creates (truncating) the report file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, EvoError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_report: Instant::now(),
        })
    }
}

impl ReportSink for FileReport {
    fn report(&mut self, record: &ReportRecord) -> Result<(), EvoError> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_report);
        self.last_report = now;

        println!(
            "Generation: {} - best fitness: {} - time: {:.3}",
            record.generation,
            record.best_fitness,
            elapsed.as_secs_f64()
        );

        writeln!(
            self.writer,
            "{} , {} , {}",
            record.complexity, record.generation, record.best_fitness
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

/// PNG snapshot writer.
///
/// File names are deterministic from the run-start timestamp, the
/// current timestamp, the generation number, and the fitness:
/// `{start}_{now}_gen_{N}_fit_{digits}.png`, where `digits` are the
/// fitness's fractional digits.
pub struct PngSnapshot<R> {
    rasterizer: R,
    width: u32,
    height: u32,
    dir: PathBuf,
    run_start: String,
}

impl<R: Rasterizer> PngSnapshot<R> {
    /// Creates a snapshot writer targeting `dir`, rendering at the
    /// target image's dimensions.
    pub fn new<P: Into<PathBuf>>(rasterizer: R, width: u32, height: u32, dir: P) -> Self {
        Self {
            rasterizer,
            width,
            height,
            dir: dir.into(),
            run_start: Local::now().format(STAMP_FORMAT).to_string(),
        }
    }
}

impl<R: Rasterizer> SnapshotSink for PngSnapshot<R> {
    fn save(
        &mut self,
        polygons: &[Polygon],
        generation: u64,
        fitness: f64,
    ) -> Result<PathBuf, EvoError> {
        let name = format!(
            "{}_{}_gen_{}_fit_{}.png",
            self.run_start,
            Local::now().format(STAMP_FORMAT),
            generation,
            fitness_digits(fitness),
        );
        let path = self.dir.join(name);

        let rgb = self.rasterizer.render(polygons, self.width, self.height);
        let image = image::RgbImage::from_raw(self.width, self.height, rgb)
            .expect("rasterizer output matches the requested dimensions");
        image.save(&path).map_err(|source| EvoError::SnapshotWrite {
            path: path.clone(),
            source,
        })?;

        log::info!("Written {}", path.display());
        Ok(path)
    }
}

/// Fractional digits of a fitness in `[0, 1]`, for file names.
fn fitness_digits(fitness: f64) -> String {
    let formatted = format!("{fitness:.6}");
    formatted
        .split_once('.')
        .map(|(_, frac)| frac.to_string())
        .unwrap_or(formatted)
}

// ============================================================================
// Tests
// ============================================================================
