//! CSV writers

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use knbk_trajectory::PlotSeries;
use log::debug;

use crate::assembly::Assembly;
use crate::error::CsvResult;
use crate::options::{AssemblyFormat, CsvWriteOptions};

/// Append-only CSV file for saved templates and assemblies.
///
/// Every save appends one record; existing records are never rewritten.
/// There is no locking, concurrent writers interleave whole records at best.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    path: PathBuf,
    options: CsvWriteOptions,
}

impl TemplateStore {
    /// Store backed by `path`. The file is created on first append.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_options(path, CsvWriteOptions::default())
    }

    /// Store with explicit write options
    pub fn with_options<P: Into<PathBuf>>(path: P, options: CsvWriteOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record
    pub fn append_row<S: AsRef<str>>(&self, row: &[S]) -> CsvResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .terminator(self.options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(file);

        csv_writer.write_record(row.iter().map(AsRef::<str>::as_ref))?;
        csv_writer.flush()?;
        debug!("appended {} fields to {}", row.len(), self.path.display());
        Ok(())
    }

    /// Append an assembly as `name, composite`
    pub fn append_assembly(&self, assembly: &Assembly, format: &AssemblyFormat) -> CsvResult<()> {
        let composite = assembly.encode(format);
        self.append_row(&[assembly.name.as_str(), composite.as_str()])
    }
}

/// Write a plot series as `x, y, z` records, one per point
pub fn write_series<W: Write>(
    series: &PlotSeries,
    writer: W,
    options: &CsvWriteOptions,
) -> CsvResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(options.line_terminator.to_csv())
        .from_writer(writer);

    if options.write_header {
        csv_writer.write_record(["x", "y", "z"])?;
    }
    let points = series.xs.iter().zip(&series.ys).zip(&series.zs);
    for ((x, y), z) in points {
        csv_writer.write_record(&[x.to_string(), y.to_string(), z.to_string()])?;
    }
    debug!(
        "wrote {} points of series {}",
        series.len(),
        series.name.as_deref().unwrap_or("<unnamed>")
    );

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::AssemblyComponent;
    use crate::options::LineTerminator;
    use knbk_trajectory::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("templates.csv"));

        store.append_row(&["ВЗД", "Д-240", "240"]).unwrap();
        store.append_row(&["Ясс", "ЯГ-172, гидравлический"]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "ВЗД,Д-240,240\nЯсс,\"ЯГ-172, гидравлический\"\n"
        );
    }

    #[test]
    fn test_append_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("assemblies.csv"));
        let assembly = Assembly {
            name: "Секция 1".into(),
            components: vec![
                AssemblyComponent::new("ВЗД", "Д-240"),
                AssemblyComponent::new("УБТ", "УБТ-203"),
            ],
        };

        store
            .append_assembly(&assembly, &AssemblyFormat::default())
            .unwrap();
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Секция 1,ВЗД=Д-240;УБТ=УБТ-203\n");
    }

    #[test]
    fn test_write_series() {
        let mut out = Vec::new();
        let positions = [Position::ORIGIN, Position::new(1.5, -2.0, 30.0)];
        write_series(
            &PlotSeries::from_positions(&positions),
            &mut out,
            &CsvWriteOptions {
                line_terminator: LineTerminator::CRLF,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "x,y,z\r\n0,0,0\r\n1.5,-2,30\r\n"
        );
    }

    #[test]
    fn test_write_series_depth_down() {
        let positions = [Position::ORIGIN, Position::new(1.5, -2.0, 30.0)];
        let series = PlotSeries::from_positions(&positions).depth_down();

        let mut out = Vec::new();
        write_series(
            &series,
            &mut out,
            &CsvWriteOptions {
                write_header: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0,0,-0\n1.5,-2,-30\n");
    }
}
