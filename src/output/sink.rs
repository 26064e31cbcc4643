//! Scoped output sink: a buffered file or standard output.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Where encoded bytes go. The underlying file is closed when the sink is
/// dropped, whichever way the pipeline exits.
pub enum OutputSink {
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Stdout(BufWriter<Stdout>),
}

impl OutputSink {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "Opened output file");
        Ok(Self::File {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Standard output, unless it is a terminal.
    pub fn stdout() -> Result<Self> {
        Self::stdout_if_redirected(atty::is(atty::Stream::Stdout))
    }

    /// Standard output. Image bytes are never written to a terminal.
    pub fn stdout_if_redirected(is_terminal: bool) -> Result<Self> {
        if is_terminal {
            return Err(Error::NoOutputTarget);
        }
        Ok(Self::Stdout(BufWriter::new(io::stdout())))
    }

    /// A file sink for `Some(path)`, standard output for `None`.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::create(path),
            None => Self::stdout(),
        }
    }

    /// The output file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Stdout(_) => None,
        }
    }

    /// Flush buffered bytes and close the sink.
    pub fn finish(mut self) -> Result<()> {
        self.flush()?;
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File { writer, .. } => writer.write(buf),
            Self::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File { writer, .. } => writer.flush(),
            Self::Stdout(writer) => writer.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn terminal_stdout_is_rejected() {
        assert!(matches!(
            OutputSink::stdout_if_redirected(true),
            Err(Error::NoOutputTarget)
        ));
    }

    #[test]
    fn redirected_stdout_is_accepted() {
        let sink = OutputSink::stdout_if_redirected(false).unwrap();
        assert!(sink.path().is_none());
    }

    #[test]
    fn file_sink_writes_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut sink = OutputSink::open(Some(&path)).unwrap();
        assert_eq!(sink.path(), Some(path.as_path()));
        sink.write_all(b"bytes").unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn dropped_sink_still_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");
        {
            let mut sink = OutputSink::create(&path).unwrap();
            sink.write_all(b"GIF89a").unwrap();
        }
        assert_eq!(fs::read(&path).unwrap(), b"GIF89a");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = OutputSink::create(&dir.path().join("no/such/dir/out.png"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
