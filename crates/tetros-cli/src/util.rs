use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    num::NonZero,
    path::{Path, PathBuf},
    thread,
};

use anyhow::Context;
use log::info;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        info!("writing results to {}", output.display_path());
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!("Failed to write newline after JSON to {}", self.display_path())
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!("Failed to parse {} JSON file: {}", file_kind, path.display())
    })?;

    Ok(value)
}

/// Directory that relative paths inside a config file are resolved against.
pub fn config_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZero::get)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use tetros_engine::GameSeed;

    use super::*;

    #[test]
    fn test_output_targets() {
        assert_eq!(Output::from_output_path(None).unwrap().display_path(), "stdout");

        let path = env::temp_dir().join(format!("tetros-output-{}.json", process::id()));
        let seed = GameSeed::from_u64(42);
        Output::save_json(&seed, Some(path.clone())).unwrap();
        let back: GameSeed = read_json_file("seed", &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(back, seed);

        let err = read_json_file::<GameSeed, _>("seed", &path).unwrap_err();
        assert!(err.to_string().contains("Failed to open seed file"), "{err}");
    }

    #[test]
    fn test_config_dir() {
        assert_eq!(config_dir(Path::new("demos/game.json")), Path::new("demos"));
        assert_eq!(config_dir(Path::new("game.json")), Path::new(""));
        assert!(default_workers() >= 1);
    }
}
