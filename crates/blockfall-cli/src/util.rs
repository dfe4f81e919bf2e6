use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use blockfall_engine::EngineConfig;
use serde::Serialize;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let (writer, target): (Box<dyn Write>, _) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };
    write_json_to(writer, value).with_context(|| format!("Failed to write JSON to {target}"))
}

fn write_json_to<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads an engine configuration from a JSON file.
///
/// Missing fields take their default values; unknown fields are rejected.
pub fn read_engine_config_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open engine config file: {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse engine config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_json_ends_with_newline() {
        let mut out = Vec::new();
        write_json_to(&mut out, &[1, 2]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn test_config_file_roundtrip() {
        let path = env::temp_dir().join(format!("blockfall-config-{}.json", process::id()));
        let config = EngineConfig {
            board_width: 12,
            ..EngineConfig::default()
        };
        write_json(&config, Some(&path)).unwrap();
        let loaded = read_engine_config_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_missing_config_file_names_path() {
        let err = read_engine_config_file(Path::new("/nonexistent/blockfall.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/blockfall.json"));
    }
}
