use crate::io::atomic_write_str;
use crate::paths::{CantorPaths, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// toml_edit para escribir preservando comentarios
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Lee `[section]`; si falta el archivo o la sección devuelve `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;
}

pub struct TomlConfigBackend {
  paths: CantorPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: CantorPaths) -> Self {
    Self { paths }
  }

  pub fn config_file(&self) -> PathBuf {
    self.paths.config_file()
  }

  /// `None` si el archivo todavía no existe.
  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(self.config_file()) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    Ok(Some(toml::from_str::<toml::Table>(&content)?))
  }
}

fn decode_section<T>(section: &str, value: &toml::Value) -> Result<T, ConfigError>
where
  T: DeserializeOwned,
{
  value
    .clone()
    .try_into()
    .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      return Ok(T::default());
    };

    let Some(value) = table.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, value)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.config_file();

    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` normal: "foo = 1\nbar = 2\n", sin cabecera.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    // 3) Reparsear como tabla de toml_edit.
    let section_table = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_table();

    // 4) Reemplazar solo esa sección; el resto del documento queda intacto.
    doc[section] = Item::Table(section_table);

    atomic_write_str(&path, &doc.to_string())?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Sample {
    name: String,
    size: u32,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = CantorPaths::under(tmp.path()).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  #[test]
  fn missing_file_falls_back_to_default() {
    let (_tmp, backend) = backend();

    let loaded: Sample = backend.load_section_with_default("sample").unwrap();
    assert_eq!(loaded, Sample::default());
  }

  #[test]
  fn missing_section_falls_back_to_default() {
    let (_tmp, backend) = backend();
    fs::write(backend.config_file(), "[other]\nkeep = true\n").unwrap();

    let loaded: Sample = backend.load_section_with_default("sample").unwrap();
    assert_eq!(loaded, Sample::default());
  }

  #[test]
  fn save_then_load_section() {
    let (_tmp, backend) = backend();
    let value = Sample { name: "artists".into(), size: 4 };

    backend.save_section("sample", &value).unwrap();

    let loaded: Sample = backend.load_section_with_default("sample").unwrap();
    assert_eq!(loaded, value);
  }

  #[test]
  fn save_keeps_other_sections_and_comments() {
    let (_tmp, backend) = backend();
    fs::write(backend.config_file(), "# mantener\n[other]\nkeep = true\n").unwrap();

    backend.save_section("sample", &Sample { name: "x".into(), size: 1 }).unwrap();

    let content = fs::read_to_string(backend.config_file()).unwrap();
    assert!(content.contains("# mantener"));
    assert!(content.contains("keep = true"));
    assert!(content.contains("[sample]"));
  }

  #[test]
  fn bad_section_type_is_reported() {
    let (_tmp, backend) = backend();
    fs::write(backend.config_file(), "[sample]\nname = 3\nsize = 1\n").unwrap();

    let err = backend.load_section_with_default::<Sample>("sample").unwrap_err();
    assert!(err.to_string().contains("decode section [sample]"));
  }
}
