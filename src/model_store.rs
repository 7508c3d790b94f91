//! Saves and restores trained models.
use log::{debug, info};
use serde::{Serialize, Deserialize};

use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::{Error, Model, Result};


const FORMAT: &str = "costwise-model";
const VERSION: u32 = 1;
const DEFAULT_EXTENSION: &str = "model";


#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'a str,
    version: u32,
    model: &'a Model,
}


#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    model: Model,
}


/// `path` made absolute against the working directory,
/// with `.` and `..` folded away without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let joined = match env::current_dir() {
        Ok(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };

    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => match normal.components().next_back() {
                Some(Component::Normal(_)) => { normal.pop(); },
                Some(Component::RootDir | Component::Prefix(_)) => {},
                _ => normal.push(component),
            },
            other => normal.push(other),
        }
    }
    normal
}


/// Persists a [`Model`] as a versioned JSON document.
///
/// Where a model goes is decided by [`ModelStore::resolve`]:
/// an existing directory receives the default file name,
/// a path with the model extension is used verbatim,
/// and anything else is created as a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStore {
    file_name: String,
    extension: String,
}


impl ModelStore {
    /// A store that writes `file_name` into output directories.
    pub fn new<S: Into<String>>(file_name: S) -> Self {
        Self {
            file_name: file_name.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }


    /// Set the extension (without the leading dot) that marks
    /// a target as a file path. Default is `model`.
    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }


    /// The file name used inside output directories.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }


    fn has_extension(&self, target: &Path) -> bool {
        target.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }


    /// Turn the output target into the absolute, normalized
    /// model file path, creating directories as needed.
    pub fn resolve<P: AsRef<Path>>(&self, target: P) -> Result<PathBuf> {
        let target = normalize(target.as_ref());
        let target = target.as_path();

        if target.is_dir() {
            return Ok(target.join(&self.file_name));
        }

        if self.has_extension(target) {
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .map_err(|e| Error::persistence(parent, e))?;
                }
            }
            return Ok(target.to_path_buf());
        }

        fs::create_dir_all(target)
            .map_err(|e| Error::persistence(target, e))?;
        debug!("created output directory {}", target.display());
        Ok(target.join(&self.file_name))
    }


    /// Write `model` to `path`, overwriting an existing file.
    pub fn save<P: AsRef<Path>>(&self, model: &Model, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::persistence(path, e))?;
        let mut writer = BufWriter::new(file);

        let envelope = EnvelopeRef { format: FORMAT, version: VERSION, model };
        serde_json::to_writer(&mut writer, &envelope)
            .map_err(|e| Error::persistence(path, e))?;
        writer.flush()
            .map_err(|e| Error::persistence(path, e))?;

        info!("model written to {}", path.display());
        Ok(())
    }


    /// Read a model written by [`ModelStore::save`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Model> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::persistence(path, e))?;

        let envelope: Envelope = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::persistence(path, e))?;

        if envelope.format != FORMAT {
            return Err(Error::persistence(
                path, format!("unknown format `{}`", envelope.format)
            ));
        }
        if envelope.version != VERSION {
            return Err(Error::persistence(
                path,
                format!(
                    "unsupported version {} (expected {VERSION})",
                    envelope.version
                ),
            ));
        }
        Ok(envelope.model)
    }
}
