//! Emission sinks for generated sources.
//!
//! A [`Filer`] hands out one writer per output. Nothing becomes visible until
//! the writer's [`SourceWriter::finish`] succeeds; a writer dropped early
//! leaves no output behind.

use crate::provenance::Provenance;
use aptgen_decl::utils::source_path;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

pub trait SourceWriter: Write {
    /// Commit the output.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

pub trait Filer {
    /// Open a writer for `qualified_name`, associating `provenance` with it
    /// for invalidation. Each name may be created once per filer.
    fn create_source(
        &mut self,
        qualified_name: &str,
        provenance: &Provenance,
    ) -> io::Result<Box<dyn SourceWriter + '_>>;
}

fn already_created(qualified_name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("attempt to recreate a file for type {}", qualified_name),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOutput {
    pub text: String,
    pub provenance: Provenance,
}

/// Keeps committed outputs in memory.
#[derive(Debug, Default)]
pub struct MemoryFiler {
    created: HashSet<String>,
    outputs: BTreeMap<String, MemoryOutput>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&MemoryOutput> {
        self.outputs.get(qualified_name)
    }

    pub fn outputs(&self) -> &BTreeMap<String, MemoryOutput> {
        &self.outputs
    }
}

struct MemoryWriter<'a> {
    outputs: &'a mut BTreeMap<String, MemoryOutput>,
    name: String,
    provenance: Provenance,
    buffer: Vec<u8>,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SourceWriter for MemoryWriter<'_> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let this = *self;
        let text = String::from_utf8(this.buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        this.outputs.insert(
            this.name,
            MemoryOutput {
                text,
                provenance: this.provenance,
            },
        );
        Ok(())
    }
}

impl Filer for MemoryFiler {
    fn create_source(
        &mut self,
        qualified_name: &str,
        provenance: &Provenance,
    ) -> io::Result<Box<dyn SourceWriter + '_>> {
        if !self.created.insert(qualified_name.to_string()) {
            return Err(already_created(qualified_name));
        }
        Ok(Box::new(MemoryWriter {
            outputs: &mut self.outputs,
            name: qualified_name.to_string(),
            provenance: provenance.clone(),
            buffer: Vec::new(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsOutput {
    pub path: PathBuf,
    pub provenance: Provenance,
}

/// Writes sources under a root directory, one file per qualified name,
/// through a temporary file renamed into place on commit.
#[derive(Debug)]
pub struct FsFiler {
    root: PathBuf,
    extension: String,
    created: HashSet<String>,
    outputs: BTreeMap<String, FsOutput>,
}

impl FsFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "java".to_string(),
            created: HashSet::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        self.root.join(source_path(qualified_name, &self.extension))
    }

    /// Outputs committed so far, by qualified name.
    pub fn outputs(&self) -> &BTreeMap<String, FsOutput> {
        &self.outputs
    }
}

struct FsWriter<'a> {
    outputs: &'a mut BTreeMap<String, FsOutput>,
    name: String,
    provenance: Provenance,
    path: PathBuf,
    tmp_path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FsWriter<'_> {
    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "writer already finished"))
    }

    fn commit(&mut self) -> io::Result<()> {
        let file = self
            .file
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "writer already finished"))?;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.tmp_path, &self.path)?;
        self.outputs.insert(
            self.name.clone(),
            FsOutput {
                path: self.path.clone(),
                provenance: std::mem::take(&mut self.provenance),
            },
        );
        Ok(())
    }
}

impl Write for FsWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}

impl SourceWriter for FsWriter<'_> {
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        let result = self.commit();
        if result.is_err() {
            let _ = fs::remove_file(&self.tmp_path);
        }
        result
    }
}

impl Drop for FsWriter<'_> {
    fn drop(&mut self) {
        if self.file.take().is_some() {
            tracing::debug!(output = %self.name, "abandoning unfinished output");
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

impl Filer for FsFiler {
    fn create_source(
        &mut self,
        qualified_name: &str,
        provenance: &Provenance,
    ) -> io::Result<Box<dyn SourceWriter + '_>> {
        if self.created.contains(qualified_name) {
            return Err(already_created(qualified_name));
        }

        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        let file = File::create(&tmp_path)?;

        self.created.insert(qualified_name.to_string());
        Ok(Box::new(FsWriter {
            outputs: &mut self.outputs,
            name: qualified_name.to_string(),
            provenance: provenance.clone(),
            path,
            tmp_path,
            file: Some(BufWriter::new(file)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptgen_decl::DeclId;

    fn provenance() -> Provenance {
        [DeclId::new("app.Thing1")].into_iter().collect()
    }

    #[test]
    fn test_memory_filer_commits_on_finish() {
        let mut filer = MemoryFiler::new();
        let mut writer = filer.create_source("app.App_Impl", &provenance()).unwrap();
        writer.write_all(b"class X {}\n").unwrap();
        writer.finish().unwrap();

        let output = filer.get("app.App_Impl").unwrap();
        assert_eq!(output.text, "class X {}\n");
        assert_eq!(output.provenance, provenance());
    }

    #[test]
    fn test_memory_filer_abandons_dropped_writer() {
        let mut filer = MemoryFiler::new();
        {
            let mut writer = filer.create_source("app.App_Impl", &Provenance::new()).unwrap();
            writer.write_all(b"partial").unwrap();
        }
        assert!(filer.get("app.App_Impl").is_none());
    }

    #[test]
    fn test_filers_reject_recreation() {
        let mut filer = MemoryFiler::new();
        filer
            .create_source("app.App_Impl", &Provenance::new())
            .unwrap()
            .finish()
            .unwrap();
        let err = filer
            .create_source("app.App_Impl", &Provenance::new())
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_fs_filer_writes_under_package_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut filer = FsFiler::new(dir.path());
        let mut writer = filer.create_source("app.App_Impl", &provenance()).unwrap();
        writer.write_all(b"package app;\n").unwrap();
        writer.finish().unwrap();

        let path = dir.path().join("app/App_Impl.java");
        assert_eq!(fs::read_to_string(&path).unwrap(), "package app;\n");
        assert!(!dir.path().join("app/App_Impl.java.tmp").exists());
        assert_eq!(filer.outputs()["app.App_Impl"].path, path);
    }

    #[test]
    fn test_fs_filer_abandoned_writer_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut filer = FsFiler::new(dir.path());
        {
            let mut writer = filer.create_source("app.App_Impl", &provenance()).unwrap();
            writer.write_all(b"package app;\n").unwrap();
        }
        assert!(!dir.path().join("app/App_Impl.java").exists());
        assert!(!dir.path().join("app/App_Impl.java.tmp").exists());
        assert!(filer.outputs().is_empty());
    }
}
