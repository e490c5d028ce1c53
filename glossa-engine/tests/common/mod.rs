//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use glossa_core::{CommonWords, NgramProfile};
use glossa_engine::{ClassifierProcess, LanguageDetectorBuilder, ProcessSpawner};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn data_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../data").join(name)
}

/// Profiles trained from the bundled seed corpus
pub fn seed_profiles() -> Vec<NgramProfile> {
    let mut paths: Vec<PathBuf> = fs::read_dir(data_dir("seed-corpus"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|path| {
            let code = path.file_stem().unwrap().to_str().unwrap();
            NgramProfile::train(code, &fs::read_to_string(path).unwrap())
        })
        .collect()
}

/// Builder with seed profiles and the bundled common-word lists
pub fn seed_builder() -> LanguageDetectorBuilder {
    LanguageDetectorBuilder::new()
        .ngram_profiles(seed_profiles())
        .common_words(Arc::new(CommonWords::from_dir(&data_dir("common-words")).unwrap()))
}

/// In-memory classifier process answering from a shared script.
///
/// Each read pops one entry; `None` (or an exhausted script) reads as EOF.
pub struct FakeProcess {
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl ClassifierProcess for FakeProcess {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.script.lock().unwrap().pop_front().flatten())
    }

    fn kill(&mut self) {}
}

/// Spawner handing out [`FakeProcess`]es that share one response script
#[derive(Clone, Default)]
pub struct FakeSpawner {
    pub script: Arc<Mutex<VecDeque<Option<String>>>>,
    pub lines: Arc<Mutex<Vec<String>>>,
    pub spawns: Arc<AtomicUsize>,
}

impl FakeSpawner {
    pub fn with_script<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let spawner = Self::default();
        spawner
            .script
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(|r| r.map(Into::into)));
        spawner
    }

    /// Every call answers `line`
    pub fn always(line: &str, calls: usize) -> Self {
        Self::with_script(std::iter::repeat(Some(line.to_string())).take(calls))
    }

    pub fn spawn_count(&self) -> usize {
        self.spawns.load(Ordering::SeqCst)
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self) -> io::Result<Box<dyn ClassifierProcess>> {
        self.spawns.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeProcess {
            script: Arc::clone(&self.script),
            lines: Arc::clone(&self.lines),
        }))
    }
}

/// Spawner whose first spawn succeeds and every later one fails
pub struct FailingRestartSpawner {
    inner: FakeSpawner,
}

impl FailingRestartSpawner {
    pub fn new(inner: FakeSpawner) -> Self {
        Self { inner }
    }
}

impl ProcessSpawner for FailingRestartSpawner {
    fn spawn(&self) -> io::Result<Box<dyn ClassifierProcess>> {
        if self.inner.spawn_count() > 0 {
            return Err(io::Error::new(io::ErrorKind::NotFound, "binary removed"));
        }
        self.inner.spawn()
    }
}
