mod error;

use crate::breaker::Breaker;
pub use error::E;
use glob::Pattern;
use log::debug;
use std::{
    fs::{self, ReadDir},
    iter::FusedIterator,
    path::{Path, PathBuf},
    time::Instant,
};

/// `Walker` lazily yields the paths of all non-directory entries found beneath a root, traversing
/// nested folders depth-first in the order the file system reports them (the order isn't sorted).
///
/// Symlinks met during the traversal are not followed: a symlink is a non-directory entry, so its
/// own path is yielded and whatever it points to is resolved only when the file is read. The root
/// itself is resolved; if the root is a regular file, exactly that file is yielded.
///
/// Any traversal error (missing root, unreadable folder, broken directory entry) is yielded once as
/// `Err(E)` and terminates the sequence. Paths yielded before the error stay valid. `Walker` checks
/// `Breaker` before each step and ends with `E::Aborted` as soon as it has been aborted.
///
/// # Example
///
/// ```
/// use hashwalk::{walker::Walker, Breaker};
/// use std::env::temp_dir;
///
/// let breaker = Breaker::new();
/// for path in Walker::new(temp_dir(), &breaker).take(3) {
///     match path {
///         Ok(path) => println!("{}", path.display()),
///         Err(err) => eprintln!("walk stopped: {err}"),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    exclude: Vec<Pattern>,
    breaker: Breaker,
    stack: Vec<(PathBuf, ReadDir)>,
    started: Option<Instant>,
    finished: bool,
    yielded: usize,
}

impl Walker {
    /// Creates a new `Walker` for `root`. No file system access happens before the first call of
    /// `next()`.
    pub fn new<P: AsRef<Path>>(root: P, breaker: &Breaker) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: Vec::new(),
            breaker: breaker.clone(),
            stack: Vec::new(),
            started: None,
            finished: false,
            yielded: 0,
        }
    }

    /// Sets glob patterns for paths which should be skipped. A pattern is matched against the path
    /// relative to the root and against the entry's name. An excluded folder isn't read at all.
    pub fn exclude(mut self, patterns: &[Pattern]) -> Self {
        self.exclude = patterns.to_vec();
        self
    }

    /// Compiles glob patterns for `exclude()`.
    pub fn patterns<T: AsRef<str>>(patterns: &[T]) -> Result<Vec<Pattern>, E> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|err| E::from((p.as_ref().to_owned(), err)))
            })
            .collect()
    }

    fn excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.exclude
            .iter()
            .any(|p| p.matches_path(relative) || p.matches(&name))
    }

    fn open(&mut self, dir: PathBuf) -> Result<(), E> {
        let entries = fs::read_dir(&dir).map_err(|err| E::from((dir.clone(), err)))?;
        self.stack.push((dir, entries));
        Ok(())
    }

    fn fail(&mut self, err: E) -> Option<Result<PathBuf, E>> {
        self.finished = true;
        self.stack.clear();
        debug!(
            "walking of {} stopped after {} paths: {err}",
            self.root.display(),
            self.yielded
        );
        Some(Err(err))
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(started) = self.started {
            debug!(
                "walked {} paths in {}µs / {}ms / {}s; source: {}",
                self.yielded,
                started.elapsed().as_micros(),
                started.elapsed().as_millis(),
                started.elapsed().as_secs(),
                self.root.display()
            );
        }
    }
}

impl Iterator for Walker {
    type Item = Result<PathBuf, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.started.is_none() {
            self.started = Some(Instant::now());
            if self.breaker.is_aborted() {
                return self.fail(E::Aborted);
            }
            match fs::metadata(&self.root) {
                Err(err) => {
                    let root = self.root.clone();
                    return self.fail((root, err).into());
                }
                Ok(md) if md.is_dir() => {
                    if let Err(err) = self.open(self.root.clone()) {
                        return self.fail(err);
                    }
                }
                Ok(_) => {
                    self.yielded += 1;
                    self.finish();
                    return Some(Ok(self.root.clone()));
                }
            }
        }
        loop {
            if self.breaker.is_aborted() {
                return self.fail(E::Aborted);
            }
            let next = match self.stack.last_mut() {
                Some((dir, entries)) => entries
                    .next()
                    .map(|el| el.map_err(|err| E::from((dir.clone(), err)))),
                None => {
                    self.finish();
                    return None;
                }
            };
            let el = match next {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(err)) => return self.fail(err),
                Some(Ok(el)) => el,
            };
            let path = el.path();
            let file_type = match el.file_type() {
                Ok(file_type) => file_type,
                Err(err) => return self.fail((path, err).into()),
            };
            if self.excluded(&path) {
                continue;
            }
            if file_type.is_dir() {
                if let Err(err) = self.open(path) {
                    return self.fail(err);
                }
                continue;
            }
            self.yielded += 1;
            return Some(Ok(path));
        }
    }
}

impl FusedIterator for Walker {}
