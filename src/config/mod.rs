use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::normalize::Normalize;
use crate::path;
use crate::render;
use crate::value::Value;

mod access;
mod helpers;
mod mutate;

use helpers::Format;

/// A handle on a configuration tree.
///
/// The tree itself is shared: [`Config::get`] hands out another handle on the same tree,
/// rooted at the requested node, so a [`Config::set`] through either handle is visible
/// through both. Handles are cheap to clone and are not `Send`; take a snapshot with
/// [`Config::to_value`] to move data across threads.
#[derive(Debug, Clone)]
pub struct Config {
    tree: Rc<RefCell<Value>>,
    // Segments from the tree root to the node this handle addresses.
    base: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Value::empty_map())
    }
}

impl Config {
    /// Wrap an already-canonical tree.
    pub fn new(root: Value) -> Self {
        Self {
            tree: Rc::new(RefCell::new(root)),
            base: Vec::new(),
        }
    }

    /// Normalize raw parser output (or any [`Normalize`] value) into a new tree.
    pub fn from_raw<R: Normalize>(raw: R) -> Result<Self> {
        Ok(Self::new(raw.normalize()?))
    }

    /// Parse a JSON document.
    ///
    /// # Examples
    /// ```
    /// use dotted_cfg::Config;
    ///
    /// let cfg = Config::from_json(r#"{"server": {"port": 8080}}"#).unwrap();
    /// assert_eq!(cfg.int("server.port").unwrap(), 8080);
    /// ```
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Parse a YAML document. Mappings with non-string keys are rejected.
    ///
    /// Merge keys (`<<: *anchor`) are resolved before normalization.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        raw.apply_merge()?;
        Self::from_raw(raw)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path.as_ref(), Format::Json)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path.as_ref(), Format::Yaml)
    }

    /// Load a file, picking the parser from its extension (`.json`, `.yaml`, `.yml`).
    ///
    /// A leading `~/` is expanded to the home directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        Self::load(path, format)
    }

    /// Load `primary`, or `fallback` if `primary` does not exist.
    ///
    /// Any other failure of `primary` (unreadable, malformed) is returned as is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self> {
        match Self::from_file(&primary) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    primary = %primary.as_ref().display(),
                    fallback = %fallback.as_ref().display(),
                    "primary config missing, loading fallback"
                );
                Self::from_file(&fallback)
            }
            other => other,
        }
    }

    fn load(path: &Path, format: Format) -> Result<Self> {
        let path = helpers::expand_home(path)?;
        let content = helpers::read_file(&path)?;
        debug!(path = %path.display(), format = ?format, "loading config");
        match format {
            Format::Json => Self::from_json(&content),
            Format::Yaml => Self::from_yaml(&content),
        }
    }

    /// A handle on the node at `path`, sharing this handle's tree.
    ///
    /// `cfg.get("a")?.get("b")?` addresses the same node as `cfg.get("a.b")?`.
    pub fn get(&self, path: &str) -> Result<Config> {
        let segments = path::split_path(path)?;
        self.lookup_segments(&segments, |_| ())?;

        let mut base = self.base.clone();
        base.extend(segments.iter().map(|s| s.to_string()));
        Ok(Config {
            tree: Rc::clone(&self.tree),
            base,
        })
    }

    /// Run `f` against the node this handle addresses.
    ///
    /// # Panics
    /// Calling [`Config::set`] on any handle of the same tree from inside `f` panics.
    pub fn with_value<R>(&self, f: impl FnOnce(&Value) -> R) -> Result<R> {
        self.lookup_segments::<&str, R>(&[], f)
    }

    /// Deep copy of the node this handle addresses.
    pub fn to_value(&self) -> Result<Value> {
        self.with_value(Value::clone)
    }

    /// True when both handles address the same underlying tree.
    pub fn shares_tree(&self, other: &Config) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }

    pub fn render_json(&self) -> Result<String> {
        self.with_value(render::to_json)?
    }

    pub fn render_json_pretty(&self) -> Result<String> {
        self.with_value(render::to_json_pretty)?
    }

    pub fn render_yaml(&self) -> Result<String> {
        self.with_value(render::to_yaml)?
    }

    fn lookup_segments<S: AsRef<str>, R>(
        &self,
        segments: &[S],
        f: impl FnOnce(&Value) -> R,
    ) -> Result<R> {
        let tree = self.tree.borrow();
        let node = path::resolve_segments(&tree, &self.base)?;
        let node = path::resolve_segments(node, segments)?;
        Ok(f(node))
    }
}

/// Unwrap a load result, aborting the process if it failed.
///
/// Meant for startup code where a broken config is a deployment error, not something to
/// recover from.
///
/// # Examples
/// ```
/// use dotted_cfg::{must, Config};
///
/// let cfg = must(Config::from_yaml("name: app\n"));
/// assert_eq!(cfg.string("name").unwrap(), "app");
/// ```
pub fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("failed to load configuration: {}", e),
    }
}
