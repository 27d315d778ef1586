use super::*;
use crate::coerce::Coerce;
use crate::value::Map;

impl Config {
    /// Read the node at `path` as `T`.
    ///
    /// A missing or malformed path comes back unchanged (`NotFound` / `InvalidPath`);
    /// only a node that exists but cannot be read as `T` is a `TypeMismatch`.
    ///
    /// # Examples
    /// ```
    /// use dotted_cfg::Config;
    ///
    /// let cfg = Config::from_yaml("server:\n  port: \"8080\"\n").unwrap();
    /// let port: u16 = cfg.get_as("server.port").unwrap();
    /// assert_eq!(port, 8080);
    /// assert!(cfg.get_as::<u16>("server.host").unwrap_err().is_not_found());
    /// ```
    pub fn get_as<T: Coerce>(&self, path: &str) -> Result<T> {
        let segments = path::split_path(path)?;
        self.lookup_segments(&segments, |node| {
            T::coerce(node).ok_or_else(|| ConfigError::TypeMismatch {
                path: path.to_string(),
                expected: T::EXPECTED,
                found: node.kind(),
            })
        })?
    }

    /// Like [`Config::get_as`], but `None` when the path does not exist.
    ///
    /// Type mismatches and malformed paths are still errors.
    pub fn get_optional<T: Coerce>(&self, path: &str) -> Result<Option<T>> {
        match self.get_as(path) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read the node at `path` as `T`, or return `fallback` on any error.
    pub fn get_or<T: Coerce>(&self, path: &str, fallback: T) -> T {
        self.get_as(path).unwrap_or(fallback)
    }

    pub fn bool(&self, path: &str) -> Result<bool> {
        self.get_as(path)
    }

    pub fn float64(&self, path: &str) -> Result<f64> {
        self.get_as(path)
    }

    /// Integers stored as floats are accepted only when nothing is lost: `42.0` reads
    /// as `42`, `42.5` is a type mismatch.
    pub fn int(&self, path: &str) -> Result<i64> {
        self.get_as(path)
    }

    pub fn list(&self, path: &str) -> Result<Vec<Value>> {
        self.get_as(path)
    }

    pub fn map(&self, path: &str) -> Result<Map> {
        self.get_as(path)
    }

    pub fn string(&self, path: &str) -> Result<String> {
        self.get_as(path)
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        path::split_path(path)
            .and_then(|segments| self.lookup_segments(&segments, |_| ()))
            .is_ok()
    }

    /// Keys of the map at `path`.
    pub fn keys(&self, path: &str) -> Result<Vec<String>> {
        let map = self.map(path)?;
        Ok(map.keys().cloned().collect())
    }
}
