use std::fmt;

use tracing::trace;

use super::*;

impl Config {
    /// Write `value` at `path`, creating missing map keys along the way.
    ///
    /// The value is normalized first, so nothing is touched if it is not representable.
    /// Lists are never grown: an index segment must already exist. An empty path replaces
    /// the node this handle addresses.
    ///
    /// A failed write leaves the tree unchanged. The walk can only fail on a list or a
    /// scalar that already existed, and every node below a freshly created map is itself
    /// fresh, so failures always happen before the first map is created.
    ///
    /// # Examples
    /// ```
    /// use dotted_cfg::Config;
    ///
    /// let cfg = Config::default();
    /// cfg.set("x.y.z", 5).unwrap();
    /// assert_eq!(cfg.int("x.y.z").unwrap(), 5);
    /// assert_eq!(cfg.keys("x.y").unwrap(), vec!["z"]);
    /// ```
    pub fn set<V>(&self, path: &str, value: V) -> Result<()>
    where
        V: Normalize + fmt::Debug,
    {
        let segments = path::split_path(path)?;
        let value = value.normalize().map_err(|e| match e {
            e @ ConfigError::UnsupportedValue { .. } => e,
            e => ConfigError::unsupported_value(&value, e),
        })?;

        let mut tree = self.tree.borrow_mut();
        let node = path::resolve_segments_mut(&mut tree, &self.base)?;

        let Some((last, parents)) = segments.split_last() else {
            *node = value;
            return Ok(());
        };

        let mut current = node;
        for (pos, segment) in parents.iter().enumerate() {
            let node = current;
            current = match node {
                Value::Map(map) => map.entry(segment.to_string()).or_insert_with(|| {
                    trace!(path, segment = *segment, "creating intermediate map");
                    Value::empty_map()
                }),
                Value::List(items) => match path::list_index(segment, items.len()) {
                    Some(i) => &mut items[i],
                    None => return Err(path::not_found(&segments, pos)),
                },
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    return Err(path::not_found(&segments, pos));
                }
            };
        }

        match current {
            Value::Map(map) => {
                map.insert(last.to_string(), value);
            }
            Value::List(items) => match path::list_index(last, items.len()) {
                Some(i) => items[i] = value,
                None => return Err(path::not_found(&segments, parents.len())),
            },
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                return Err(path::not_found(&segments, parents.len()));
            }
        }
        Ok(())
    }
}
