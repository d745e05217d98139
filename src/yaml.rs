//! Order-preserving YAML rendering for [`OrderedMap`].
//!
//! Same walk as the JSON encoder in `map.rs`, different syntax: keys become
//! single-quoted YAML scalars, values are rendered by `serde_yaml` and laid
//! out inline or as an indented block depending on whether they span lines.

use std::hash::Hash;

use serde::Serialize;

use crate::error::EncodeError;
use crate::map::OrderedMap;

/// One indentation level, matching serde_yaml's block indent.
const INDENT: &str = "  ";

impl<K, V> OrderedMap<K, V>
where
    K: AsRef<str> + Hash + Eq,
    V: Serialize,
{
    /// Renders the map as YAML with keys in insertion order.
    ///
    /// Each key is written as a single-quoted scalar (internal `'` doubled),
    /// followed by `:`. A value whose rendering fits on one line stays
    /// inline after a space; a multi-line rendering starts on the next line
    /// with every line indented by one level. An empty map renders as `{}`.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a'b", 1);
    /// assert_eq!(map.to_yaml_string().unwrap(), "'a''b': 1\n");
    /// ```
    pub fn to_yaml_string(&self) -> Result<String, EncodeError> {
        if self.is_empty() {
            return Ok("{}".to_string());
        }
        let mut out = String::with_capacity(self.len() * 20);
        for (key, value) in self.iter() {
            write_single_quoted(&mut out, key.as_ref());
            out.push(':');

            let rendered = serde_yaml::to_string(value)?;
            // serde_yaml appends a trailing newline; trim it before the
            // inline/block decision
            let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);

            if rendered.contains('\n') {
                out.push('\n');
                for line in rendered.lines() {
                    out.push_str(INDENT);
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                if !rendered.is_empty() {
                    out.push(' ');
                    out.push_str(rendered);
                }
                out.push('\n');
            }
        }
        Ok(out)
    }
}

/// Writes `s` as a YAML single-quoted scalar: wrapped in `'` with every
/// internal `'` escaped by doubling.
fn write_single_quoted(out: &mut String, s: &str) {
    out.push('\'');
    let mut rest = s;
    while let Some(pos) = rest.find('\'') {
        out.push_str(&rest[..pos]);
        out.push_str("''");
        rest = &rest[pos + 1..];
    }
    out.push_str(rest);
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_renders_as_braces() {
        let map: OrderedMap<String, i32> = OrderedMap::new();
        assert_eq!(map.to_yaml_string().unwrap(), "{}");
    }

    #[test]
    fn test_scalar_values_stay_inline() {
        let mut map = OrderedMap::new();
        map.insert("z", serde_yaml::Value::from("last"));
        map.insert("a", serde_yaml::Value::from(1));
        map.insert("flag", serde_yaml::Value::from(true));
        assert_eq!(
            map.to_yaml_string().unwrap(),
            "'z': last\n'a': 1\n'flag': true\n"
        );
    }

    #[test]
    fn test_single_quote_in_key_is_doubled() {
        let mut map = OrderedMap::new();
        map.insert("a'b", 1);
        assert_eq!(map.to_yaml_string().unwrap(), "'a''b': 1\n");
    }

    #[test]
    fn test_multiline_value_is_indented_block() {
        let mut map = OrderedMap::new();
        map.insert("list", vec![1, 2]);
        assert_eq!(map.to_yaml_string().unwrap(), "'list':\n  - 1\n  - 2\n");
    }

    #[test]
    fn test_struct_value_is_indented_block() {
        #[derive(serde::Serialize)]
        struct Endpoint {
            host: &'static str,
            port: u16,
        }

        let mut map = OrderedMap::new();
        map.insert(
            "upstream",
            Endpoint {
                host: "example.com",
                port: 8080,
            },
        );
        assert_eq!(
            map.to_yaml_string().unwrap(),
            "'upstream':\n  host: example.com\n  port: 8080\n"
        );
    }

    #[test]
    fn test_keys_render_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("z", 26);
        map.insert("a", 1);
        map.insert("m", 13);
        assert_eq!(map.to_yaml_string().unwrap(), "'z': 26\n'a': 1\n'm': 13\n");
    }

    #[test]
    fn test_nested_ordered_map_value() {
        let mut inner = OrderedMap::new();
        inner.insert("z".to_string(), 1);
        inner.insert("a".to_string(), 2);
        let mut outer = OrderedMap::new();
        outer.insert("nested", inner);
        assert_eq!(
            outer.to_yaml_string().unwrap(),
            "'nested':\n  z: 1\n  a: 2\n"
        );
    }

    #[test]
    fn test_value_error_propagates() {
        use serde::Serializer;

        struct Unserializable;

        impl serde::Serialize for Unserializable {
            fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("not representable"))
            }
        }

        let mut map = OrderedMap::new();
        map.insert("bad", Unserializable);
        assert!(matches!(map.to_yaml_string(), Err(EncodeError::Yaml(_))));
    }
}
