//! Insertion-ordered collections with order-preserving serialization.
//!
//! Hash maps trade away ordering for O(1) lookup; this crate keeps both.
//! [`OrderedMap`] and [`OrderedSet`] pair a hash index with an order
//! sequence so that lookup stays O(1) average while iteration and
//! serialization follow first-insertion order.
//!
//! Serialization never goes through a whole-container generic serializer
//! (which would walk the unordered index): the map walks its own order
//! sequence and delegates only per-key and per-value encoding to
//! `serde_json` / `serde_yaml`. The containers also implement
//! [`serde::Serialize`]/[`serde::Deserialize`] directly, feeding entries to
//! any serde format in insertion order.
//!
//! Neither container is safe for unsynchronized mutation from multiple
//! threads; wrap one in a lock or hand each thread its own clone.
//!
//! # Example
//!
//! ```
//! use ordered_ds::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("z", "last");
//! map.insert("a", "first");
//! map.insert("m", "middle");
//! map.remove("a");
//!
//! assert_eq!(
//!     map.to_json_string().unwrap(),
//!     r#"{"z":"last","m":"middle"}"#
//! );
//! assert_eq!(map.to_yaml_string().unwrap(), "'z': last\n'm': middle\n");
//! ```

pub mod error;
pub mod map;
pub mod set;

mod yaml;

pub use error::EncodeError;
pub use map::OrderedMap;
pub use set::OrderedSet;
