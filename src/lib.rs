//! strmap: a single-threaded hash table from owned string keys to values,
//! using FNV-1a hashing and linear probing.
//!
//! ```
//! use strmap::Table;
//!
//! let mut t = Table::new();
//! t.set("apple", 1).unwrap();
//! t.set("banana", 2).unwrap();
//! t.set("apple", 3).unwrap();
//! assert_eq!(t.get("apple"), Some(&3));
//! assert_eq!(t.get("cherry"), None);
//! assert_eq!(t.len(), 2);
//! ```
//!
//! Internal Design:
//!
//! Summary
//! - One structure, `Table<V, S>`: a `Vec` of slots, each either empty or
//!   holding `(Box<str>, cached hash, V)`, plus an occupancy count.
//! - Capacity is a power of two, starting at 16. The starting probe index
//!   is `hash & (capacity - 1)`.
//! - Collisions resolve by linear probing, wrapping at the end of the array.
//!
//! Constraints
//! - Load factor never exceeds 1/2: `set` doubles the array before probing
//!   whenever one more entry would cross that bound.
//! - Keys are unique. Setting an existing key replaces its value in place and
//!   keeps the original key allocation.
//! - No removal, so the first empty slot on a probe sequence proves absence
//!   and no tombstones are needed.
//! - The table never shrinks.
//!
//! Ownership
//! - The table copies each new key into its own `Box<str>` and frees it on
//!   drop. Growth moves the box, not the bytes, so the `&str` returned from
//!   `set` keeps its address for the life of the table.
//! - Values are owned through `V`; an overwritten value is dropped on the spot.
//!
//! Hasher and rehashing invariants
//! - The key's bytes are fed to the hasher with one `write` call, so with the
//!   default `FnvBuildHasher` the table hash is exactly FNV-1a of the bytes.
//! - Each entry stores its hash; growth re-slots entries by the stored hash
//!   and never re-reads key bytes.
//!
//! Failure model
//! - Every allocation (slot array, key copy) is fallible and reported as
//!   `AllocError`. The key copy is made before its slot is written and the
//!   new array is fully reserved before the old one is drained, so a failed
//!   `set` leaves the table holding exactly what it held before.
//! - A missing key is `None`, not an error.
//!
//! Iteration
//! - `Cursor` mirrors an explicit advance/key/value protocol; `Iter`,
//!   `IterMut` and `IntoIter` are the usual Rust iterators. All of them walk
//!   slot order, and all of them borrow or consume the table, so mutating
//!   mid-iteration is rejected at compile time.
//!
//! Notes and non-goals
//! - Single-threaded: no internal synchronization.
//! - No deletion, no ordering guarantees, string keys only.

mod error;
mod fnv;
mod iter;
mod table;
mod table_proptest;

// Public surface
pub use error::AllocError;
pub use fnv::{FnvBuildHasher, FnvHasher};
pub use iter::{Cursor, IntoIter, Iter, IterMut};
pub use table::{Table, MIN_CAPACITY};
