use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

use fnv::FnvHasher;

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash map with room for `capacity` entries, hashed with FNV.
/// FNV beats the default SipHash on short keys such as cell ids, at the cost of any
/// protection against deliberate key collisions.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}
