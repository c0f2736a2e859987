use hashbrown::HashMap;

use crate::types::RecordId;

/// Secondary index from a field value to the ids holding it, in insertion order.
pub type VecIndex<K> = HashMap<K, Vec<RecordId>>;
