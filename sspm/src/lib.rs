pub mod game;
pub mod index;
mod lift;
pub mod measure;
pub mod solve;

pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;
