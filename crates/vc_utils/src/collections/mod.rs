// -----------------------------------------------------------------------------
// Modules

mod sharded_map;

// -----------------------------------------------------------------------------
// Exports

pub use sharded_map::ShardedMap;
