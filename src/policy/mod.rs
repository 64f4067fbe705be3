pub mod group_lru;
