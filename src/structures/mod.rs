pub mod byte_cache;
