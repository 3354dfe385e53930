//! Unit tests for storage partitions and adapters.
