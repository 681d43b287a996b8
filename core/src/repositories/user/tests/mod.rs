//! Unit tests for mock user repository
