//! Scenario tests across the normalizer, session and serializer.

mod lifecycle_tests;
