//! Tests for field normalizers

mod dates_tests;
