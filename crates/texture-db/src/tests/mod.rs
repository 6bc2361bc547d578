//! Scenario tests exercising the catalog, the mirror, and the
//! reconciliation layer together over a real tempdir profile.

mod store_tests;
