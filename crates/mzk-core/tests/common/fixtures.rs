//! Test fixture loading utilities

use std::path::PathBuf;

/// Get the path to a fixture file
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a MODS metadata fixture
#[allow(dead_code)]
pub fn load_mods_fixture(name: &str) -> String {
    load_fixture(&format!("mods/{}", name))
}

/// Load an IIIF manifest fixture
#[allow(dead_code)]
pub fn load_manifest_fixture(name: &str) -> String {
    load_fixture(&format!("iiif/{}", name))
}

/// Load a mock API response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}
