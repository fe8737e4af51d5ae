// Common test utilities and fixtures


// Re-export commonly used items
// Note: not every integration test crate uses every fixture
#[allow(unused_imports)]
pub use fixtures::{
    africa_term, create_test_services, sample_terms, GatedSource, ScriptedSource,
};
