//! Spotaudit Verify - Online location verification
//!
//! Classifies a single coordinate through an external reverse-geocoding
//! collaborator, with graceful degradation when the service is
//! inconclusive or unavailable. Invoked independently of the batch
//! path, typically at record-intake time.

pub mod keywords;
pub mod nominatim;
pub mod ports;
pub mod verifier;

pub use nominatim::NominatimClient;
pub use verifier::LocationVerifier;
