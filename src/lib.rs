pub mod clockmodel;
pub mod constants;
pub mod histogram;
pub mod verifier;

pub use clockmodel::{ClockModel, ClockState};
pub use histogram::MicrosHistogram;
pub use verifier::{TimestampVerifier, VerifierSnapshot};
