pub mod collapse;
pub mod edit;
pub mod fingerprint;
pub mod original;
