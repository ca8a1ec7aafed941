pub mod claimable;
pub mod distribution;
pub mod epoch_scan;
pub mod verify_credential;

pub use claimable::*;
pub use distribution::*;
pub use epoch_scan::*;
pub use verify_credential::*;
