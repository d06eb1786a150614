//! Payment processor integration.
//!
//! The processor renders and controls the card input inside its own embedded
//! script; this module binds the narrow contract that script exposes to the
//! host page (create/mount/change/unmount plus the confirmation round trip).

#[cfg(feature = "hydrate")]
pub mod stripe;
