//! Build/session-scoped state: the doppelganger registry, the resolved
//! module set, and the resolution interceptor that feeds both.
//!
//! One [`BuildSession`] exists per build or dev-server lifetime and is passed
//! by reference to every resolution call. It is never a process-wide
//! singleton, so concurrent builds in a multi-project watch setup cannot
//! cross-contaminate.

#![forbid(unsafe_code)]

mod interceptor;
mod registry;
mod session;

pub use interceptor::{HostResolver, Resolution, VIRTUAL_PREFIX};
pub use registry::DoppelgangerRegistry;
pub use session::{BuildSession, SessionMode};
