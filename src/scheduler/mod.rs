//! Scheduling disciplines for the single-threaded engine.
//!
//! - `deferred`: run-after-current-operation queue (reentrancy avoidance)
//! - `rate_limit`: throttle and debounce with an injected clock
//! - `signal`: publish/subscribe streams with replay-latest mode

pub mod deferred;
pub mod rate_limit;
pub mod signal;

pub use deferred::DeferredQueue;
pub use rate_limit::{Debounce, Throttle};
pub use signal::{Signal, SubscriptionId};
