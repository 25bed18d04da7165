//! Quota tracking and call pacing.
//!
//! The provider bills every request against a shared daily and per-second
//! budget. [`RateLimiter`] owns the reservation bookkeeping; [`Pacer`]
//! spaces successive calls so serialized fetch paths stay under the burst
//! cap.

mod limiter;
mod pacer;

pub use limiter::{QuotaStats, RateLimiter, Reservation};
pub use pacer::Pacer;
