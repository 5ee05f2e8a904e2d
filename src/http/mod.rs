//! Internal HTTP layer for Namecheap API communication.
//!
//! This module is `pub(crate)` - it contains implementation details
//! not exposed to library users.

pub(crate) mod dispatch;
pub(crate) mod error_helpers;
pub(crate) mod loud_wire;
