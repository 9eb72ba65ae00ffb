//! Identity context and tenant access guard.
//!
//! The upstream credential layer authenticates users and forwards a resolved
//! identity in request headers; this module turns it into a [`Principal`] and
//! decides, per request, whether that principal may act on a given tenant.

pub mod guard;
pub mod models;
pub mod queries;

pub use guard::{authorize, TenantScope};
pub use models::{Principal, Role};
