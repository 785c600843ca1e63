//! Client-side mirror of the portfolio collections.
//!
//! [`SyncSession`] fetches both collections once, then keeps its local copy
//! current by patching it with the records returned from each mutation.

pub mod api;
pub mod error;
pub mod filter;
pub mod forms;
pub mod mirror;
pub mod session;

pub use api::PortfolioClient;
pub use error::ClientError;
pub use mirror::Mirror;
pub use session::{Notification, NotificationKind, SkillSyncMode, SyncSession, ViewFilter};
