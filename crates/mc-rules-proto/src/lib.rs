//! Wire types and packet definitions for the work-rules multiplayer path.

pub mod codec;
pub mod error;
pub mod packets;
pub mod types;
