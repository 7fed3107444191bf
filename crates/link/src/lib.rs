pub mod api;
pub mod backoff;
pub mod error;
pub mod socket;
pub mod types;

pub use api::{Command, ControlApi};
pub use backoff::ReconnectPolicy;
pub use error::{LinkError, LinkResult};
pub use socket::{ChannelEvent, ChannelHandle, EventChannelClient};
pub use types::*;
