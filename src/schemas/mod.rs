//! Request/response schemas
//!
//! Wire types for the synchronous API, the event handler and the Bedrock
//! provider bodies.

pub mod bedrock;
pub mod convert;
pub mod event;

pub use convert::{ConvertRequest, ConvertResponse};
pub use event::{ConversionRequest, EventConversionBody, EventPayload, EventResponse};
