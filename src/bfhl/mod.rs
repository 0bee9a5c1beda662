//! The `/bfhl` contract: one recognised key per request, validated into a
//! typed [`BfhlRequest`], dispatched, and answered with a [`ResponseEnvelope`].

mod dispatch;
mod envelope;
mod operation;
mod validate;

pub use dispatch::Dispatcher;
pub use envelope::{ResponseData, ResponseEnvelope};
pub use operation::{BfhlRequest, Operation};
pub use validate::{AI_QUESTION_MAX_CHARS, validate};
