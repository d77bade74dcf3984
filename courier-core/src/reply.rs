//! Reply conversion traits.

use crate::error::BoxError;
use crate::payload::Payload;

/// What a handler wants done with its result.
///
/// A non-empty result is sent back out under the action that triggered the
/// handler; anything else stays silent.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The handler has nothing to send back.
    None,
    /// Send this payload back out under the triggering action.
    Send(Payload),
}

/// Trait for converting a handler's output into a [`Reply`].
///
/// # Default Implementations
///
/// - `()` → no reply
/// - `Payload` → reply with that payload
/// - `Option<Payload>` → reply if present
/// - `Reply` → as is
/// - `Result<T, E>` → delegates to inner `T` or surfaces the handler failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoReply`",
    label = "missing `IntoReply` implementation",
    note = "Handler outputs must convert into a reply decision via `into_reply`."
)]
pub trait IntoReply {
    /// Convert the output into a reply decision or a handler failure.
    fn into_reply(self) -> Result<Reply, BoxError>;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(self)
    }
}

impl IntoReply for () {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::None)
    }
}

impl IntoReply for Payload {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Send(self))
    }
}

impl IntoReply for Option<Payload> {
    fn into_reply(self) -> Result<Reply, BoxError> {
        match self {
            Some(value) => Ok(Reply::Send(value)),
            None => Ok(Reply::None),
        }
    }
}

impl<T, E> IntoReply for Result<T, E>
where
    T: IntoReply,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_reply(self) -> Result<Reply, BoxError> {
        match self {
            Ok(value) => value.into_reply(),
            Err(err) => Err(Box::new(err)),
        }
    }
}
