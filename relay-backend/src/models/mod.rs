mod records;
mod requests;

pub use records::{Client, Message, Notification, Token};
pub use requests::{SendSmsRequest, SendToTokenRequest, SendToTokensRequest, TopicBroadcastRequest};
