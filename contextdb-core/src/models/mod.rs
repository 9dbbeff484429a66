mod api_key;
mod conversation;
mod operation;
mod permission;
mod position;

pub use api_key::ApiKeyRequest;
pub use conversation::{ConversationRequest, MessageRequest, DEFAULT_MESSAGE_TYPE};
pub use operation::{NewOperation, Operation};
pub use permission::Permission;
pub use position::{Position, Segment};
