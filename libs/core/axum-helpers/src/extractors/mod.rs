mod identity;
mod uuid_path;
mod validated_json;

pub use identity::UserIdentity;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
