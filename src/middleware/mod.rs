pub mod authenticate;
pub mod authorize;
pub mod validate;

pub use authenticate::authenticate;
pub use authorize::{authorize, RoleGate, OWNER_ONLY, STORE_MEMBERS};
pub use validate::{validate_body, validate_path};
