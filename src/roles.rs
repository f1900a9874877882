//! The remote interface of the role-management service.
//!
//! Everything behind [`RoleManager`] is an external collaborator: the
//! service decides who may hold a role and remembers the assignments. This
//! tool only issues calls and reports their outcomes.

use serde_json::Value;

/// The user id the commands act on when `--user` is not given.
pub const USER_SYSTEM: i32 = 0;

/// Separator between package names in `get-role-holders` output.
pub const ROLE_HOLDER_SEPARATOR: &str = ";";

/// Completion callback for the asynchronous role operations.
///
/// The service invokes it at most once, on a thread of its own choosing:
/// with a payload when the operation succeeded, without one when it failed.
pub type RemoteCallback = Box<dyn FnOnce(Option<Value>) + Send + 'static>;

/// A fault while talking to the role-management service, distinct from a
/// logical failure the service reports through a completion callback.
#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    /// The service socket could not be reached or the stream broke.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The service replied with something the client cannot understand.
    #[error("malformed reply from the role service: {0}")]
    Protocol(String),

    /// The service understood the call but turned it down.
    #[error("the role service rejected the call: {0}")]
    Rejected(String),
}

/// The subset of the role-management service this tool drives.
///
/// The three holder mutations are fire-and-callback: the method returns as
/// soon as the request is on the wire and the outcome arrives later through
/// the [`RemoteCallback`]. The holder query and the bypass toggle are
/// synchronous.
pub trait RoleManager: Send + Sync {
    /// Returns the package names currently holding `role_name` for `user_id`.
    fn get_role_holders_as_user(&self, role_name: &str, user_id: i32) -> Result<Vec<String>, RemoteError>;

    /// Grants `role_name` to `package_name` for `user_id`.
    fn add_role_holder_as_user(
        &self,
        role_name: &str,
        package_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError>;

    /// Revokes `role_name` from `package_name` for `user_id`.
    fn remove_role_holder_as_user(
        &self,
        role_name: &str,
        package_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError>;

    /// Revokes `role_name` from all of its holders for `user_id`.
    fn clear_role_holders_as_user(
        &self,
        role_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError>;

    /// Sets the global flag that skips role-qualification checks.
    fn set_bypassing_role_qualification(&self, bypass: bool) -> Result<(), RemoteError>;
}
