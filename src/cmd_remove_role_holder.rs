use anyhow::{anyhow, Result};
use clap::Parser;

use crate::bridge::CallbackFuture;

/// Revoke a role from a package.
///
/// Waits for the role service to confirm the change, up to the configured
/// timeout.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdRemoveRoleHolder {
    /// The name of the role to revoke.
    #[clap(name = "ROLE", required = true)]
    pub role: String,

    /// The package to remove as a holder.
    #[clap(name = "PACKAGE", required = true)]
    pub package: String,

    /// Flags passed through to the role service.
    #[clap(name = "FLAGS", default_value_t = 0, allow_hyphen_values = true)]
    pub flags: i32,

    /// The user to revoke the role for.
    #[clap(long, default_value_t = crate::roles::USER_SYSTEM)]
    pub user: i32,
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdRemoveRoleHolder {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        let (callback, future) = CallbackFuture::new();

        ctx.client
            .remove_role_holder_as_user(&self.role, &self.package, self.flags, self.user, callback)
            .map_err(|err| anyhow!("Remote exception: {}", err))?;

        future.wait(ctx.config.wait_timeout).await
    }
}
