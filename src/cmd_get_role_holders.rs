use std::io::Write;

use anyhow::{anyhow, Result};
use clap::Parser;

/// Print the packages currently holding a role.
///
/// The holder package names are printed on one line, separated by `;`. A
/// role with no holders prints an empty line.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdGetRoleHolders {
    /// The name of the role to query.
    #[clap(name = "ROLE", required = true)]
    pub role: String,

    /// The user to query the role for.
    #[clap(long, default_value_t = crate::roles::USER_SYSTEM)]
    pub user: i32,
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdGetRoleHolders {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        let holders = ctx
            .client
            .get_role_holders_as_user(&self.role, self.user)
            .map_err(|err| anyhow!("Remote exception: {}", err))?;

        writeln!(ctx.io.out, "{}", holders.join(crate::roles::ROLE_HOLDER_SEPARATOR))?;

        Ok(())
    }
}
