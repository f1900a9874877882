use anyhow::{anyhow, Result};
use clap::Parser;

/// Set whether role-qualification checks are bypassed globally.
///
/// The literal is parsed leniently: `true` in any casing enables the
/// bypass, and every other literal disables it.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdSetBypassingRoleQualification {
    /// `true` to bypass role qualification, `false` to enforce it.
    #[clap(name = "VALUE", required = true)]
    pub value: String,
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdSetBypassingRoleQualification {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        let bypass = self.value.eq_ignore_ascii_case("true");
        if !bypass && !self.value.eq_ignore_ascii_case("false") {
            log::warn!("treating unrecognized literal {:?} as false", self.value);
        }

        ctx.client
            .set_bypassing_role_qualification(bypass)
            .map_err(|err| anyhow!("Remote exception: {}", err))?;

        Ok(())
    }
}
