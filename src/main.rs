//! A command line tool for administering role holders on a running
//! role-management service.
#![deny(missing_docs)]

// Always export the cmd_* modules as public so that it tells us when we are
// missing docs.

mod bridge;
mod client;
mod cmd;
/// The add-role-holder command.
pub mod cmd_add_role_holder;
/// The clear-role-holders command.
pub mod cmd_clear_role_holders;
/// The completion command.
pub mod cmd_completion;
/// The get-role-holders command.
pub mod cmd_get_role_holders;
/// The remove-role-holder command.
pub mod cmd_remove_role_holder;
/// The set-bypassing-role-qualification command.
pub mod cmd_set_bypassing_role_qualification;
mod config;
mod context;
mod iostreams;
mod roles;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use slog::Drain;

/// Administer role holders from the command line.
///
/// Environment variables that can be used with role.
///
/// ROLE_SOCKET: the path of the role service's local socket. Default:
/// "/var/run/role-manager.sock".
///
/// ROLE_TIMEOUT: how many seconds to wait for the service to confirm an
/// asynchronous operation before giving up. Default: 5.
///
/// DEBUG: set to any value to enable verbose output to standard error.
#[derive(Parser, Debug, Clone)]
#[clap(name = "role", version = clap::crate_version!(), author = clap::crate_authors!("\n"))]
struct Opts {
    /// Print debug info
    #[clap(short, long, global = true, env)]
    debug: bool,

    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Parser, Debug, Clone)]
enum SubCommand {
    AddRoleHolder(cmd_add_role_holder::CmdAddRoleHolder),
    ClearRoleHolders(cmd_clear_role_holders::CmdClearRoleHolders),
    Completion(cmd_completion::CmdCompletion),
    GetRoleHolders(cmd_get_role_holders::CmdGetRoleHolders),
    RemoveRoleHolder(cmd_remove_role_holder::CmdRemoveRoleHolder),
    SetBypassingRoleQualification(cmd_set_bypassing_role_qualification::CmdSetBypassingRoleQualification),
}

#[tokio::main]
async fn main() {
    // Set up the logger before anything talks to the service. DEBUG raises
    // the level, as documented above.
    let level = if std::env::var("DEBUG").is_ok() {
        slog::Level::Debug
    } else {
        slog::Level::Info
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, slog::o!());
    let _scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init().ok();

    // Let's get our configuration.
    let config = config::Config::from_env();
    let mut ctx = context::Context::new(&config);

    let args: Vec<String> = std::env::args().collect();

    let code = match do_main(args, &mut ctx).await {
        Ok(code) => code,
        Err(err) => {
            writeln!(ctx.io.err_out, "{}", err).ok();
            1
        }
    };

    ctx.io.out.flush().ok();
    ctx.io.err_out.flush().ok();
    std::process::exit(code);
}

async fn do_main(args: Vec<String>, ctx: &mut context::Context<'_>) -> Result<i32> {
    // Parse the command line arguments ourselves so that usage errors and
    // help requests land on the context's streams instead of exiting the
    // process out from under us.
    let opts: Opts = match Opts::try_parse_from(&args) {
        Ok(opts) => opts,
        Err(err) => match err.kind() {
            clap::ErrorKind::DisplayHelp | clap::ErrorKind::DisplayVersion => {
                writeln!(ctx.io.out, "{}", err)?;
                return Ok(0);
            }
            _ => {
                writeln!(ctx.io.err_out, "{}", err)?;
                return Ok(2);
            }
        },
    };

    // Set our debug flag.
    ctx.debug = opts.debug;

    match opts.subcmd {
        SubCommand::AddRoleHolder(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::ClearRoleHolders(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::Completion(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::GetRoleHolders(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::RemoveRoleHolder(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::SetBypassingRoleQualification(cmd) => run_cmd(&cmd, ctx).await,
    }
}

async fn run_cmd(cmd: &impl cmd::Command, ctx: &mut context::Context<'_>) -> Result<i32> {
    if let Err(err) = cmd.run(ctx).await {
        if ctx.debug {
            writeln!(ctx.io.err_out, "{:?}", err)?;
        } else {
            writeln!(ctx.io.err_out, "{}", err)?;
        }
        return Ok(-1);
    }

    Ok(0)
}
