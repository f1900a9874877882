use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

/// Generate shell completion scripts.
///
/// If you need to set up completions manually, follow the instructions
/// below. The exact config file locations might vary based on your system.
/// Make sure to restart your shell before testing whether completions are
/// working.
///
/// ### bash
///
/// Add this to your `~/.bash_profile`:
///
///         eval "$(role completion -s bash)"
///
/// ### zsh
///
/// Generate a `_role` completion script and put it somewhere in your
/// `$fpath`:
///
///         role completion -s zsh > /usr/local/share/zsh/site-functions/_role
///
/// ### fish
///
/// Generate a `role.fish` completion script:
///
///         role completion -s fish > ~/.config/fish/completions/role.fish
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdCompletion {
    /// Shell type: {bash|zsh|fish|powershell}
    #[clap(short, long, default_value = "bash")]
    pub shell: Shell,
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdCompletion {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        // Convert our opts into a clap app.
        let mut app: clap::Command = crate::Opts::command();
        let name = app.get_name().to_string();
        // Generate the completion script.
        generate(self.shell, &mut app, name, &mut ctx.io.out);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cmd::Command;

    pub struct TestItem {
        name: String,
        shell: Shell,
        want_out: String,
    }

    #[tokio::test]
    async fn test_cmd_completion() {
        let tests = vec![
            TestItem {
                name: "bash completion".to_string(),
                shell: Shell::Bash,
                want_out: "complete -F _role -o bashdefault -o default role".to_string(),
            },
            TestItem {
                name: "zsh completion".to_string(),
                shell: Shell::Zsh,
                want_out: "#compdef role".to_string(),
            },
            TestItem {
                name: "fish completion".to_string(),
                shell: Shell::Fish,
                want_out: "complete -c role".to_string(),
            },
        ];

        let config = crate::config::Config {
            socket_path: "/nonexistent/role.sock".into(),
            wait_timeout: std::time::Duration::from_secs(5),
        };

        for t in tests {
            let (mut io, stdout_path, stderr_path) = crate::iostreams::IoStreams::test();
            io.set_stdout_tty(false);
            let mut ctx = crate::context::Context {
                config: &config,
                io,
                debug: false,
                client: Box::new(crate::client::RoleManagerClient::new(
                    config.socket_path.clone(),
                    config.wait_timeout,
                )),
            };

            let cmd = CmdCompletion { shell: t.shell };
            cmd.run(&mut ctx).await.unwrap();
            ctx.io.out.flush().unwrap();

            let stdout = std::fs::read_to_string(stdout_path).unwrap_or_default();
            let stderr = std::fs::read_to_string(stderr_path).unwrap_or_default();

            assert!(
                stdout.contains(&t.want_out),
                "test {} ->\nstdout: {}\nwant: {}",
                t.name,
                stdout,
                t.want_out
            );
            assert_eq!(stderr, "", "test {}", t.name);
        }
    }
}
