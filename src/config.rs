//! Configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

const ROLE_SOCKET: &str = "ROLE_SOCKET";
const ROLE_TIMEOUT: &str = "ROLE_TIMEOUT";

const DEFAULT_SOCKET: &str = "/var/run/role-manager.sock";

/// Settings the commands and the wire client pick up at startup.
pub struct Config {
    /// Path of the role service's local socket.
    pub socket_path: PathBuf,

    /// Bound on the wait for callback-based operations, and on reads for
    /// the synchronous ones.
    pub wait_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let socket_path = match std::env::var(ROLE_SOCKET) {
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_SOCKET),
        };

        let wait_timeout = match std::env::var(ROLE_TIMEOUT) {
            Ok(val) => match val.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    log::warn!("ignoring {} value {:?}: not a whole number of seconds", ROLE_TIMEOUT, val);
                    crate::bridge::DEFAULT_WAIT
                }
            },
            Err(_) => crate::bridge::DEFAULT_WAIT,
        };

        Config {
            socket_path,
            wait_timeout,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_defaults() {
        std::env::remove_var(ROLE_SOCKET);
        std::env::remove_var(ROLE_TIMEOUT);

        let config = Config::from_env();

        assert_eq!(config.socket_path, PathBuf::from(DEFAULT_SOCKET));
        assert_eq!(config.wait_timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial_test::serial]
    fn test_overrides() {
        std::env::set_var(ROLE_SOCKET, "/tmp/role-test.sock");
        std::env::set_var(ROLE_TIMEOUT, "30");

        let config = Config::from_env();

        assert_eq!(config.socket_path, PathBuf::from("/tmp/role-test.sock"));
        assert_eq!(config.wait_timeout, Duration::from_secs(30));

        std::env::remove_var(ROLE_SOCKET);
        std::env::remove_var(ROLE_TIMEOUT);
    }

    #[test]
    #[serial_test::serial]
    fn test_unparsable_timeout_falls_back() {
        std::env::set_var(ROLE_TIMEOUT, "soon");

        let config = Config::from_env();
        assert_eq!(config.wait_timeout, crate::bridge::DEFAULT_WAIT);

        std::env::remove_var(ROLE_TIMEOUT);
    }
}
