//! The wire client for the role-management service.
//!
//! One connection per call, one JSON request line per connection. The
//! service answers with a single JSON reply line; for the fire-and-callback
//! operations that reply is read on a spawned thread so the issuing call
//! returns as soon as the request is written.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::roles::{RemoteCallback, RemoteError, RoleManager};

#[derive(Serialize, Debug)]
#[serde(tag = "op", rename_all = "kebab-case")]
enum Request<'a> {
    GetRoleHolders {
        role: &'a str,
        user_id: i32,
    },
    AddRoleHolder {
        role: &'a str,
        package: &'a str,
        flags: i32,
        user_id: i32,
    },
    RemoveRoleHolder {
        role: &'a str,
        package: &'a str,
        flags: i32,
        user_id: i32,
    },
    ClearRoleHolders {
        role: &'a str,
        flags: i32,
        user_id: i32,
    },
    SetBypassingRoleQualification {
        bypass: bool,
    },
}

pub struct RoleManagerClient {
    socket_path: PathBuf,
    read_timeout: Duration,
}

impl RoleManagerClient {
    pub fn new(socket_path: PathBuf, read_timeout: Duration) -> Self {
        RoleManagerClient {
            socket_path,
            read_timeout,
        }
    }

    fn send(&self, request: &Request) -> Result<UnixStream, RemoteError> {
        let mut stream = UnixStream::connect(&self.socket_path)?;

        let mut line = serde_json::to_string(request).map_err(|err| RemoteError::Protocol(err.to_string()))?;
        line.push('\n');

        log::debug!("role service request: {}", line.trim_end());
        stream.write_all(line.as_bytes())?;

        Ok(stream)
    }

    fn read_reply(stream: UnixStream) -> Result<Value, RemoteError> {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();

        let n = reader.read_line(&mut line)?;
        if n == 0 {
            return Err(RemoteError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "the role service closed the connection before replying",
            )));
        }

        serde_json::from_str(&line).map_err(|err| RemoteError::Protocol(err.to_string()))
    }

    /// Writes the request, then hands the stream to a thread that reads the
    /// single reply line and fires the callback: a payload for an `ok`
    /// reply, nothing for anything else.
    fn issue(&self, request: &Request, callback: RemoteCallback) -> Result<(), RemoteError> {
        let stream = self.send(request)?;

        std::thread::spawn(move || {
            let result = match Self::read_reply(stream) {
                Ok(reply) if reply.get("ok").and_then(Value::as_bool) == Some(true) => Some(reply),
                Ok(reply) => {
                    log::debug!("role service refused the request: {}", reply);
                    None
                }
                Err(err) => {
                    log::debug!("no usable reply from the role service: {}", err);
                    None
                }
            };

            callback(result);
        });

        Ok(())
    }
}

impl RoleManager for RoleManagerClient {
    fn get_role_holders_as_user(&self, role_name: &str, user_id: i32) -> Result<Vec<String>, RemoteError> {
        let stream = self.send(&Request::GetRoleHolders {
            role: role_name,
            user_id,
        })?;
        stream.set_read_timeout(Some(self.read_timeout))?;

        let reply = Self::read_reply(stream)?;
        if reply.get("ok").and_then(Value::as_bool) != Some(true) {
            let detail = reply
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or("no detail given")
                .to_string();
            return Err(RemoteError::Rejected(detail));
        }

        let holders = reply
            .get("holders")
            .and_then(Value::as_array)
            .map(|vals| {
                vals.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(holders)
    }

    fn add_role_holder_as_user(
        &self,
        role_name: &str,
        package_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError> {
        self.issue(
            &Request::AddRoleHolder {
                role: role_name,
                package: package_name,
                flags,
                user_id,
            },
            callback,
        )
    }

    fn remove_role_holder_as_user(
        &self,
        role_name: &str,
        package_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError> {
        self.issue(
            &Request::RemoveRoleHolder {
                role: role_name,
                package: package_name,
                flags,
                user_id,
            },
            callback,
        )
    }

    fn clear_role_holders_as_user(
        &self,
        role_name: &str,
        flags: i32,
        user_id: i32,
        callback: RemoteCallback,
    ) -> Result<(), RemoteError> {
        self.issue(
            &Request::ClearRoleHolders {
                role: role_name,
                flags,
                user_id,
            },
            callback,
        )
    }

    fn set_bypassing_role_qualification(&self, bypass: bool) -> Result<(), RemoteError> {
        // Fire and return; the service sends no reply for this one.
        self.send(&Request::SetBypassingRoleQualification { bypass })?;
        Ok(())
    }
}
