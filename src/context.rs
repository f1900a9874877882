use crate::config::Config;

pub struct Context<'a> {
    pub config: &'a Config,
    pub io: crate::iostreams::IoStreams,
    pub debug: bool,

    /// The handle on the role-management service. Swapped for a fake in
    /// tests.
    pub client: Box<dyn crate::roles::RoleManager>,
}

impl Context<'_> {
    pub fn new(config: &Config) -> Context {
        // Let's get our IO streams.
        let io = crate::iostreams::IoStreams::system();

        let client = crate::client::RoleManagerClient::new(config.socket_path.clone(), config.wait_timeout);

        Context {
            config,
            io,
            debug: false,
            client: Box::new(client),
        }
    }
}
