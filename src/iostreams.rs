pub struct IoStreams {
    pub stdin: Box<dyn std::io::Read + Send + Sync>,
    pub out: Box<dyn std::io::Write + Send + Sync>,
    pub err_out: Box<dyn std::io::Write + Send + Sync>,

    stdout_tty_override: bool,
    stdout_is_tty: bool,
}

impl IoStreams {
    #[allow(dead_code)]
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_tty_override = true;
        self.stdout_is_tty = is_tty;
    }

    #[allow(dead_code)]
    pub fn is_stdout_tty(&self) -> bool {
        if self.stdout_tty_override {
            return self.stdout_is_tty;
        }

        atty::is(atty::Stream::Stdout)
    }

    pub fn system() -> Self {
        IoStreams {
            stdin: Box::new(std::io::stdin()),
            out: Box::new(std::io::stdout()),
            err_out: Box::new(std::io::stderr()),
            stdout_tty_override: false,
            stdout_is_tty: false,
        }
    }

    #[cfg(test)]
    pub fn test() -> (Self, String, String) {
        let mut io = IoStreams::system();

        let (stdout, stdout_path) = tempfile::NamedTempFile::new().unwrap().keep().unwrap();
        let (stderr, stderr_path) = tempfile::NamedTempFile::new().unwrap().keep().unwrap();

        io.out = Box::new(stdout);
        io.err_out = Box::new(stderr);

        (
            io,
            stdout_path.into_os_string().into_string().unwrap(),
            stderr_path.into_os_string().into_string().unwrap(),
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_stdout_tty_override() {
        let mut io = IoStreams::system();

        io.set_stdout_tty(true);
        assert_eq!(io.is_stdout_tty(), true);

        io.set_stdout_tty(false);
        assert_eq!(io.is_stdout_tty(), false);
    }
}
