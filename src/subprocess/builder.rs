use std::collections::HashMap;
use std::path::Path;

use crate::subprocess::ProcessCommand;

pub struct ProcessCommandBuilder {
    command: ProcessCommand,
}

impl ProcessCommandBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: ProcessCommand {
                program: program.to_string(),
                args: Vec::new(),
                env: HashMap::new(),
                working_dir: None,
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.command
            .args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Append `flag` only when `enabled`.
    pub fn flag_if(self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    /// Append `flag value` only when `value` is present.
    pub fn opt<V: ToString>(self, flag: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.args([flag.to_string(), value.to_string()]),
            None => self,
        }
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.command.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.command.working_dir = Some(dir.to_path_buf());
        self
    }

    pub fn build(self) -> ProcessCommand {
        self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditional_args() {
        let command = ProcessCommandBuilder::new("prog")
            .flag_if(true, "-a")
            .flag_if(false, "-b")
            .opt("-c", Some(3))
            .opt::<String>("-d", None)
            .env("KEY", "value")
            .current_dir(Path::new("/tmp"))
            .build();

        assert_eq!(command.args, vec!["-a", "-c", "3"]);
        assert_eq!(command.env.get("KEY").map(String::as_str), Some("value"));
        assert_eq!(command.working_dir.as_deref(), Some(Path::new("/tmp")));
    }
}
