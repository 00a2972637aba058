//! Command-Line Selection
//!
//! Turns the raw argument list into what the registry should do:
//! - `-l` (any first argument starting `-l`): list job names
//! - any other first argument starting `-`: print usage
//! - otherwise: run the jobs named by the arguments, or all jobs if none
//!
//! Selection never reorders jobs; they run in registration order whatever
//! order the names were given in.

/// What a dispatch call does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Print each job name on its own line
    List,
    /// Print the usage line for `program`
    Usage {
        /// Program name, `args[0]`
        program: &'a str,
    },
    /// Measure the selected jobs
    Run(Selection<'a>),
}

impl<'a> Command<'a> {
    /// Interpret `args`, where `args[0]` is the program name.
    pub fn parse<S: AsRef<str>>(args: &'a [S]) -> Self {
        let program = args.first().map(AsRef::as_ref).unwrap_or("");
        let rest = args.get(1..).unwrap_or(&[]);

        if let Some(flag) = rest.first().and_then(|a| a.as_ref().strip_prefix('-')) {
            return if flag.starts_with('l') {
                Command::List
            } else {
                Command::Usage { program }
            };
        }

        Command::Run(Selection {
            names: rest.iter().map(AsRef::as_ref).collect(),
        })
    }
}

/// Job names picked on the command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection<'a> {
    names: Vec<&'a str>,
}

impl<'a> Selection<'a> {
    /// Select every job
    pub fn all() -> Self {
        Self::default()
    }

    /// Select the jobs called one of `names`
    pub fn named(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Whether a job called `name` runs
    pub fn matches(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(&name)
    }

    /// Whether every job runs
    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    /// Requested names, in argument order
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }
}

/// Usage line printed for unknown flags.
pub fn usage(program: &str) -> String {
    format!("Usage: {} {{-l | <names>}}", program)
}
