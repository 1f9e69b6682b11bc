use std::fmt::Display;

/// Diagnostic output for the pipeline stages.
///
/// Everything goes to stderr so that generated code printed on stdout is
/// never interleaved with tracing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Console {
    pub quiet: bool,
    pub verbose: bool,
}

impl Default for Console {
    fn default() -> Self {
        Console::quiet()
    }
}

impl Console {
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            verbose: false,
        }
    }

    pub fn normal() -> Self {
        Self {
            quiet: false,
            verbose: false,
        }
    }

    pub fn verbose() -> Self {
        Self {
            quiet: false,
            verbose: true,
        }
    }

    pub fn println(&self, s: impl Display) {
        if !self.quiet {
            eprintln!("{}", s);
        }
    }

    pub fn force_println(&self, s: impl Display) {
        eprintln!("{}", s);
    }

    pub fn println_verbose(&self, s: impl Display) {
        if self.verbose {
            eprintln!("{}", s);
        }
    }
}
