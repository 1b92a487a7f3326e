//! # drushkit Argument Lists
//!
//! File: cli/src/common/drush/args.rs
//! Author: Christi Mahu
//!
//! An ordered list of strings, the program first, built fresh for every drush
//! call. `add_flag` renders `--name=value` as a single argument, which is how
//! drush expects option values (`--root=/var/www`, `--db-url=mysql://...`).
//!
use crate::common::process::quote_arg;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    program: String,
    args: Vec<String>,
}

impl ArgumentList {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument verbatim.
    pub fn add(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Appends `<name>=<value>` as one argument. `name` includes its dashes.
    pub fn add_flag(&mut self, name: &str, value: impl AsRef<str>) -> &mut Self {
        self.args.push(format!("{}={}", name, value.as_ref()));
        self
    }

    /// Appends every item in order.
    pub fn add_all<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}
