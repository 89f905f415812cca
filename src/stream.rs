//! Command Streaming for the simulator
//!
//! A run reads commands from a file when one is given and exists, otherwise
//! line by line from an interactive source. Each line is resolved through the
//! registry and applied to the robot before the next one is read.
//!
//! Unknown commands behave differently per mode: a command file skips them,
//! while an interactive session ends at the first one.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info};
use crate::{
    command::{Continuation, SessionContext},
    config::{OutputFormat, SimConfig},
    grid::Grid,
    input::InputSource,
    registry::CommandRegistry,
    robot::Robot,
    Result,
};

/// Where the commands of a run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    File,
    Interactive,
}

/// Statistics about command processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandStats {
    pub lines_processed: u64,
    pub commands_resolved: u64,
    pub unknown_commands: u64,
}

/// One simulator session: a robot, its table, the registry and the sinks
pub struct CommandStream<O, E> {
    registry: CommandRegistry,
    robot: Robot,
    table: Grid,
    format: OutputFormat,
    output: O,
    error: E,
    stats: CommandStats,
}

impl<O: Write, E: Write> CommandStream<O, E> {
    /// Create a session writing reports to `output` and failures to `error`
    pub fn new(registry: CommandRegistry, table: Grid, output: O, error: E) -> Self {
        Self {
            registry,
            robot: Robot::new(),
            table,
            format: OutputFormat::default(),
            output,
            error,
            stats: CommandStats::default(),
        }
    }

    /// Create a session with the built-in commands, sized and formatted per `config`
    pub fn from_config(config: &SimConfig, output: O, error: E) -> Result<Self> {
        let registry = CommandRegistry::with_builtins()?;
        Ok(Self::new(registry, config.grid()?, output, error).with_format(config.output.format))
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run a session, preferring `file` and falling back to `input`
    pub fn run(&mut self, file: Option<&Path>, input: &mut dyn InputSource) -> Result<RunMode> {
        if let Some(path) = file {
            if self.process_file(path)? {
                return Ok(RunMode::File);
            }
            info!("No command file at {}, reading commands interactively", path.display());
        }

        self.run_interactive(input)?;
        Ok(RunMode::Interactive)
    }

    /// Process every non-blank line of `path`.
    ///
    /// Returns false when no such file exists. A file that exists but cannot
    /// be read is reported on the error sink and still counts as handled.
    /// Bytes that are not valid UTF-8 are replaced, so such a line simply
    /// fails to resolve and is skipped.
    pub fn process_file(&mut self, path: &Path) -> Result<bool> {
        self.process_file_with(path, |path| fs::read(path))
    }

    fn process_file_with<F>(&mut self, path: &Path, read: F) -> Result<bool>
    where
        F: FnOnce(&Path) -> io::Result<Vec<u8>>,
    {
        if !path.is_file() {
            return Ok(false);
        }

        info!("Processing command file {}", path.display());
        match read(path) {
            Ok(bytes) => {
                let contents = String::from_utf8_lossy(&bytes);
                for line in contents.lines().filter(|line| !line.trim().is_empty()) {
                    // Unknown commands are skipped in file mode
                    self.process_command(line)?;
                }
            }
            Err(e) => {
                error!("Failed to read command file {}: {}", path.display(), e);
                writeln!(self.error, "Error processing file: {}; {}", path.display(), e)?;
            }
        }

        self.finish_run()?;
        Ok(true)
    }

    /// Read lines from `input` until it is exhausted or a line does not resolve
    pub fn run_interactive(&mut self, input: &mut dyn InputSource) -> Result<()> {
        info!("Reading commands interactively");

        loop {
            let line = match input.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("End of input reached");
                    break;
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            if !self.process_command(&line)? {
                break;
            }
        }

        self.finish_run()
    }

    /// Resolve and invoke a single command line.
    ///
    /// Returns true if the line resolved and the command asked to continue.
    pub fn process_command(&mut self, line: &str) -> Result<bool> {
        self.stats.lines_processed = self.stats.lines_processed.saturating_add(1);

        let Some((command, args)) = self.registry.resolve(line) else {
            self.stats.unknown_commands = self.stats.unknown_commands.saturating_add(1);
            debug!("Unknown command: {}", line.trim());
            return Ok(false);
        };

        self.stats.commands_resolved = self.stats.commands_resolved.saturating_add(1);
        debug!("Executing {} (args: {:?})", command.name(), args);

        let mut ctx = SessionContext {
            table: &self.table,
            output: &mut self.output,
            format: self.format,
            registry: &self.registry,
        };
        let flow = command.invoke(&mut self.robot, &mut ctx, args)?;

        Ok(flow == Continuation::Continue)
    }

    fn finish_run(&mut self) -> Result<()> {
        self.output.flush()?;
        info!(
            "Session finished: {} lines, {} commands, {} unknown",
            self.stats.lines_processed, self.stats.commands_resolved, self.stats.unknown_commands
        );
        Ok(())
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn table(&self) -> &Grid {
        &self.table
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn error_output(&self) -> &E {
        &self.error
    }

    /// Get statistics about command processing
    pub fn get_stats(&self) -> CommandStats {
        self.stats.clone()
    }

    pub fn into_parts(self) -> (O, E) {
        (self.output, self.error)
    }
}
