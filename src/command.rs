//! Simulator commands
//!
//! Each verb is a [`Command`] that parses its own argument string and acts on
//! the robot. Malformed arguments are ignored so a bad line never changes
//! robot state. The only errors a command returns come from writing to the
//! output sink.

use regex::Regex;
use std::io::Write;
use tracing::debug;
use crate::{
    config::OutputFormat,
    grid::Grid,
    json_output::{self, CommandUsage, HelpEvent, ReportEvent},
    registry::CommandRegistry,
    robot::{Orientation, Robot},
    Result,
};

/// Whether the session should keep reading input after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    Halt,
}

/// Everything a command may touch besides the robot itself
pub struct SessionContext<'a> {
    pub table: &'a Grid,
    pub output: &'a mut dyn Write,
    pub format: OutputFormat,
    pub registry: &'a CommandRegistry,
}

pub trait Command {
    /// Name the command is invoked by
    fn name(&self) -> &str;

    /// Argument hint shown by HELP, empty when the command takes none
    fn usage(&self) -> &str {
        ""
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        ctx: &mut SessionContext<'_>,
        args: Option<&str>,
    ) -> Result<Continuation>;
}

/// `PLACE X,Y,FACING`
pub struct PlaceCommand {
    separator: Regex,
}

impl PlaceCommand {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator: Regex::new(r"[, ]+")?,
        })
    }

    /// Split on commas or spaces and parse exactly three tokens
    pub fn parse_args(&self, args: &str) -> Option<(i32, i32, Orientation)> {
        let tokens: Vec<&str> = self
            .separator
            .split(args)
            .filter(|token| !token.is_empty())
            .collect();

        let [x, y, facing] = tokens.as_slice() else {
            return None;
        };

        Some((x.parse().ok()?, y.parse().ok()?, facing.parse().ok()?))
    }
}

impl Command for PlaceCommand {
    fn name(&self) -> &str {
        "PLACE"
    }

    fn usage(&self) -> &str {
        "<XPos>,<YPos>,<Facing>"
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        ctx: &mut SessionContext<'_>,
        args: Option<&str>,
    ) -> Result<Continuation> {
        match args.and_then(|args| self.parse_args(args)) {
            Some((x, y, facing)) => robot.place(x, y, facing, ctx.table),
            None => debug!("Ignoring malformed PLACE arguments: {:?}", args),
        }
        Ok(Continuation::Continue)
    }
}

pub struct LeftCommand;

impl Command for LeftCommand {
    fn name(&self) -> &str {
        "LEFT"
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        _ctx: &mut SessionContext<'_>,
        _args: Option<&str>,
    ) -> Result<Continuation> {
        robot.turn_left();
        Ok(Continuation::Continue)
    }
}

pub struct RightCommand;

impl Command for RightCommand {
    fn name(&self) -> &str {
        "RIGHT"
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        _ctx: &mut SessionContext<'_>,
        _args: Option<&str>,
    ) -> Result<Continuation> {
        robot.turn_right();
        Ok(Continuation::Continue)
    }
}

pub struct MoveCommand;

impl Command for MoveCommand {
    fn name(&self) -> &str {
        "MOVE"
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        _ctx: &mut SessionContext<'_>,
        _args: Option<&str>,
    ) -> Result<Continuation> {
        robot.move_forward();
        Ok(Continuation::Continue)
    }
}

/// Writes the robot position; silent until the robot is placed
pub struct ReportCommand;

impl Command for ReportCommand {
    fn name(&self) -> &str {
        "REPORT"
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        ctx: &mut SessionContext<'_>,
        _args: Option<&str>,
    ) -> Result<Continuation> {
        if let Some(pose) = robot.pose() {
            match ctx.format {
                OutputFormat::Text => writeln!(ctx.output, "{}", pose)?,
                OutputFormat::Json => {
                    json_output::output_event(ctx.output, &ReportEvent::new(pose))?
                }
            }
        }
        Ok(Continuation::Continue)
    }
}

/// Lists every registered command with its usage hint
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "HELP"
    }

    fn invoke(
        &self,
        _robot: &mut Robot,
        ctx: &mut SessionContext<'_>,
        _args: Option<&str>,
    ) -> Result<Continuation> {
        match ctx.format {
            OutputFormat::Text => {
                writeln!(ctx.output, "Usage:")?;
                writeln!(ctx.output, "-----")?;
                for command in ctx.registry.commands() {
                    if command.usage().is_empty() {
                        writeln!(ctx.output, "{}", command.name())?;
                    } else {
                        writeln!(ctx.output, "{} {}", command.name(), command.usage())?;
                    }
                }
                writeln!(ctx.output, "-----")?;
            }
            OutputFormat::Json => {
                let commands = ctx
                    .registry
                    .commands()
                    .map(|command| CommandUsage {
                        name: command.name().to_string(),
                        usage: command.usage().to_string(),
                    })
                    .collect();
                json_output::output_event(ctx.output, &HelpEvent::new(commands))?;
            }
        }
        Ok(Continuation::Continue)
    }
}

/// Adapter turning a closure into a [`Command`]
pub struct FnCommand<F> {
    name: String,
    usage: String,
    handler: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&mut Robot, &mut SessionContext<'_>, Option<&str>) -> Result<Continuation>,
{
    pub fn new(name: &str, usage: &str, handler: F) -> Self {
        Self {
            name: name.to_string(),
            usage: usage.to_string(),
            handler,
        }
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&mut Robot, &mut SessionContext<'_>, Option<&str>) -> Result<Continuation>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn usage(&self) -> &str {
        &self.usage
    }

    fn invoke(
        &self,
        robot: &mut Robot,
        ctx: &mut SessionContext<'_>,
        args: Option<&str>,
    ) -> Result<Continuation> {
        (self.handler)(robot, ctx, args)
    }
}
