//! robosim - toy robot simulator
//!
//! A robot moves on a bounded table top in response to line-based commands
//! read from a file or typed interactively. Invalid placements and moves that
//! would take the robot off the table are ignored, so the robot is always
//! either unplaced or standing on a valid cell.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::VecDeque;
//! use robosim::{CommandRegistry, CommandStream, Grid};
//!
//! let registry = CommandRegistry::with_builtins()?;
//! let mut stream = CommandStream::new(registry, Grid::default(), Vec::new(), Vec::new());
//!
//! let mut input: VecDeque<String> = ["PLACE 0,0,NORTH", "MOVE", "REPORT"]
//!     .iter()
//!     .map(|line| line.to_string())
//!     .collect();
//! stream.run(None, &mut input)?;
//!
//! assert_eq!(String::from_utf8_lossy(stream.output()), "0,1,NORTH\n");
//! # Ok::<(), robosim::SimError>(())
//! ```
//!
//! # Architecture
//!
//! - **Grid**: table top dimensions and the position validity test
//! - **Robot**: placement/orientation state machine
//! - **CommandRegistry**: verb lookup over `Command` implementations
//! - **CommandStream**: session loop over a file or an interactive source

pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod json_output;
pub mod registry;
pub mod robot;
pub mod stream;

pub use command::{Command, Continuation, FnCommand, SessionContext};
pub use config::{OutputConfig, OutputFormat, SimConfig, TableConfig};
pub use error::{Result, SimError};
pub use grid::Grid;
pub use input::{InputSource, LineReader};
pub use registry::CommandRegistry;
pub use robot::{Orientation, Pose, Robot, RobotState};
pub use stream::{CommandStats, CommandStream, RunMode};
