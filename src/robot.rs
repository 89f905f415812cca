//! Toy robot state machine
//!
//! The robot starts unplaced. Once placed on a grid it can move and turn,
//! but every mutation is checked first: commands issued before placement and
//! moves that would leave the table are ignored rather than reported as errors.
//! The robot is therefore never observable in an invalid position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::grid::Grid;

/// Compass direction the robot faces, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Rotate ninety degrees counter-clockwise
    pub fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Rotate ninety degrees clockwise
    pub fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Unit step `(dx, dy)` taken by a move in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token is not one of the four orientation names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrientation(pub String);

impl fmt::Display for UnknownOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown orientation: {}", self.0)
    }
}

impl std::error::Error for UnknownOrientation {}

impl FromStr for Orientation {
    type Err = UnknownOrientation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facing| facing.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOrientation(s.to_string()))
    }
}

/// Position and facing of a placed robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub facing: Orientation,
}

impl Pose {
    /// The pose one step ahead, or `None` if the coordinates would overflow
    fn step(&self) -> Option<Pose> {
        let (dx, dy) = self.facing.delta();
        Some(Pose {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            facing: self.facing,
        })
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.facing)
    }
}

/// Robot placement states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotState {
    #[default]
    Unplaced,
    Placed { pose: Pose, table: Grid },
}

#[derive(Debug, Clone, Default)]
pub struct Robot {
    state: RobotState,
}

impl Robot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.state, RobotState::Placed { .. })
    }

    /// Current pose, if the robot has been placed
    pub fn pose(&self) -> Option<Pose> {
        match self.state {
            RobotState::Placed { pose, .. } => Some(pose),
            RobotState::Unplaced => None,
        }
    }

    /// Put the robot on `table` at `(x, y)` facing `facing`.
    ///
    /// Ignored when the position is off the table; the previous state is kept.
    pub fn place(&mut self, x: i32, y: i32, facing: Orientation, table: &Grid) {
        if table.is_valid(x, y) {
            self.state = RobotState::Placed {
                pose: Pose { x, y, facing },
                table: *table,
            };
        }
    }

    /// Move one unit forward unless that would leave the table
    pub fn move_forward(&mut self) {
        if let RobotState::Placed { pose, table } = &mut self.state {
            if let Some(next) = pose.step().filter(|next| table.is_valid(next.x, next.y)) {
                *pose = next;
            }
        }
    }

    pub fn turn_left(&mut self) {
        self.turn(Orientation::left);
    }

    pub fn turn_right(&mut self) {
        self.turn(Orientation::right);
    }

    fn turn(&mut self, rotate: fn(Orientation) -> Orientation) {
        if let RobotState::Placed { pose, .. } = &mut self.state {
            pose.facing = rotate(pose.facing);
        }
    }

    /// `"x,y,FACING"` once placed, `None` before
    pub fn report(&self) -> Option<String> {
        self.pose().map(|pose| pose.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Grid {
        Grid::new(5, 5).unwrap()
    }

    fn placed(x: i32, y: i32, facing: Orientation) -> Robot {
        let mut robot = Robot::new();
        robot.place(x, y, facing, &table());
        robot
    }

    #[test]
    fn test_place_then_report_every_cell() {
        let table = table();
        for facing in Orientation::ALL {
            for x in 0..5 {
                for y in 0..5 {
                    let mut robot = Robot::new();
                    robot.place(x, y, facing, &table);
                    assert_eq!(robot.report(), Some(format!("{},{},{}", x, y, facing.name())));
                }
            }
        }
    }

    #[test]
    fn test_invalid_place_keeps_prior_state() {
        let mut robot = placed(2, 3, Orientation::South);
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (7, 7)] {
            robot.place(x, y, Orientation::North, &table());
            assert_eq!(robot.report().as_deref(), Some("2,3,SOUTH"));
        }
    }

    #[test]
    fn test_invalid_place_while_unplaced() {
        let mut robot = Robot::new();
        robot.place(5, 5, Orientation::North, &table());
        assert!(!robot.is_placed());
        assert_eq!(robot.report(), None);
    }

    #[test]
    fn test_commands_before_place_are_ignored() {
        let mut robot = Robot::new();
        robot.move_forward();
        robot.turn_left();
        robot.turn_right();
        assert_eq!(*robot.state(), RobotState::Unplaced);
        assert_eq!(robot.report(), None);
    }

    #[test]
    fn test_move_steps_in_facing_direction() {
        let mut robot = placed(2, 2, Orientation::North);
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("2,3,NORTH"));

        let mut robot = placed(2, 2, Orientation::East);
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("3,2,EAST"));

        let mut robot = placed(2, 2, Orientation::South);
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("2,1,SOUTH"));

        let mut robot = placed(2, 2, Orientation::West);
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("1,2,WEST"));
    }

    #[test]
    fn test_robot_never_leaves_table() {
        for i in 0..5 {
            let edges = [
                (i, 4, Orientation::North),
                (4, i, Orientation::East),
                (i, 0, Orientation::South),
                (0, i, Orientation::West),
            ];
            for (x, y, facing) in edges {
                let mut robot = placed(x, y, facing);
                robot.move_forward();
                assert_eq!(robot.pose(), Some(Pose { x, y, facing }));
            }
        }
    }

    #[test]
    fn test_move_validates_against_placement_table() {
        let narrow = Grid::new(1, 3).unwrap();
        let mut robot = Robot::new();
        robot.place(0, 0, Orientation::East, &narrow);
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("0,0,EAST"));
        robot.turn_left();
        robot.move_forward();
        robot.move_forward();
        robot.move_forward();
        assert_eq!(robot.report().as_deref(), Some("0,2,NORTH"));
    }

    #[test]
    fn test_rotation_cycles() {
        for facing in Orientation::ALL {
            let mut robot = placed(1, 1, facing);
            for _ in 0..4 {
                robot.turn_left();
            }
            assert_eq!(robot.pose().unwrap().facing, facing);

            for _ in 0..4 {
                robot.turn_right();
            }
            assert_eq!(robot.pose().unwrap().facing, facing);

            robot.turn_left();
            robot.turn_right();
            assert_eq!(robot.pose().unwrap().facing, facing);
        }
    }

    #[test]
    fn test_turn_order() {
        let mut robot = placed(0, 0, Orientation::North);
        robot.turn_right();
        assert_eq!(robot.pose().unwrap().facing, Orientation::East);
        robot.turn_right();
        assert_eq!(robot.pose().unwrap().facing, Orientation::South);
        robot.turn_left();
        robot.turn_left();
        robot.turn_left();
        assert_eq!(robot.pose().unwrap().facing, Orientation::West);
    }

    #[test]
    fn test_orientation_parse_is_case_insensitive() {
        assert_eq!("north".parse::<Orientation>(), Ok(Orientation::North));
        assert_eq!("WeSt".parse::<Orientation>(), Ok(Orientation::West));
        assert!("0".parse::<Orientation>().is_err());
        assert!("UP".parse::<Orientation>().is_err());
    }
}
