//! Slack added around boarding, alighting and transfers.

use std::fmt;

/// Supplies the slack times, in seconds, a transit search adds on top of
/// the timetable.
pub trait SlackProvider: fmt::Debug + Send + Sync {
    fn board_slack(&self) -> u32;

    fn alight_slack(&self) -> u32;

    fn transfer_slack(&self) -> u32;
}

/// The same slack everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSlackProvider {
    pub board: u32,
    pub alight: u32,
    pub transfer: u32,
}

impl Default for DefaultSlackProvider {
    fn default() -> Self {
        Self {
            board: 0,
            alight: 0,
            transfer: 60,
        }
    }
}

impl SlackProvider for DefaultSlackProvider {
    fn board_slack(&self) -> u32 {
        self.board
    }

    fn alight_slack(&self) -> u32 {
        self.alight
    }

    fn transfer_slack(&self) -> u32 {
        self.transfer
    }
}
