//! Typed commands

use super::token::{parse_number, tokenize, Tokens};
use crate::config::MAX_TOKENS;

/// Command decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line holds no tokens
    Empty,
    /// First token names no known action, or `distance` got a bad switch
    UnknownCommand,
    /// Line holds more tokens than any command accepts
    TooManyTokens,
}

/// Decoded command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Forward { speed: u16, mm: u32 },
    Backward { speed: u16, mm: u32 },
    Left { speed: u16, degrees: u32 },
    Right { speed: u16, degrees: u32 },
    StepLeft { speed: u16, steps: u32 },
    StepRight { speed: u16, steps: u32 },
    StepBoth { speed: u16, steps: u32 },
    /// Enable or disable the telemetry bar
    Distance(bool),
    /// Halt both wheels
    Stop,
}

impl Command {
    /// Decode one received line
    ///
    /// Missing numeric arguments read as 0. Speeds above `u16::MAX`
    /// saturate; the wheel generator clamps them further.
    pub fn parse(line: &[u8]) -> Result<Self, CommandError> {
        let mut tokens: Tokens<'_, MAX_TOKENS> = Tokens::new();
        tokenize(line, &mut tokens)?;

        let (&name, args) = tokens.split_first().ok_or(CommandError::Empty)?;
        let arg = |index: usize| args.get(index).map_or(0, |t| parse_number(t));
        let speed = u16::try_from(arg(0)).unwrap_or(u16::MAX);

        let command = match name {
            b"f" | b"forward" => Command::Forward { speed, mm: arg(1) },
            b"b" | b"backward" => Command::Backward { speed, mm: arg(1) },
            b"l" | b"left" => Command::Left {
                speed,
                degrees: arg(1),
            },
            b"r" | b"right" => Command::Right {
                speed,
                degrees: arg(1),
            },
            b"step_left" => Command::StepLeft {
                speed,
                steps: arg(1),
            },
            b"step_right" => Command::StepRight {
                speed,
                steps: arg(1),
            },
            b"step_both" => Command::StepBoth {
                speed,
                steps: arg(1),
            },
            b"distance" => match args.first().copied() {
                Some(b"on") => Command::Distance(true),
                Some(b"off") => Command::Distance(false),
                _ => return Err(CommandError::UnknownCommand),
            },
            b"s" | b"stop" => Command::Stop,
            _ => return Err(CommandError::UnknownCommand),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_motion() {
        assert_eq!(
            Command::parse(b"forward 10 200"),
            Ok(Command::Forward { speed: 10, mm: 200 })
        );
        assert_eq!(
            Command::parse(b"b 3 15"),
            Ok(Command::Backward { speed: 3, mm: 15 })
        );
        assert_eq!(
            Command::parse(b"l 8 90"),
            Ok(Command::Left {
                speed: 8,
                degrees: 90
            })
        );
        assert_eq!(
            Command::parse(b"right 8 45"),
            Ok(Command::Right {
                speed: 8,
                degrees: 45
            })
        );
    }

    #[test]
    fn test_parse_raw_steps() {
        assert_eq!(
            Command::parse(b"step_left 5 100"),
            Ok(Command::StepLeft {
                speed: 5,
                steps: 100
            })
        );
        assert_eq!(
            Command::parse(b"step_right 5 7"),
            Ok(Command::StepRight { speed: 5, steps: 7 })
        );
        assert_eq!(
            Command::parse(b"step_both 1 2"),
            Ok(Command::StepBoth { speed: 1, steps: 2 })
        );
    }

    #[test]
    fn test_missing_arguments_read_zero() {
        assert_eq!(
            Command::parse(b"forward"),
            Ok(Command::Forward { speed: 0, mm: 0 })
        );
        assert_eq!(
            Command::parse(b"step_both 9"),
            Ok(Command::StepBoth { speed: 9, steps: 0 })
        );
    }

    #[test]
    fn test_speed_saturates() {
        assert_eq!(
            Command::parse(b"f 70000 1"),
            Ok(Command::Forward {
                speed: u16::MAX,
                mm: 1
            })
        );
    }

    #[test]
    fn test_distance_switch() {
        assert_eq!(Command::parse(b"distance on"), Ok(Command::Distance(true)));
        assert_eq!(Command::parse(b"distance off"), Ok(Command::Distance(false)));
        assert_eq!(
            Command::parse(b"distance"),
            Err(CommandError::UnknownCommand)
        );
        assert_eq!(
            Command::parse(b"distance maybe"),
            Err(CommandError::UnknownCommand)
        );
    }

    #[test]
    fn test_stop() {
        assert_eq!(Command::parse(b"s"), Ok(Command::Stop));
        assert_eq!(Command::parse(b"stop"), Ok(Command::Stop));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Command::parse(b""), Err(CommandError::Empty));
        assert_eq!(Command::parse(b" \t "), Err(CommandError::Empty));
        assert_eq!(Command::parse(b"jump 1"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse(b"FORWARD 1 1"), Err(CommandError::UnknownCommand));
        assert_eq!(
            Command::parse(b"f 1 2 3 4 5"),
            Err(CommandError::TooManyTokens)
        );
    }
}
