//! Command line decoding
//!
//! A command line is a run of ASCII tokens separated by spaces or tabs.
//! The first token names the action, the remaining tokens are unsigned
//! decimal arguments:
//!
//! ```text
//! forward|f   <speed> <mm>        backward|b  <speed> <mm>
//! left|l      <speed> <degrees>   right|r     <speed> <degrees>
//! step_left   <speed> <steps>     step_right  <speed> <steps>
//! step_both   <speed> <steps>     distance    on|off
//! stop|s
//! ```

mod message;
mod token;

pub use message::{Command, CommandError};
pub use token::{parse_number, tokenize, Tokens};
