//! Main-loop controller
//!
//! Ties the serial link, the drive and the rangefinder together. The
//! platform calls [`Controller::announce`] once after its peripherals are
//! initialised and interrupts are enabled, then calls
//! [`Controller::poll`] forever.

use crate::command::{Command, CommandError};
use crate::config::TelemetryConfig;
use crate::log::{log_debug, log_info, log_warn};
use crate::motion::Drive;
use crate::telemetry::Telemetry;
use crate::traits::{Line, LineSink, LineSource, RangeReadings, StepChannel};

/// Startup banner
pub const BANNER: &[u8] = b"Initing\n";

/// Reply to a line that names no known command
pub const NOT_UNDERSTOOD: &[u8] = b"not";

/// Cooperative main-loop state
pub struct Controller<'a, S, L, R, G, const C: usize> {
    serial: &'a S,
    drive: Drive<'a, L, R>,
    ranging: &'a G,
    telemetry: Telemetry,
}

impl<'a, S, L, R, G, const C: usize> Controller<'a, S, L, R, G, C>
where
    S: LineSource<C> + LineSink,
    L: StepChannel,
    R: StepChannel,
    G: RangeReadings,
{
    pub fn new(
        serial: &'a S,
        drive: Drive<'a, L, R>,
        ranging: &'a G,
        telemetry: TelemetryConfig,
    ) -> Self {
        Self {
            serial,
            drive,
            ranging,
            telemetry: Telemetry::new(telemetry),
        }
    }

    /// Send the startup banner
    pub fn announce(&self) {
        log_info!("controller up");
        self.serial.send_bytes(BANNER);
    }

    /// Run one main-loop iteration
    ///
    /// Executes every waiting command line, then emits a telemetry bar if
    /// a sweep completed since the last one. Returns the number of lines
    /// consumed.
    pub fn poll(&mut self) -> usize {
        let mut line = Line::<C>::new();
        let mut handled = 0;
        while self.serial.available_lines() > 0 {
            self.serial.pop_line(&mut line);
            self.dispatch(&line);
            handled += 1;
        }

        if self.telemetry.due(self.ranging.sweeps()) {
            let bar = self.telemetry.render(self.ranging);
            self.serial.send_line(&bar);
        }
        handled
    }

    /// Decode and execute one line
    pub fn dispatch(&mut self, line: &[u8]) {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(CommandError::Empty) => {}
            Err(error) => {
                log_warn!("rejected line ({} bytes): {}", line.len(), error);
                self.serial.send_line(NOT_UNDERSTOOD);
            }
        }
    }

    pub fn execute(&mut self, command: Command) {
        log_debug!("execute {}", command);
        match command {
            Command::Forward { speed, mm } => self.drive.forward(speed, mm),
            Command::Backward { speed, mm } => self.drive.backward(speed, mm),
            Command::Left { speed, degrees } => self.drive.left(speed, degrees),
            Command::Right { speed, degrees } => self.drive.right(speed, degrees),
            Command::StepLeft { speed, steps } => self.drive.step_left(speed, steps),
            Command::StepRight { speed, steps } => self.drive.step_right(speed, steps),
            Command::StepBoth { speed, steps } => self.drive.step_both(speed, steps),
            Command::Distance(true) => self.telemetry.enable(self.ranging.sweeps()),
            Command::Distance(false) => self.telemetry.disable(),
            Command::Stop => self.drive.stop(),
        }
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn drive(&self) -> &Drive<'a, L, R> {
        &self.drive
    }
}
