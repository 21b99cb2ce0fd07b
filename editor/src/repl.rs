use std::io::{self, BufRead, Write};

use crate::commands::{Command, Reply};
use crate::session::Session;

/// Reads commands line by line until `quit` or end of input.
///
/// Command output goes to `output`, followed by the banners whenever they
/// change. Errors are printed and shown in the error banner; they never end
/// the loop.
pub fn run(session: &mut Session, input: impl BufRead, output: &mut impl Write) -> io::Result<()> {
    session.pump_events();
    print_status(session, output)?;

    for line in input.lines() {
        let line = line?;
        session.status_mut().clear_error();

        let reply = match Command::parse(&line) {
            Ok(Some(command)) => session.execute(command),
            Ok(None) => Ok(Reply::Output(Vec::new())),
            Err(err) => Err(err),
        };
        match reply {
            Ok(Reply::Quit) => break,
            Ok(Reply::Output(lines)) => {
                for line in lines {
                    writeln!(output, "{line}")?;
                }
            }
            Err(err) => {
                writeln!(output, "error: {err}")?;
                session.status_mut().set_error(err.banner());
            }
        }

        session.pump_events();
        print_status(session, output)?;
    }
    output.flush()
}

fn print_status(session: &mut Session, output: &mut impl Write) -> io::Result<()> {
    if session.status_mut().take_changed() {
        for line in session.status().lines() {
            writeln!(output, "{line}")?;
        }
    }
    Ok(())
}
