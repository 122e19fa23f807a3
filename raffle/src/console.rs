//! Interactive console hooks
//!
//! Prints each draw as it happens and, when interactive, waits for Enter
//! before every reveal and asks winners whether they stay in.

use raffle_draw::{selector::chances, DrawHooks, Item, Ticket};
use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use tracing::warn;

const SEPARATOR: &str = "-----------------------------";

/// Console implementation of [`DrawHooks`] over any reader/writer pair.
pub struct ConsoleHooks<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl ConsoleHooks<StdinLock<'static>, Stdout> {
    /// Hooks bound to the process's stdin and stdout
    pub fn stdio(interactive: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> ConsoleHooks<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    /// Whether the hooks block on user input
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        let result = self
            .output
            .write_fmt(args)
            .and_then(|_| self.output.flush());
        if let Err(e) = result {
            warn!("Failed to write to console: {}", e);
        }
    }

    /// Read one line of input. `None` on end of input or read failure.
    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("Failed to read from console: {}", e);
                None
            }
        }
    }

    /// Print a prompt and wait for Enter. Does nothing when not interactive.
    pub fn wait_for_enter(&mut self, prompt: &str) {
        if !self.interactive {
            return;
        }
        self.emit(format_args!("{}\n", prompt));
        self.read_answer();
    }
}

impl<R: BufRead, W: Write> DrawHooks for ConsoleHooks<R, W> {
    fn on_item(&mut self, item: &Item, tickets: &[Ticket]) {
        self.emit(format_args!("Item {} with value {}\n", item.name, item.value));
        self.emit(format_args!("Eligible Participants:\n"));
        for (ticket, (_, chance)) in tickets.iter().zip(chances(tickets)) {
            self.emit(format_args!(
                "- Participant: {}, Previous Wins: {}, Chance: {:.1}%\n",
                ticket.name,
                ticket.wins,
                chance * 100.0
            ));
        }
    }

    fn pause(&mut self) {
        self.wait_for_enter("Press Enter to reveal the winner...");
    }

    fn on_winner(&mut self, item: &Item, winner: &str) {
        self.emit(format_args!(
            "Winner for item {} with value {}: {}\n",
            item.name, item.value, winner
        ));
        self.emit(format_args!("{}\n", SEPARATOR));
    }

    fn confirm_remain(&mut self, winner: &str) -> bool {
        if !self.interactive {
            return true;
        }

        self.emit(format_args!(
            "Would you like to remain in the following drawings, {}? (yes/no): ",
            winner
        ));
        match self.read_answer() {
            Some(answer) => {
                answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
            }
            // No answer at all keeps the winner in. A failed read lands here
            // too, already logged by read_answer.
            None => true,
        }
    }

    fn on_opt_out(&mut self, winner: &str) {
        self.emit(format_args!(
            "{} has opted out and will be removed from future drawings.\n",
            winner
        ));
    }

    fn on_skip(&mut self, item: &Item) {
        self.emit(format_args!(
            "Item {} with value {} has no eligible participants\n",
            item.name, item.value
        ));
        self.emit(format_args!("{}\n", SEPARATOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hooks(input: &str, interactive: bool) -> ConsoleHooks<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleHooks::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), interactive)
    }

    fn output(hooks: ConsoleHooks<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(hooks.into_output()).unwrap()
    }

    #[test]
    fn test_yes_keeps_winner() {
        let mut h = hooks("yes\nY\n", true);
        assert!(h.confirm_remain("alice"));
        assert!(h.confirm_remain("alice"));
    }

    #[test]
    fn test_anything_else_opts_out() {
        let mut h = hooks("no\n\nmaybe\n", true);
        assert!(!h.confirm_remain("alice"));
        assert!(!h.confirm_remain("alice"));
        assert!(!h.confirm_remain("alice"));
    }

    #[test]
    fn test_end_of_input_keeps_winner() {
        let mut h = hooks("", true);
        assert!(h.confirm_remain("alice"));
    }

    struct BrokenInput;

    impl io::Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "terminal gone"))
        }
    }

    #[test]
    fn test_read_failure_keeps_winner() {
        let input = io::BufReader::new(BrokenInput);
        let mut h = ConsoleHooks::new(input, Vec::new(), true);

        assert!(h.confirm_remain("alice"));
        let out = String::from_utf8(h.into_output()).unwrap();
        assert!(out.contains("remain in the following drawings, alice?"));
    }

    #[test]
    fn test_non_interactive_never_reads() {
        let mut h = hooks("no\n", false);
        h.pause();
        assert!(h.confirm_remain("alice"));

        let out = output(h);
        assert!(!out.contains("Press Enter"));
        assert!(!out.contains("remain"));
    }

    #[test]
    fn test_pause_consumes_one_line() {
        let mut h = hooks("\nno\n", true);
        h.pause();
        assert!(!h.confirm_remain("bob"));
    }

    #[test]
    fn test_item_listing_shows_wins_and_chances() {
        let mut h = hooks("", false);
        let item = Item::new("Lamp", 10, ["x", "y"]);
        let tickets = vec![Ticket::new("x", 1), Ticket::new("y", 0)];

        h.on_item(&item, &tickets);
        h.on_winner(&item, "y");

        let out = output(h);
        assert!(out.contains("Item Lamp with value 10"));
        assert!(out.contains("- Participant: x, Previous Wins: 1, Chance: 33.3%"));
        assert!(out.contains("- Participant: y, Previous Wins: 0, Chance: 66.7%"));
        assert!(out.contains("Winner for item Lamp with value 10: y"));
    }

    #[test]
    fn test_opt_out_and_skip_messages() {
        let mut h = hooks("", false);
        h.on_opt_out("x");
        h.on_skip(&Item::new("Mug", 5, Vec::<String>::new()));

        let out = output(h);
        assert!(out.contains("x has opted out"));
        assert!(out.contains("Item Mug with value 5 has no eligible participants"));
    }
}
