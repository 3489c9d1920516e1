//! The engine puts all pieces together. It implements the [Universal Chess
//! Interface] (UCI) for communication with the client (e.g. tournament runner
//! with other engines or GUI/Lichess endpoint).
//!
//! [`Engine::uci_loop`] is the "main loop" of the engine which communicates
//! with the environment and executes commands from the input stream. Every
//! line goes through [`Engine::handle_line`], which makes the protocol easy to
//! drive from tests with in-memory buffers.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{bail, Context};
use tracing::{debug, warn};

use crate::chess::perft::divide;
use crate::chess::position::Position;
use crate::engine::uci::Command;
use crate::search::{select_move, Selection};

mod uci;

/// Protocol state of the [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UciState {
    /// No position was set yet.
    Idle,
    /// A position is set and no search is running.
    Ready,
    /// `go infinite` is running until `stop` or `quit`.
    Searching,
}

/// Tells the caller of [`Engine::handle_line`] whether to keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    #[allow(missing_docs)]
    Continue,
    /// `quit` was received.
    Quit,
}

struct Search {
    stop: Arc<AtomicBool>,
    worker: JoinHandle<Selection>,
}

/// The Engine connects everything together and handles commands sent by the
/// UCI server.
pub struct Engine {
    position: Position,
    state: UciState,
    debug: bool,
    search: Option<Search>,
}

impl Engine {
    /// Creates a new instance of the engine with starting position.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Position::starting(),
            state: UciState::Idle,
            debug: false,
            search: None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn state(&self) -> UciState {
        self.state
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Continuously reads the input stream and executes sent UCI commands until
    /// "quit" is sent or the input ends.
    ///
    /// Malformed and unsupported commands are skipped: the session only ends
    /// on `quit`, end of input or an I/O error.
    ///
    /// # Errors
    ///
    /// Fails if reading the input or writing the output fails.
    pub fn uci_loop(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = input
                .read_line(&mut line)
                .context("failed to read UCI input")?;
            if read == 0 {
                debug!("input closed");
                self.stop_search(output)?;
                break;
            }
            if self.handle_line(&line, output)? == Flow::Quit {
                break;
            }
            output.flush()?;
        }
        output.flush()?;
        Ok(())
    }

    /// Executes a single line of input.
    ///
    /// # Errors
    ///
    /// Fails if writing the output fails or the search thread can not be
    /// started or joined.
    pub fn handle_line(&mut self, line: &str, output: &mut impl Write) -> anyhow::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                debug!("ignoring line: {e}");
                self.info(output, &e.to_string())?;
                return Ok(Flow::Continue);
            },
        };
        debug!(?command, "received command");

        match command {
            Command::Uci => self.handle_uci(output)?,
            Command::Debug { on } => self.debug = on,
            Command::IsReady => writeln!(output, "readyok")?,
            Command::SetOption { name, value } => {
                debug!(%name, ?value, "ignoring option");
                self.info(output, &format!("no such option: {name}"))?;
            },
            Command::NewGame => {
                self.stop_search(output)?;
                self.position = Position::starting();
                self.state = UciState::Ready;
            },
            Command::SetPosition { fen, moves } => self.handle_position(fen, &moves, output)?,
            Command::Go { limits, infinite } => {
                debug!(?limits, infinite, "starting search");
                self.handle_go(infinite, output)?;
            },
            Command::Perft { depth } => self.handle_perft(depth, output)?,
            Command::Stop => self.stop_search(output)?,
            Command::Quit => {
                self.stop_search(output)?;
                return Ok(Flow::Quit);
            },
            Command::Display => {
                for line in format!("{:?}", self.position).lines() {
                    writeln!(output, "info string {line}")?;
                }
            },
            Command::Fen => writeln!(output, "{}", self.position.fen())?,
        }
        Ok(Flow::Continue)
    }

    /// Forwards diagnostics to the client in debug mode.
    fn info(&self, output: &mut impl Write, message: &str) -> anyhow::Result<()> {
        if self.debug {
            writeln!(output, "info string {message}")?;
        }
        Ok(())
    }

    /// Responds to the `uci` handshake command by identifying the engine.
    fn handle_uci(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(
            output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::engine_version()
        )?;
        writeln!(output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(output, "uciok")?;
        Ok(())
    }

    /// Changes the position of the board to the one specified in the command.
    /// The current position is kept if the FEN or any of the moves is invalid.
    fn handle_position(
        &mut self,
        fen: Option<String>,
        moves: &[String],
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let mut position = match fen {
            Some(fen) => match Position::from_fen(&fen) {
                Ok(position) => position,
                Err(e) => return Self::reject_position(&e, output),
            },
            None => Position::starting(),
        };
        for next_move in moves {
            let played = position
                .parse_uci_move(next_move)
                .and_then(|next_move| position.make_move(next_move));
            if let Err(e) = played {
                return Self::reject_position(&e, output);
            }
        }
        self.position = position;
        if self.state != UciState::Searching {
            self.state = UciState::Ready;
        }
        Ok(())
    }

    fn reject_position(error: &crate::error::Error, output: &mut impl Write) -> anyhow::Result<()> {
        warn!("rejected position: {error}");
        writeln!(output, "info string {error}")?;
        Ok(())
    }

    fn handle_go(&mut self, infinite: bool, output: &mut impl Write) -> anyhow::Result<()> {
        if self.state == UciState::Searching {
            debug!("search is already running");
            return Ok(());
        }
        if !infinite {
            let selection = select_move(&self.position, &AtomicBool::new(false));
            self.state = UciState::Ready;
            return Self::report(selection, output);
        }
        let stop = Arc::new(AtomicBool::new(false));
        let position = self.position.clone();
        let worker = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("search".to_string())
                .spawn(move || select_move(&position, &stop))
                .context("failed to start search thread")?
        };
        self.search = Some(Search { stop, worker });
        self.state = UciState::Searching;
        Ok(())
    }

    fn handle_perft(&mut self, depth: u8, output: &mut impl Write) -> anyhow::Result<()> {
        let mut total = 0;
        for (root_move, nodes) in divide(&self.position, depth) {
            writeln!(output, "{root_move}: {nodes}")?;
            total += nodes;
        }
        writeln!(output)?;
        writeln!(output, "Nodes searched: {total}")?;
        Ok(())
    }

    /// Stops the running search and prints its best move. No-op if there is
    /// no search.
    fn stop_search(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(search) = self.search.take() else {
            return Ok(());
        };
        search.stop.store(true, Ordering::Relaxed);
        let Ok(selection) = search.worker.join() else {
            bail!("search thread panicked");
        };
        debug!(nodes = selection.nodes, "search stopped");
        self.state = UciState::Ready;
        Self::report(selection, output)
    }

    fn report(selection: Selection, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(output, "info depth 1 nodes {}", selection.nodes)?;
        match selection.best {
            Some(best) => writeln!(output, "bestmove {best}")?,
            None => writeln!(output, "bestmove 0000")?,
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(input: &str) -> String {
        let mut engine = Engine::new();
        let mut output = Vec::new();
        engine
            .uci_loop(&mut input.as_bytes(), &mut output)
            .expect("in-memory I/O does not fail");
        String::from_utf8(output).expect("engine output is ASCII")
    }

    fn send(engine: &mut Engine, line: &str) -> (Flow, String) {
        let mut output = Vec::new();
        let flow = engine
            .handle_line(line, &mut output)
            .expect("in-memory I/O does not fail");
        (flow, String::from_utf8(output).expect("engine output is ASCII"))
    }

    #[test]
    fn handshake() {
        let output = run("uci\nisready\nquit\n");
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id name rookery "));
        assert_eq!(lines[1], format!("id author {}", env!("CARGO_PKG_AUTHORS")));
        assert_eq!(lines[2], "uciok");
        assert_eq!(lines[3], "readyok");
    }

    #[test]
    fn state_transitions() {
        let mut engine = Engine::new();
        assert_eq!(engine.state(), UciState::Idle);

        assert_eq!(send(&mut engine, "isready"), (Flow::Continue, "readyok\n".to_string()));
        assert_eq!(engine.state(), UciState::Idle);

        let _ = send(&mut engine, "position startpos moves e2e4");
        assert_eq!(engine.state(), UciState::Ready);

        let (_, output) = send(&mut engine, "go infinite");
        assert_eq!(output, "");
        assert_eq!(engine.state(), UciState::Searching);

        // Responds while searching.
        assert_eq!(send(&mut engine, "isready").1, "readyok\n");
        assert_eq!(engine.state(), UciState::Searching);

        let (_, output) = send(&mut engine, "stop");
        assert!(output.ends_with("bestmove a7a5\n"), "{output}");
        assert_eq!(engine.state(), UciState::Ready);

        // Stop without search is a no-op.
        assert_eq!(send(&mut engine, "stop").1, "");

        let _ = send(&mut engine, "go infinite");
        let (flow, output) = send(&mut engine, "quit");
        assert_eq!(flow, Flow::Quit);
        assert!(output.ends_with("bestmove a7a5\n"), "{output}");
    }

    #[test]
    fn go_from_idle_uses_starting_position() {
        let output = run("go wtime 1000 btime 1000\n");
        assert_eq!(output, "info depth 1 nodes 20\nbestmove a2a3\n");
    }

    #[test]
    fn go_picks_captures() {
        let output = run("position startpos moves e2e4 d7d5\ngo depth 3\n");
        assert!(output.ends_with("bestmove e4d5\n"), "{output}");
    }

    #[test]
    fn go_without_legal_moves() {
        let output = run("position startpos moves f2f3 e7e5 g2g4 d8h4\ngo\n");
        assert_eq!(output, "info depth 1 nodes 0\nbestmove 0000\n");
    }

    #[test]
    fn position_with_fen() {
        let output = run(
            "position fen r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1 \
             moves e1g1\nfen\n",
        );
        assert_eq!(
            output,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R4RK1 b kq - 1 1\n"
        );
    }

    #[test]
    fn invalid_positions_keep_previous() {
        let mut engine = Engine::new();
        let _ = send(&mut engine, "position startpos moves e2e4");
        let expected = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(engine.position().fen(), expected);

        let (flow, output) = send(&mut engine, "position startpos moves e2e4 e7e4");
        assert_eq!(flow, Flow::Continue);
        assert!(output.starts_with("info string illegal move e7e4"), "{output}");
        assert_eq!(engine.position().fen(), expected);

        let (_, output) = send(&mut engine, "position fen 8/8/8/8/8/8/8/8 w - - 0 1");
        assert!(output.starts_with("info string malformed FEN"), "{output}");
        assert_eq!(engine.position().fen(), expected);

        let (_, output) = send(&mut engine, "position startpos moves e2");
        assert!(output.starts_with("info string invalid move"), "{output}");
        assert_eq!(engine.position().fen(), expected);
    }

    #[test]
    fn perft() {
        let output = run("position startpos\ngo perft 2\n");
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "a2a3: 20");
        assert!(lines[..20].iter().all(|line| line.ends_with(": 20")));
        assert_eq!(lines[20], "");
        assert_eq!(lines[21], "Nodes searched: 400");
    }

    #[test]
    fn malformed_lines_are_ignored() {
        assert_eq!(run("foo\n\nposition\ndebug\nisready\n"), "readyok\n");
        assert_eq!(run("quit\nisready\n"), "");
    }

    #[test]
    fn debug_mode() {
        assert_eq!(run("setoption name Hash value 16\n"), "");
        assert_eq!(
            run("debug on\nsetoption name Hash value 16\nfoo\ndebug off\nbar\n"),
            "info string no such option: Hash\ninfo string unrecognized UCI command: \"foo\"\n"
        );
    }

    #[test]
    fn new_game() {
        let mut engine = Engine::new();
        let _ = send(&mut engine, "position startpos moves e2e4");
        let _ = send(&mut engine, "go infinite");
        let (_, output) = send(&mut engine, "ucinewgame");
        assert!(output.ends_with("bestmove a7a5\n"), "{output}");
        assert_eq!(engine.state(), UciState::Ready);
        assert_eq!(engine.position(), &Position::starting());
    }

    #[test]
    fn display() {
        let output = run("d\n");
        assert!(output.lines().all(|line| line.starts_with("info string")));
        assert!(output.ends_with(
            "info string FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"
        ));
    }
}
