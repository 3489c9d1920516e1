//! Parsing of the [UCI] commands sent to the engine.
//!
//! [UCI]: https://www.chessprogramming.org/UCI

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Uci,
    Debug {
        on: bool,
    },
    IsReady,
    SetOption {
        name: String,
        value: Option<String>,
    },
    SetPosition {
        /// `None` for `startpos`.
        fen: Option<String>,
        moves: Vec<String>,
    },
    NewGame,
    Go {
        limits: SearchLimits,
        infinite: bool,
    },
    Perft {
        depth: u8,
    },
    Stop,
    Quit,
    /// Prints the board.
    Display,
    /// Prints the FEN of the current position.
    Fen,
}

/// Limits sent with `go`. The move picker answers immediately, they are only
/// reported back in the logs.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct SearchLimits {
    pub(super) wtime: Option<u64>,
    pub(super) btime: Option<u64>,
    pub(super) winc: Option<u64>,
    pub(super) binc: Option<u64>,
    pub(super) movestogo: Option<u32>,
    pub(super) depth: Option<u32>,
    pub(super) nodes: Option<u64>,
    pub(super) mate: Option<u32>,
    pub(super) movetime: Option<u64>,
}

fn syntax_error(input: &str) -> Error {
    Error::ProtocolSyntax(input.trim().to_string())
}

fn parse_go(input: &str, parts: &[&str]) -> Result<Command> {
    if parts.get(1) == Some(&"perft") {
        return match parts.get(2).map(|depth| depth.parse()) {
            Some(Ok(depth)) => Ok(Command::Perft { depth }),
            _ => Err(syntax_error(input)),
        };
    }

    let mut limits = SearchLimits::default();
    let mut infinite = false;
    let mut tokens = parts[1..].iter();
    while let Some(&token) = tokens.next() {
        // Unknown tokens and malformed values are skipped.
        match token {
            "infinite" => infinite = true,
            "wtime" => limits.wtime = tokens.next().and_then(|v| v.parse().ok()),
            "btime" => limits.btime = tokens.next().and_then(|v| v.parse().ok()),
            "winc" => limits.winc = tokens.next().and_then(|v| v.parse().ok()),
            "binc" => limits.binc = tokens.next().and_then(|v| v.parse().ok()),
            "movestogo" => limits.movestogo = tokens.next().and_then(|v| v.parse().ok()),
            "depth" => limits.depth = tokens.next().and_then(|v| v.parse().ok()),
            "nodes" => limits.nodes = tokens.next().and_then(|v| v.parse().ok()),
            "mate" => limits.mate = tokens.next().and_then(|v| v.parse().ok()),
            "movetime" => limits.movetime = tokens.next().and_then(|v| v.parse().ok()),
            _ => {},
        }
    }
    Ok(Command::Go { limits, infinite })
}

fn parse_setoption(input: &str, parts: &[&str]) -> Result<Command> {
    if parts.get(1) != Some(&"name") || parts.len() < 3 {
        return Err(syntax_error(input));
    }
    let name_end = parts
        .iter()
        .position(|&x| x == "value")
        .unwrap_or(parts.len());
    if name_end <= 2 {
        return Err(syntax_error(input));
    }
    let name = parts[2..name_end].join(" ");
    let value = (name_end < parts.len()).then(|| parts[name_end + 1..].join(" "));
    Ok(Command::SetOption { name, value })
}

fn parse_setposition(input: &str, parts: &[&str]) -> Result<Command> {
    let moves_index = parts.iter().position(|&x| x == "moves");
    let setup = &parts[1..moves_index.unwrap_or(parts.len())];
    // Tokens before the setup keyword and after `startpos` are skipped, FEN
    // takes everything up to `moves`.
    let keyword = setup
        .iter()
        .position(|&x| x == "startpos" || x == "fen")
        .ok_or_else(|| syntax_error(input))?;
    let fen = match &setup[keyword..] {
        ["startpos", ..] => None,
        [_, fen @ ..] if !fen.is_empty() => Some(fen.join(" ")),
        _ => return Err(syntax_error(input)),
    };
    let moves = moves_index.map_or_else(Vec::new, |index| {
        parts[index + 1..]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    });
    Ok(Command::SetPosition { fen, moves })
}

impl Command {
    /// Parses a single line of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolSyntax`] for empty lines, unknown commands and
    /// known commands with missing mandatory arguments.
    pub(super) fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        let Some(&command) = parts.first() else {
            return Err(syntax_error(input));
        };

        match command {
            "uci" => Ok(Self::Uci),
            "debug" => match parts[1..].iter().find(|&&x| x == "on" || x == "off") {
                Some(&"on") => Ok(Self::Debug { on: true }),
                Some(_) => Ok(Self::Debug { on: false }),
                None => Err(syntax_error(input)),
            },
            "isready" => Ok(Self::IsReady),
            "setoption" => parse_setoption(input, &parts),
            "position" => parse_setposition(input, &parts),
            "ucinewgame" => Ok(Self::NewGame),
            "go" => parse_go(input, &parts),
            "stop" => Ok(Self::Stop),
            "quit" => Ok(Self::Quit),
            "d" => Ok(Self::Display),
            "fen" => Ok(Self::Fen),
            _ => Err(syntax_error(input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn unknown(input: &str) -> Result<Command> {
        Err(Error::ProtocolSyntax(input.to_string()))
    }

    #[test]
    fn parse_uci() {
        assert_eq!(Command::parse("uci"), Ok(Command::Uci));
        assert_eq!(Command::parse("  uci \n"), Ok(Command::Uci));
    }

    #[test]
    fn parse_debug() {
        assert_eq!(Command::parse("debug on"), Ok(Command::Debug { on: true }));
        assert_eq!(
            Command::parse("debug off"),
            Ok(Command::Debug { on: false })
        );
        assert_eq!(Command::parse("debug"), unknown("debug"));
        assert_eq!(Command::parse("debug maybe"), unknown("debug maybe"));
        assert_eq!(
            Command::parse("debug please on"),
            Ok(Command::Debug { on: true })
        );
    }

    #[test]
    fn parse_isready() {
        assert_eq!(Command::parse("isready"), Ok(Command::IsReady));
    }

    #[test]
    fn parse_setoption() {
        assert_eq!(
            Command::parse("setoption name Hash value 128"),
            Ok(Command::SetOption {
                name: "Hash".to_string(),
                value: Some("128".to_string())
            })
        );
        assert_eq!(
            Command::parse("setoption name Syzygy Path value /path/to/tablebase"),
            Ok(Command::SetOption {
                name: "Syzygy Path".to_string(),
                value: Some("/path/to/tablebase".to_string())
            })
        );
        assert_eq!(
            Command::parse("setoption name Clear Hash"),
            Ok(Command::SetOption {
                name: "Clear Hash".to_string(),
                value: None
            })
        );
        assert_eq!(
            Command::parse("setoption Hash value 1"),
            unknown("setoption Hash value 1")
        );
        assert_eq!(
            Command::parse("setoption name value 1"),
            unknown("setoption name value 1")
        );
    }

    #[test]
    fn parse_position() {
        assert_eq!(
            Command::parse("position startpos"),
            Ok(Command::SetPosition {
                fen: None,
                moves: vec![]
            })
        );
        assert_eq!(
            Command::parse("position startpos moves e2e4 e7e5"),
            Ok(Command::SetPosition {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            })
        );
        assert_eq!(
            Command::parse(
                "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 moves e2e4 e7e5"
            ),
            Ok(Command::SetPosition {
                fen: Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string()),
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            })
        );
        assert_eq!(Command::parse("position"), unknown("position"));
        assert_eq!(Command::parse("position fen"), unknown("position fen"));
        assert_eq!(
            Command::parse("position current"),
            unknown("position current")
        );
        assert_eq!(
            Command::parse("position startpos moves"),
            Ok(Command::SetPosition {
                fen: None,
                moves: vec![]
            })
        );
        // Unknown tokens around the setup keyword are skipped.
        assert_eq!(
            Command::parse("position startpos e2e4"),
            Ok(Command::SetPosition {
                fen: None,
                moves: vec![]
            })
        );
        assert_eq!(
            Command::parse("position from startpos junk moves e2e4"),
            Ok(Command::SetPosition {
                fen: None,
                moves: vec!["e2e4".to_string()]
            })
        );
        assert_eq!(
            Command::parse("position please fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Ok(Command::SetPosition {
                fen: Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1".to_string()),
                moves: vec![]
            })
        );
        assert_eq!(
            Command::parse("position fen moves e2e4"),
            unknown("position fen moves e2e4")
        );
    }

    #[test]
    fn ucinewgame() {
        assert_eq!(Command::parse("ucinewgame"), Ok(Command::NewGame));
    }

    #[test]
    fn parse_go() {
        assert_eq!(
            Command::parse(
                "go depth 20 wtime 300000 btime 300000 winc 10000 binc 10000 movestogo 40 \
                 nodes 500000 mate 10 movetime 5000 infinite"
            ),
            Ok(Command::Go {
                limits: SearchLimits {
                    wtime: Some(300_000),
                    btime: Some(300_000),
                    winc: Some(10000),
                    binc: Some(10000),
                    movestogo: Some(40),
                    depth: Some(20),
                    nodes: Some(500_000),
                    mate: Some(10),
                    movetime: Some(5000),
                },
                infinite: true,
            })
        );
        assert_eq!(
            Command::parse("go depth 10"),
            Ok(Command::Go {
                limits: SearchLimits {
                    depth: Some(10),
                    ..SearchLimits::default()
                },
                infinite: false,
            })
        );
        assert_eq!(
            Command::parse("go"),
            Ok(Command::Go {
                limits: SearchLimits::default(),
                infinite: false,
            })
        );
        assert_eq!(
            Command::parse("go infinite"),
            Ok(Command::Go {
                limits: SearchLimits::default(),
                infinite: true,
            })
        );
        // Unknown tokens are skipped.
        assert_eq!(
            Command::parse("go ponder wtime 1000 searchmoves"),
            Ok(Command::Go {
                limits: SearchLimits {
                    wtime: Some(1000),
                    ..SearchLimits::default()
                },
                infinite: false,
            })
        );
    }

    #[test]
    fn parse_perft() {
        assert_eq!(Command::parse("go perft 3"), Ok(Command::Perft { depth: 3 }));
        assert_eq!(Command::parse("go perft"), unknown("go perft"));
        assert_eq!(Command::parse("go perft -1"), unknown("go perft -1"));
    }

    #[test]
    fn parse_stop() {
        assert_eq!(Command::parse("stop"), Ok(Command::Stop));
    }

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_debug_commands() {
        assert_eq!(Command::parse("d"), Ok(Command::Display));
        assert_eq!(Command::parse("fen"), Ok(Command::Fen));
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(Command::parse("unknown command"), unknown("unknown command"));
        assert_eq!(Command::parse(""), unknown(""));
        assert_eq!(Command::parse("   "), unknown(""));
    }
}
