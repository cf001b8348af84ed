mod options;

use std::io::{BufRead, Write};
use std::path::Path;

use itertools::Itertools;
pub use options::CrunchServerOptions;

use crate::prelude::*;

/// Serves cookie crunch over a line-oriented protocol: one command per line in, a reply block
/// ending in `ok` out.
pub struct CrunchServer<W: Write> {
    game: Option<Game>,
    options: CrunchServerOptions,
    rng: StdRng,
    out: W,
    running: bool,
}

impl<W: Write> CrunchServer<W> {
    /// Produces a new server that replies on `out`.
    pub fn new(options: CrunchServerOptions, out: W) -> CrunchServer<W> {
        CrunchServer {
            game: None,
            rng: options.rng(),
            options,
            out,
            running: true,
        }
    }

    /// Serves commands until `quit` or the end of the input.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            let cmdstr = line?;
            let args: Vec<&str> = cmdstr.split_whitespace().collect();
            let Some((cmd, rest)) = args.split_first() else {
                continue;
            };

            self.apply(cmd, rest)?;
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    /// Runs a command.
    fn apply(&mut self, cmd: &str, args: &[&str]) -> Result<()> {
        let result = match cmd
        {
            | "board" => self.board(),
            | "info" => self.info(),
            | "newgame" => self.new_game(args),
            | "quit" => self.quit(),
            | "score" => self.score(),
            | "shuffle" => self.shuffle(),
            | "swap" => self.swap(args),
            | "swaps" => self.swaps(),
            | _ => Err(anyhow!("unrecognized command {cmd}")),
        };

        match result
        {
            Ok(_) => {
                log::debug!("Command completed successfully: {cmd} {}", args.join(" "));
                self.ok()
            },
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err:#}");
                self.err(&err)
            },
        }
    }

    /// Starts a new game on the level in the given file, or on the configured level.
    fn new_game(&mut self, args: &[&str]) -> Result<()> {
        let path = args.first().map(Path::new);
        let level = self.options.load_level(path)?;
        let game = Game::new(level, StdRng::seed_from_u64(self.rng.random()))?;
        self.game = Some(game);

        self.board()?;
        self.score()
    }

    fn board(&mut self) -> Result<()> {
        let pretty = self.get()?.board().pretty();
        writeln!(self.out, "{pretty}")?;
        Ok(())
    }

    fn score(&mut self) -> Result<()> {
        let game = self.get()?;
        let status = match game.outcome() {
            Some(outcome) => format!(" {outcome}"),
            None => String::new(),
        };
        let line = format!("score {}/{} moves {}{status}", game.score(), game.target_score(), game.moves_left());
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn swaps(&mut self) -> Result<()> {
        let game = self.get()?;
        let swaps = game.board().possible_swaps().cloned().unwrap_or_default();
        let swapstr = swaps.iter().map(|swap| {
            let (a, b) = swap.coords();
            format!("{} {}", a.notate(), b.notate())
        }).join("; ");

        writeln!(self.out, "{}", swaps.len())?;
        writeln!(self.out, "{swapstr}")?;
        Ok(())
    }

    fn swap(&mut self, args: &[&str]) -> Result<()> {
        if args.is_empty() {
            return Err(anyhow!("no swap provided"));
        }
        let SwapString { repr: _, from, to } = args.join(" ").parse::<SwapString>()?;

        let game = self.get_mut()?;
        let swap = game.board().swap_between(&from, &to)?;
        let Some(report) = game.play_turn(&swap)? else {
            writeln!(self.out, "rejected {} {}", from.notate(), to.notate())?;
            return Ok(());
        };

        for step in report.steps.iter() {
            let chains = step.chains.iter().map(|chain| chain.to_string()).join("; ");
            writeln!(self.out, "step {} +{}: {chains}", step.step, step.score)?;
        }
        self.board()?;
        self.score()
    }

    fn shuffle(&mut self) -> Result<()> {
        self.get_mut()?.shuffle()?;
        self.board()?;
        self.score()
    }

    fn quit(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }

    // accessors

    /// Retrieves the game in a shared context.
    fn get(&self) -> Result<&Game> {
        self.game.as_ref().ok_or_else(|| anyhow!("no game in progress"))
    }

    /// Retrieves the game in a mutable context.
    fn get_mut(&mut self) -> Result<&mut Game> {
        self.game.as_mut().ok_or_else(|| anyhow!("no game in progress"))
    }

    // basic printers

    /// Prints the server's ID.
    fn info(&mut self) -> Result<()>
    {
        writeln!(
            self.out,
            "id {} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        Ok(())
    }

    /// Prints an error block.
    fn err(&mut self, err: &Error) -> Result<()>
    {
        writeln!(self.out, "err\n{err:#}")?;
        self.ok()
    }

    /// Prints the ok footer.
    fn ok(&mut self) -> Result<()>
    {
        writeln!(self.out, "ok")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(script: &str) -> String {
        let options = CrunchServerOptions { seed: Some(1), ..Default::default() };
        let mut out = vec![];
        CrunchServer::new(options, &mut out).run(script.as_bytes()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn info_and_unknown_commands() {
        let reply = serve("info\nfrobnicate\n");
        assert!(reply.starts_with(&format!("id {} v", env!("CARGO_PKG_NAME"))));
        assert!(reply.contains("err\nunrecognized command frobnicate\nok\n"));
    }

    #[test]
    fn commands_need_a_game() {
        let reply = serve("board\nswaps\n");
        assert_eq!(reply.matches("no game in progress").count(), 2);
    }

    #[test]
    fn newgame_prints_the_board_and_score() {
        let reply = serve("newgame\n");
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[..9].iter().all(|row| row.len() == 9));
        assert_eq!(lines[9], "score 0/1000 moves 15");
        assert_eq!(lines[10], "ok");
    }

    #[test]
    fn possible_swaps_can_be_played() {
        let mut server = CrunchServer::new(CrunchServerOptions { seed: Some(3), ..Default::default() }, vec![]);
        server.run("newgame\nswaps\n".as_bytes()).unwrap();
        let listing = String::from_utf8(server.out.clone()).unwrap();
        let first = listing.lines().nth(12).unwrap().split("; ").next().unwrap().to_owned();

        server.out.clear();
        server.run(format!("swap {first}\n").as_bytes()).unwrap();
        let reply = String::from_utf8(server.out.clone()).unwrap();
        assert!(reply.starts_with("step 1 +"));
        assert!(reply.contains("moves 14"));
        assert!(reply.ends_with("ok\n"));
    }

    #[test]
    fn malformed_swaps_are_reported() {
        let reply = serve("newgame\nswap 0,0 5,5\nswap\n");
        assert!(reply.contains("are not adjacent"));
        assert!(reply.contains("no swap provided"));
        assert!(reply.contains("score 0/1000 moves 15"));
    }

    #[test]
    fn shuffling_costs_a_move_and_quit_stops() {
        let reply = serve("newgame\nshuffle\nquit\nscore\n");
        assert!(reply.contains("score 0/1000 moves 14"));
        assert_eq!(reply.matches("ok\n").count(), 3);
    }
}
