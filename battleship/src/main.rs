use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{value_t, App, Arg, ArgMatches};
use log::debug;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use seabattle::{
    AttackReport, FiringMode, FleetCounts, Ocean, Point, Session, ShipKind, ShotOutcome,
    MAX_SIDE,
};

/// Names of the positional arguments describing the ocean and the fleet, in order.
const OCEAN_ARGS: [&str; 7] = [
    "width",
    "height",
    "carriers",
    "battleships",
    "cruisers",
    "destroyers",
    "submarines",
];

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Single player command line battleship: sink a hidden fleet.")
        .arg(
            Arg::with_name("width")
                .index(1)
                .help("width of the ocean, from 1 to 30")
                .requires_all(&OCEAN_ARGS[1..]),
        )
        .arg(Arg::with_name("height").index(2).help("height of the ocean, from 1 to 30"))
        .arg(Arg::with_name("carriers").index(3).help("number of carriers"))
        .arg(Arg::with_name("battleships").index(4).help("number of battleships"))
        .arg(Arg::with_name("cruisers").index(5).help("number of cruisers"))
        .arg(Arg::with_name("destroyers").index(6).help("number of destroyers"))
        .arg(Arg::with_name("submarines").index(7).help("number of submarines"))
        .arg(
            Arg::with_name("torpedoes")
                .short("t")
                .long("torpedoes")
                .value_name("N")
                .help("pre-specify the number of torpedoes, 0 disables torpedo mode")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("recovery")
                .short("r")
                .long("recovery")
                .value_name("MODE")
                .help("pre-specify whether ship recovery mode is on")
                .takes_value(true)
                .possible_values(&["on", "off", "yes", "no"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed the fleet placement to get a reproducible game")
                .takes_value(true),
        )
        .get_matches();

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = if matches.is_present("seed") {
        StdRng::seed_from_u64(value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit()))
    } else {
        StdRng::from_entropy()
    };

    let mut preset = ocean_from_args(&matches);
    let mut session = loop {
        let (width, height, fleet) = match preset.take() {
            Some(preset) => preset,
            None => choose_ocean(&mut input)?,
        };
        match Session::configure_with_rng(width, height, fleet, &mut rng) {
            Ok(session) => break session,
            Err(err) => {
                println!("{}", err);
                if !choose_new_game(&mut input)? {
                    return Ok(());
                }
            }
        }
    };

    let ship_count = session.ocean().ship_count();
    let torpedoes = choose_torpedoes(&matches, ship_count, &mut input)?;
    let recovery = choose_recovery(&matches, ship_count, &mut input)?;
    session
        .set_mode(torpedoes > 0, torpedoes, recovery)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    play(&mut session, &mut input)
}

/// Read the ocean and fleet from the positional args, if they were given.
fn ocean_from_args(matches: &ArgMatches) -> Option<(usize, usize, FleetCounts)> {
    if !matches.is_present("width") {
        return None;
    }
    let mut values = [0; 7];
    for (value, &name) in values.iter_mut().zip(OCEAN_ARGS.iter()) {
        *value = value_t!(matches, name, usize).unwrap_or_else(|e| e.exit());
    }
    let [width, height, fleet @ ..] = values;
    Some((width, height, FleetCounts::from(fleet)))
}

/// Ask the player for the size of the ocean and the number of ships of each kind.
fn choose_ocean<B: BufRead>(
    input: &mut InputReader<B>,
) -> io::Result<(usize, usize, FleetCounts)> {
    let width = read_in_range(
        input,
        &format!("Enter the horizontal size of the ocean (from 1 to {}):", MAX_SIDE),
        1,
        MAX_SIDE,
    )?;
    let height = read_in_range(
        input,
        &format!("Enter the vertical size of the ocean (from 1 to {}):", MAX_SIDE),
        1,
        MAX_SIDE,
    )?;
    let mut counts = [0; 5];
    for (count, &kind) in counts.iter_mut().zip(ShipKind::ALL) {
        *count = input.read_input(&format!("Enter number of {}s:", kind.name()), |input| {
            match input.parse() {
                Ok(count) => Some(count),
                Err(_) => {
                    println!("Enter an integer no less than 0.");
                    None
                }
            }
        })?;
    }
    Ok((width, height, FleetCounts::from(counts)))
}

/// Ask whether to start over after the fleet could not be placed. Returns `false` if
/// the player wants to exit.
fn choose_new_game<B: BufRead>(input: &mut InputReader<B>) -> io::Result<bool> {
    println!("=========== Battleship ===========");
    println!("| 1. New game                    |");
    println!("| 2. Exit                        |");
    println!("==================================");
    Ok(read_in_range(input, ">", 1, 2)? == 1)
}

/// Choose the number of torpedoes based on either args or cli input. At most one
/// torpedo per ship can be chosen.
fn choose_torpedoes<B: BufRead>(
    matches: &ArgMatches,
    ship_count: usize,
    input: &mut InputReader<B>,
) -> io::Result<usize> {
    if matches.is_present("torpedoes") {
        let torpedoes = value_t!(matches, "torpedoes", usize).unwrap_or_else(|e| e.exit());
        if torpedoes <= ship_count {
            return Ok(torpedoes);
        }
        println!(
            "Cannot take {} torpedoes against a fleet of {} ships.",
            torpedoes, ship_count
        );
    }
    if ship_count == 0 {
        return Ok(0);
    }
    if !choose_mode(input, "Torpedo firing mode")? {
        return Ok(0);
    }
    read_in_range(
        input,
        "Enter the number of available torpedoes:",
        1,
        ship_count,
    )
}

/// Choose whether recovery mode is on based on either args or cli input.
fn choose_recovery<B: BufRead>(
    matches: &ArgMatches,
    ship_count: usize,
    input: &mut InputReader<B>,
) -> io::Result<bool> {
    Ok(match matches.value_of("recovery") {
        Some(choice) => match choice.to_ascii_lowercase().as_str() {
            "on" | "yes" => true,
            "off" | "no" => false,
            _ => unreachable!(),
        },
        None if ship_count == 0 => false,
        None => choose_mode(input, "Ship recovery mode")?,
    })
}

/// Show the enabled/disabled menu for a mode and read the choice.
fn choose_mode<B: BufRead>(input: &mut InputReader<B>, mode: &str) -> io::Result<bool> {
    println!("=========== Battleship ===========");
    println!("| 1. {} enabled", mode);
    println!("| 2. {} disabled", mode);
    println!("==================================");
    Ok(read_in_range(input, ">", 1, 2)? == 1)
}

/// Read a number in the inclusive range `[min, max]`.
fn read_in_range<B: BufRead>(
    input: &mut InputReader<B>,
    prompt: &str,
    min: usize,
    max: usize,
) -> io::Result<usize> {
    input.read_input(prompt, |input| match input.parse() {
        Ok(val) if val >= min && val <= max => Some(val),
        _ => {
            println!("Enter an integer from {} to {}.", min, max);
            None
        }
    })
}

/// Command entered during the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Shoot(Point, FiringMode),
    Help,
    Exit,
}

/// Parse one line of player input. Expects the line to already be trimmed.
fn parse_command(input: &str) -> Option<Command> {
    /// Matcher for shots, with an optional torpedo marker.
    static SHOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:(?P<torpedo>[tT])\s+)?
        (?P<x>-?[0-9]+)(?:\s*,\s*|\s+)(?P<y>-?[0-9]+)$",
        )
        .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(Command::Help),
        "exit" | "quit" | "q" => Some(Command::Exit),
        other => {
            let captures = SHOT.captures(other)?;
            let x = captures.name("x")?.as_str().parse().ok()?;
            let y = captures.name("y")?.as_str().parse().ok()?;
            let firing = if captures.name("torpedo").is_some() {
                FiringMode::Torpedo
            } else {
                FiringMode::General
            };
            Some(Command::Shoot(Point::new(x, y), firing))
        }
    }
}

/// Run the turn loop until the fleet is sunk or the player exits.
fn play<B: BufRead>(session: &mut Session, input: &mut InputReader<B>) -> io::Result<()> {
    let mut view = OceanView::new(session.ocean());
    view.show(session, "");
    loop {
        if session.is_over() {
            println!("  You sank the whole fleet!");
            println!("     Total shots: {}", session.shots_fired());
            return Ok(());
        }
        let cmd = input.read_input_lower(
            "Enter command (coordinates to shoot, \"help\" or \"exit\"):",
            |input| {
                let cmd = parse_command(input);
                if cmd.is_none() {
                    println!("Incorrect command format. Enter \"help\" to see details.");
                }
                cmd
            },
        )?;
        match cmd {
            Command::Exit => {
                println!("The fleet was hidden here:");
                show_revealed_board(session.ocean());
                return Ok(());
            }
            Command::Help => print_help(),
            Command::Shoot(point, firing) => match session.attack(point, firing) {
                Err(err) => println!("{}", err),
                Ok(report) => {
                    let mut message = view.record(&report, session.ocean());
                    if let Some(points) = session.take_pending_recovery() {
                        debug!("hiding {} recovered cells", points.len());
                        view.forget(&points);
                        message.push_str("\nThe damaged ship was repaired.");
                    }
                    view.show(session, &message);
                }
            },
        }
    }
}

fn print_help() {
    println!(
        "Available Commands:
    <x> <y>      fire at the given cell, counting from 0 at the top left.
    t <x> <y>    fire a torpedo at the given cell, sinking any ship there outright.
    help         show this help.
    exit         leave the game."
    );
}

/// What the player knows about a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum CellView {
    Unknown,
    Miss,
    Hit,
    Sunk(ShipKind),
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CellView::Unknown => f.pad("~~"),
            CellView::Miss => f.pad("."),
            CellView::Hit => f.pad("*"),
            CellView::Sunk(kind) => f.pad(&format!("x{}", kind.abbrev())),
        }
    }
}

/// The player's picture of the ocean, built only from attack reports.
#[derive(Debug, Clone)]
struct OceanView {
    width: usize,
    height: usize,
    cells: Vec<CellView>,
}

impl OceanView {
    fn new(ocean: &Ocean) -> Self {
        let dim = ocean.dimensions();
        Self {
            width: dim.width(),
            height: dim.height(),
            cells: vec![CellView::Unknown; dim.total_size()],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    fn get(&self, point: Point) -> Option<CellView> {
        self.index(point).map(|idx| self.cells[idx])
    }

    fn set(&mut self, point: Point, cell: CellView) {
        if let Some(idx) = self.index(point) {
            self.cells[idx] = cell;
        }
    }

    /// Update the view from an attack report. Returns the message to show the player.
    fn record(&mut self, report: &AttackReport, ocean: &Ocean) -> String {
        if self.index(report.position()).is_none() {
            return "Attacking position was out of the ocean.".to_string();
        }
        match report.outcome() {
            ShotOutcome::Miss => {
                self.set(report.position(), CellView::Miss);
                "Miss.".to_string()
            }
            ShotOutcome::Hit(_) => {
                self.set(report.position(), CellView::Hit);
                "Hit!".to_string()
            }
            ShotOutcome::Sunk(id) => {
                let kind = match ocean.ship(id) {
                    Some(ship) => ship.kind(),
                    None => return String::new(),
                };
                for &point in report.occupied_points().unwrap_or_default() {
                    self.set(point, CellView::Sunk(kind));
                }
                format!("You just sank a {}!", kind)
            }
        }
    }

    /// Hide the given cells again.
    fn forget(&mut self, points: &[Point]) {
        for &point in points {
            self.set(point, CellView::Unknown);
        }
    }

    /// Print the view with its legend and a message.
    fn show(&self, session: &Session, message: &str) {
        let rule = self.width * 4 + 3;
        println!("{}", "=".repeat(rule));
        show_board(
            self.width,
            self.cells.chunks(self.width.max(1)).map(|row| row.iter()),
        );
        println!("\".\" - miss  \"*\" - hit  \"x\" - sunk");
        if session.torpedoes_remaining() > 0 {
            println!("Torpedoes left: {}", session.torpedoes_remaining());
        }
        if !message.is_empty() {
            println!("{}", message);
        }
        println!("{}", "-".repeat(rule));
    }
}

/// Print out the fully-revealed ocean.
fn show_revealed_board(ocean: &Ocean) {
    enum RevealedCell {
        Empty,
        Afloat(ShipKind),
        Sunk(ShipKind),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Afloat(kind) => f.pad(kind.abbrev()),
                RevealedCell::Sunk(kind) => f.pad(&format!("x{}", kind.abbrev())),
            }
        }
    }
    show_board(
        ocean.dimensions().width(),
        ocean.iter_rows().map(move |row| {
            row.map(move |cell| match cell.and_then(|id| ocean.ship(id)) {
                None => RevealedCell::Empty,
                Some(ship) if ship.sunk() => RevealedCell::Sunk(ship.kind()),
                Some(ship) => RevealedCell::Afloat(ship.kind()),
            })
        }),
    )
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(width: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..width {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
