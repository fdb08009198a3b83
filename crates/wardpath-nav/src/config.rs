//! Command-line configuration.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use wardpath_core::{Cell, FloorGrid, GridError, Tile, hospital, landmark};

/// Usage text printed for `--help`.
pub const HELP: &str = "\
wardpath - hospital floor-plan navigator (A* over a 4-connected grid)

USAGE:
    wardpath [OPTIONS]
    wardpath [OPTIONS] --route <FROM> <TO>

OPTIONS:
    -p, --plan <FILE>         Floor plan file (digits 0-3, one row per line)
    -r, --route <FROM> <TO>   Print one route and exit; endpoints are ROW,COL
                              or a landmark name (built-in plan only)
        --json                With --route, print the result as JSON
        --no-explored         Do not draw explored cells
        --no-mouse            Do not capture the mouse
    -h, --help                Print help information

TILES:
    0 walkable   1 wall   2 patient room   3 special area

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=debug) to change the log level.
";

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Terminal front-end.
    Interactive,
    /// Headless: search once between two endpoints.
    Route { from: String, to: String },
}

/// Navigator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavConfig {
    /// Floor plan file; `None` uses the built-in hospital.
    pub plan: Option<PathBuf>,
    pub mode: Mode,
    pub json: bool,
    pub show_explored: bool,
    pub mouse: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            plan: None,
            mode: Mode::Interactive,
            json: false,
            show_explored: true,
            mouse: true,
        }
    }
}

/// Result of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(NavConfig),
    Help,
}

/// Errors from argument parsing and plan loading.
#[derive(Debug)]
pub enum ConfigError {
    UnknownArgument(String),
    MissingValue(&'static str),
    /// An endpoint is neither `ROW,COL` nor a known landmark.
    BadEndpoint(String),
    ReadPlan { path: PathBuf, source: io::Error },
    Plan(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(a) => write!(f, "unknown argument: {a} (try --help)"),
            Self::MissingValue(flag) => write!(f, "{flag} requires a value"),
            Self::BadEndpoint(s) => {
                write!(f, "\u{201c}{s}\u{201d} is neither ROW,COL nor a landmark")
            }
            Self::ReadPlan { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Plan(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadPlan { source, .. } => Some(source),
            Self::Plan(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Plan(e)
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg = NavConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--plan" | "-p" => {
                let v = args.next().ok_or(ConfigError::MissingValue("--plan"))?;
                cfg.plan = Some(PathBuf::from(v));
            }
            "--route" | "-r" => {
                let from = args.next().ok_or(ConfigError::MissingValue("--route"))?;
                let to = args.next().ok_or(ConfigError::MissingValue("--route"))?;
                cfg.mode = Mode::Route { from, to };
            }
            "--json" => cfg.json = true,
            "--no-explored" => cfg.show_explored = false,
            "--no-mouse" => cfg.mouse = false,
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    Ok(Command::Run(cfg))
}

impl NavConfig {
    /// Whether the built-in hospital plan (and its landmarks) is in use.
    pub fn builtin_plan(&self) -> bool {
        self.plan.is_none()
    }

    /// Load the configured floor plan.
    pub fn load_grid(&self) -> Result<FloorGrid, ConfigError> {
        let Some(path) = &self.plan else {
            return Ok(hospital());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadPlan {
            path: path.clone(),
            source,
        })?;
        let grid = FloorGrid::parse(&text)?;
        log::info!(
            "Loaded {} floor plan from {} ({} walls)",
            grid.bounds(),
            path.display(),
            grid.count(Tile::Wall)
        );
        Ok(grid)
    }

    /// Turn an endpoint argument into a cell. Landmark names are only
    /// accepted with the built-in plan.
    pub fn resolve(&self, text: &str) -> Result<Cell, ConfigError> {
        if let Ok(c) = text.parse::<Cell>() {
            return Ok(c);
        }
        if self.builtin_plan() {
            if let Some(l) = landmark(text) {
                return Ok(l.cell);
            }
        }
        Err(ConfigError::BadEndpoint(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn run(v: &[&str]) -> NavConfig {
        match parse_args(args(v)).unwrap() {
            Command::Run(cfg) => cfg,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(run(&[]), NavConfig::default());
        assert!(NavConfig::default().builtin_plan());
    }

    #[test]
    fn route_and_flags() {
        let cfg = run(&["--route", "Emergency", "3,4", "--json", "--no-explored", "--no-mouse"]);
        assert_eq!(
            cfg.mode,
            Mode::Route {
                from: "Emergency".into(),
                to: "3,4".into()
            }
        );
        assert!(cfg.json && !cfg.show_explored && !cfg.mouse);
    }

    #[test]
    fn help_and_errors() {
        assert_eq!(parse_args(args(&["-h"])).unwrap(), Command::Help);
        assert!(matches!(
            parse_args(args(&["--bogus"])),
            Err(ConfigError::UnknownArgument(a)) if a == "--bogus"
        ));
        assert!(matches!(
            parse_args(args(&["--route", "1,1"])),
            Err(ConfigError::MissingValue("--route"))
        ));
        assert!(matches!(
            parse_args(args(&["--plan"])),
            Err(ConfigError::MissingValue("--plan"))
        ));
    }

    #[test]
    fn resolve_endpoints() {
        let cfg = NavConfig::default();
        assert_eq!(cfg.resolve("2,3").unwrap(), Cell::new(2, 3));
        assert_eq!(cfg.resolve("pharmacy").unwrap(), Cell::new(9, 15));
        assert!(matches!(
            cfg.resolve("Cafeteria"),
            Err(ConfigError::BadEndpoint(_))
        ));

        let custom = NavConfig {
            plan: Some(PathBuf::from("plan.txt")),
            ..NavConfig::default()
        };
        assert!(custom.resolve("Pharmacy").is_err());
        assert!(custom.resolve("1,1").is_ok());
    }

    #[test]
    fn load_plan_file() {
        let path = std::env::temp_dir().join(format!("wardpath-plan-{}.txt", std::process::id()));
        fs::write(&path, "111\n101\n111\n").unwrap();
        let cfg = NavConfig {
            plan: Some(path.clone()),
            ..NavConfig::default()
        };
        let grid = cfg.load_grid().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 3));

        fs::write(&path, "111\n19\n").unwrap();
        assert!(matches!(cfg.load_grid(), Err(ConfigError::Plan(_))));
        fs::remove_file(&path).unwrap();
        assert!(matches!(cfg.load_grid(), Err(ConfigError::ReadPlan { .. })));
    }
}
