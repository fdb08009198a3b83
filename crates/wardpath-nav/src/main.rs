//! Hospital navigator.
//!
//! Run: cargo run -- [--route FROM TO] [--plan FILE]

use std::error::Error;
use std::io::Write;

use wardpath_core::FloorGrid;
use wardpath_nav::{
    App, Command, HELP, Mode, NavConfig, Navigator, TermDriver, parse_args, plan_route,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print!("{HELP}");
            return Ok(());
        }
        Command::Run(cfg) => cfg,
    };
    let grid = cfg.load_grid()?;

    match &cfg.mode {
        Mode::Route { from, to } => {
            let start = cfg.resolve(from)?;
            let goal = cfg.resolve(to)?;
            let report = plan_route(&grid, start, goal)?;
            if cfg.json {
                println!("{}", report.to_json()?);
            } else {
                print!(
                    "{}",
                    report.to_text(&grid, cfg.show_explored, cfg.builtin_plan())
                );
            }
        }
        Mode::Interactive => interactive(&cfg, grid)?,
    }
    Ok(())
}

fn interactive(cfg: &NavConfig, grid: FloorGrid) -> Result<(), Box<dyn Error>> {
    let nav = Navigator::new(grid)
        .with_explored(cfg.show_explored)
        .with_landmarks(cfg.builtin_plan());
    let (width, height) = nav.screen_size();
    let driver = TermDriver::new().with_mouse(cfg.mouse);
    let mut app = App::new(nav, driver, width, height);
    app.run()?;
    log::info!("{}", app.model().status());
    Ok(())
}
