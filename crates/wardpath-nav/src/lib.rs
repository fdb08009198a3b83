//! **wardpath-nav**: terminal front-end for the hospital navigator.
//!
//! The [`Navigator`] session turns clicks and key presses into start/goal
//! selections and searches; [`App`] drives it through a [`Driver`] such as
//! the crossterm [`TermDriver`]. [`route`] offers the same search headless.

pub mod app;
pub mod config;
pub mod msg;
pub mod navigator;
pub mod render;
pub mod route;
pub mod term;

pub use app::{App, Driver, Model};
pub use config::{Command, ConfigError, HELP, Mode, NavConfig, parse_args};
pub use msg::{Effect, Key, MouseAction, Msg};
pub use navigator::{NavError, Navigator, Selection};
pub use route::{RouteReport, plan_route};
pub use term::TermDriver;
