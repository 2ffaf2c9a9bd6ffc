// Shared building blocks for the portfolio site and its terminal companion

pub mod config;
pub mod detail;
pub mod dictionary;
pub mod domain;
pub mod error;
pub mod grid;
pub mod parse;
pub mod pipeline;
pub mod popup;
pub mod truncate;

pub use config::SiteConfig;
pub use dictionary::{Dictionary, DictionaryBuilder, ProjectDictionaries, SiteData};
pub use domain::{Course, ProjectRecord};
pub use error::LoadError;
pub use grid::{GridItem, GridLayout, GridReady, Placement};
pub use pipeline::{build_site, load_site, LoadReport, Resources};
pub use popup::{ClickTarget, PopupEvent, PopupMachine, PopupState, StateTransitionError};
