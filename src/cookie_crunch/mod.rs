/*
 *  A match-3 resolution engine: swaps, chains, cascades and refills.
 */

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod chain;
pub(crate) mod consts;
pub(crate) mod cookie;
pub mod coords;
pub(crate) mod grid;
pub mod level;
pub mod notation;
pub mod sets;
pub(crate) mod swap;
pub mod turn;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, Tile},
        catalog::CookieCatalog,
        chain::{Chain, ChainType},
        consts::*,
        cookie::{Cookie, CookieId},
        coords::{self, *},
        grid::Grid,
        level::LevelDescriptor,
        notation::*,
        sets::*,
        swap::Swap,
        turn::*
    };

    pub use super::sets::SetOps;
}
