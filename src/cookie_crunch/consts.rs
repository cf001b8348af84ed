use crate::utils::prelude::*;

/// The shortest run of same-type cookies that counts as a chain.
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Points per cookie beyond the first two in a chain, before the combo multiplier.
pub const CHAIN_BASE_SCORE: u32 = 60;

/// Upper bound on full-board reshuffles before a level is declared unplayable.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 10_000;

/// Number of cookie types in play when a level does not say otherwise.
pub const DEFAULT_COOKIE_TYPES: usize = 6;

// A cookie typing.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CookieType {
    Croissant = 0,
    Cupcake = 1,
    Danish = 2,
    Donut = 3,
    Macaroon = 4,
    SugarCookie = 5,
}

impl CookieType {
    /// Gets the cookie types in identifier order.
    pub fn all() -> [CookieType; 6] {
        [
            CookieType::Croissant,
            CookieType::Cupcake,
            CookieType::Danish,
            CookieType::Donut,
            CookieType::Macaroon,
            CookieType::SugarCookie,
        ]
    }

    /// The neutral identifier of this type; stable across runs and independent of any artwork.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// A lowercase human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            CookieType::Croissant   => "croissant",
            CookieType::Cupcake     => "cupcake",
            CookieType::Danish      => "danish",
            CookieType::Donut       => "donut",
            CookieType::Macaroon    => "macaroon",
            CookieType::SugarCookie => "sugarcookie",
        }
    }

    /// Notates the type as a single letter, as used in board layouts.
    pub fn notate(&self) -> char {
        match self {
            CookieType::Croissant   => 'C',
            CookieType::Cupcake     => 'U',
            CookieType::Danish      => 'D',
            CookieType::Donut       => 'N',
            CookieType::Macaroon    => 'M',
            CookieType::SugarCookie => 'S',
        }
    }

    /// Parses a layout letter (case-insensitive) into a type.
    pub fn parse(ch: char) -> Result<CookieType> {
        CookieType::all()
            .into_iter()
            .find(|kind| kind.notate() == ch.to_ascii_uppercase())
            .ok_or_else(|| anyhow!("invalid notation {ch} for cookie type"))
    }
}

impl TryFrom<u8> for CookieType {
    type Error = Error;
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        CookieType::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| anyhow!("expected cookie type id of 0-5, received {value}"))
    }
}

impl std::str::FromStr for CookieType {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => CookieType::parse(ch),
            _ => CookieType::all()
                .into_iter()
                .find(|kind| kind.name().eq_ignore_ascii_case(s))
                .ok_or_else(|| anyhow!("invalid notation {s} for cookie type")),
        }
    }
}

impl std::fmt::Display for CookieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
