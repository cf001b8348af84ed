use crate::cookie_crunch::prelude::*;

/// The axis a chain runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainType {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainType::Horizontal => write!(f, "horizontal"),
            ChainType::Vertical => write!(f, "vertical"),
        }
    }
}

/// A matched run of same-type cookies along one axis.
///
/// Cookies are stored in scan order (left to right, or bottom to top). The score is zero until
/// the board scores the chain against its combo multiplier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    chain_type: ChainType,
    cookies: Vec<Cookie>,
    score: u32,
}

impl Chain {
    pub(crate) fn new(chain_type: ChainType, cookies: Vec<Cookie>) -> Chain {
        Chain { chain_type, cookies, score: 0 }
    }

    /// Scores the chain with the given multiplier: `60 * (len - 2) * multiplier`.
    pub(crate) fn score_with(&mut self, multiplier: u32) -> u32 {
        let extra = self.cookies.len().saturating_sub(2) as u32;
        self.score = CHAIN_BASE_SCORE * extra * multiplier;
        self.score
    }

    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// The type shared by every cookie in the chain.
    pub fn kind(&self) -> Option<CookieType> {
        self.cookies.first().map(|c| c.kind())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn contains(&self, cookie: &Cookie) -> bool {
        self.cookies.contains(cookie)
    }

    pub fn first(&self) -> Option<&Cookie> {
        self.cookies.first()
    }

    pub fn last(&self) -> Option<&Cookie> {
        self.cookies.last()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cookies.iter().map(|c| c.coord().notate()).collect::<Vec<_>>().join(" ");
        match self.kind() {
            Some(kind) => write!(f, "{} {} x{} [{}] +{}", self.chain_type, kind, self.len(), cells, self.score),
            None => write!(f, "{} (empty)", self.chain_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(len: usize) -> Chain {
        let cookies = (0..len)
            .map(|i| Cookie::new(CookieId(i as u64), CookieType::Macaroon, Coord::new(i, 0)))
            .collect();
        Chain::new(ChainType::Horizontal, cookies)
    }

    #[test]
    fn scoring_grows_with_length_and_multiplier() {
        assert_eq!(run(3).score_with(1), 60);
        assert_eq!(run(4).score_with(1), 120);
        assert_eq!(run(5).score_with(3), 540);

        let mut chain = run(4);
        assert_eq!(chain.score(), 0);
        chain.score_with(2);
        assert_eq!(chain.score(), 240);
        assert_eq!(chain.kind(), Some(CookieType::Macaroon));
    }
}
