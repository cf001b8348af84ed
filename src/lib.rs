pub mod cookie_crunch;
pub mod crunch_server;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, bail, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;
        pub use rand::{rngs::StdRng, Rng, SeedableRng};

        pub use std::{
            collections::{BTreeMap, BTreeSet, HashMap, HashSet},
            ops::{Add, Sub}
        };
    }
}

pub mod prelude {
    pub use super::cookie_crunch::prelude::*;
    pub use super::crunch_server::*;
    pub use super::utils::prelude::*;
}
