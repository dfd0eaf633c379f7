pub mod episode;
pub mod loose;

pub use episode::{EpisodeMatch, EpisodeParser, EpisodeRule};
pub use loose::{
    DEFAULT_EXCLUDED_NUMBERS, LooseNumeral, LooseNumeralScanner, default_excluded_numbers,
};
