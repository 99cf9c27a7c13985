//! Quick-pick names offered before anything is typed.

use rand::seq::SliceRandom;
use rand::Rng;

/// Well-known names the quick picks are drawn from.
pub const CELEBRITY_POOL: [&str; 30] = [
    "Taylor Swift",
    "Michael Jackson",
    "Jay Chou",
    "Lady Gaga",
    "Tom Cruise",
    "Kanye West",
    "Lisa",
    "IU",
    "Brad Pitt",
    "Beyonce",
    "Justin Bieber",
    "Emma Watson",
    "Leonardo DiCaprio",
    "Rihanna",
    "Drake",
    "Ariana Grande",
    "BTS",
    "Blackpink",
    "JJ Lin",
    "Jolin Tsai",
    "Eminem",
    "Selena Gomez",
    "The Weeknd",
    "Dua Lipa",
    "Robert Downey Jr.",
    "Scarlett Johansson",
    "Zendaya",
    "Tom Holland",
    "Billie Eilish",
    "Adele",
];

/// Number of quick picks shown per session.
pub const RECOMMENDATION_COUNT: usize = 8;

/// Up to `count` distinct names from [`CELEBRITY_POOL`], in random order.
pub fn recommend<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    CELEBRITY_POOL
        .choose_multiple(rng, count)
        .map(|name| (*name).to_string())
        .collect()
}
