// src/domain/generator.rs
use parking_lot::Mutex;
use rand::prelude::*;
use rand::rngs::StdRng;
use crate::money::Amount;

/// Descriptive data for a freshly listed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub starting_price: Amount,
}

/// Source of new auction items.
pub trait ItemGenerator: Send + Sync {
    fn generate_item(&self) -> NewItem;
}

const ADJECTIVES: &[&str] = &[
    "Handcrafted", "Rustic", "Sleek", "Refined", "Vintage", "Ergonomic",
    "Elegant", "Gorgeous", "Practical", "Luxurious", "Modern", "Tasty",
];

const MATERIALS: &[&str] = &[
    "Wooden", "Granite", "Bronze", "Cotton", "Steel", "Marble",
    "Leather", "Ceramic", "Bamboo", "Silk", "Plastic", "Rubber",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Lamp", "Clock", "Bike", "Keyboard", "Vase",
    "Table", "Hat", "Watch", "Gloves", "Teapot", "Compass",
];

const DESCRIPTIONS: &[&str] = &[
    "A one-of-a-kind piece that has been carefully restored by its previous owner.",
    "Barely used and kept in its original packaging since the day it was bought.",
    "Sourced from an estate sale, with a small maker's mark on the underside.",
    "Built to last, combining timeless design with everyday practicality.",
    "A collector's favourite that rarely comes up for sale in this condition.",
    "Light, durable and surprisingly comfortable for its size.",
];

const MIN_STARTING_CENTS: i64 = 10_00;
const MAX_STARTING_CENTS: i64 = 100_00;

/// Random product names and starting prices between 10.00 and 100.00.
pub struct RandomItemGenerator {
    rng: Mutex<StdRng>,
}

impl RandomItemGenerator {
    /// A fixed seed yields the same sequence of items.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomItemGenerator { rng: Mutex::new(rng) }
    }
}

impl Default for RandomItemGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn pick<'a>(rng: &mut StdRng, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

impl ItemGenerator for RandomItemGenerator {
    fn generate_item(&self) -> NewItem {
        let mut rng = self.rng.lock();
        let name = format!(
            "{} {} {}",
            pick(&mut rng, ADJECTIVES),
            pick(&mut rng, MATERIALS),
            pick(&mut rng, PRODUCTS)
        );
        let description = pick(&mut rng, DESCRIPTIONS).to_string();
        let cents = rng.random_range(MIN_STARTING_CENTS..=MAX_STARTING_CENTS);

        NewItem {
            name,
            description,
            starting_price: Amount::from_cents(cents).unwrap_or(Amount::ZERO),
        }
    }
}
