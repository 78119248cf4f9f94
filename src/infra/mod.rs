//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID;
//! - RNG-реализации для движка.

pub mod ids;
pub mod rng;

pub use ids::{IdGenerator, IdSequence};
pub use rng::{DeterministicRng, SystemRng};
