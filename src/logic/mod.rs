pub mod evaluation;
pub mod precip;
pub mod refresh;
pub mod risk;
pub mod rules;
pub mod schedule;
pub mod text;
pub mod units;

pub use evaluation::{Evaluator, WeatherBundle};
pub use refresh::RefreshService;
