mod validation;
pub use validation::*;

mod attempt;
pub use attempt::*;

mod child;
pub use child::*;

mod progress;
pub use progress::*;
