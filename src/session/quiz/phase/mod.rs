mod answering;
mod results;

pub use self::answering::*;
pub use self::results::*;
