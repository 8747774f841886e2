//! Testing utilities and harness for Tactus

pub mod robot;

pub use robot::*;


pub mod prelude {
    pub use crate::robot::*;
}
