//! Command implementations.

pub mod lookup;
pub mod normalize;
pub mod show;
pub mod tribunals;

pub use self::lookup::execute_lookup;
pub use self::normalize::execute_normalize;
pub use self::show::execute_show;
pub use self::tribunals::execute_tribunals;
