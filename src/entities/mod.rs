pub mod prelude;

pub mod artists;
pub mod shows;
pub mod venues;
