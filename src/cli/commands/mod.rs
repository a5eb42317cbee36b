mod seed;
mod shows;
mod venues;

pub use seed::cmd_seed;
pub use shows::cmd_list_shows;
pub use venues::cmd_list_venues;
