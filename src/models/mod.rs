pub mod artist;
pub mod genres;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistForm};
pub use genres::Genres;
pub use show::{NewShow, ShowTiming};
pub use venue::{Venue, VenueForm};
