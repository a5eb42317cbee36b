//! Domain types for the booking directory with strong typing.
//!
//! Identifier newtypes keep venue and artist ids from being mixed up when
//! they travel through services and handlers as plain integers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a Venue.
    ///
    /// ```rust
    /// use gigbook::domain::VenueId;
    ///
    /// let id = VenueId::new(3);
    /// assert_eq!(id.value(), 3);
    /// assert_eq!(id.to_string(), "3");
    /// ```
    VenueId
);

entity_id!(
    /// Unique identifier for an Artist.
    ArtistId
);

/// The three record kinds the directory manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
            Self::Show => "show",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Venue => "Venue",
            Self::Artist => "Artist",
            Self::Show => "Show",
        };
        f.write_str(label)
    }
}

/// Kind of write a mutation performs, named after the notice it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Listed,
    Updated,
    Deleted,
}

impl Mutation {
    /// Short label used for metrics and log fields.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Listed => "create",
            Self::Updated => "update",
            Self::Deleted => "delete",
        }
    }

    /// Success notice for `subject`, e.g. "Venue The Musical Hop was successfully listed!".
    #[must_use]
    pub fn notice(&self, subject: &str) -> String {
        format!("{subject} was successfully {self}!")
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let past = match self {
            Self::Listed => "listed",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        };
        f.write_str(past)
    }
}
