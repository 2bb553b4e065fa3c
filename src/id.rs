//! String identifiers for sites, reference features and zones.
//!
//! Each kind of record gets its own ID newtype so that, for example, a zone ID can't be passed
//! where a site ID is expected. IDs are reference counted, so cloning one is cheap and ranked
//! results can be shared between threads.
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;

/// Bounds shared by all ID newtypes
pub trait IDLike: Eq + Hash + Borrow<str> + Clone + Display {}
impl<T> IDLike for T where T: Eq + Hash + Borrow<str> + Clone + Display {}

/// Declare a new ID type wrapping an `Arc<str>`
macro_rules! define_id_type {
    ($name:ident) => {
        /// Identifier read from an input file
        #[derive(
            Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize,
        )]
        pub struct $name(pub std::sync::Arc<str>);

        impl $name {
            /// Create an ID from its text
            pub fn new(id: &str) -> Self {
                Self(id.into())
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id.into())
            }
        }
    };
}
pub(crate) use define_id_type;

#[cfg(test)]
define_id_type!(GenericID);

/// A record identified by an ID
pub trait HasID<ID: IDLike> {
    /// The record's ID
    fn get_id(&self) -> &ID;
}

/// Implement [`HasID`] for a struct whose ID is stored in a field called `id`
macro_rules! define_id_getter {
    ($t:ty, $id_ty:ty) => {
        impl crate::id::HasID<$id_ty> for $t {
            fn get_id(&self) -> &$id_ty {
                &self.id
            }
        }
    };
}
pub(crate) use define_id_getter;

/// Something which can look up known IDs by their text
pub trait IDCollection<ID: IDLike> {
    /// Find the stored ID matching `id`, failing if it is not known
    fn get_id_by_str(&self, id: &str) -> Result<ID>;
}

impl<ID: IDLike, T> IDCollection<ID> for IndexMap<ID, T> {
    fn get_id_by_str(&self, id: &str) -> Result<ID> {
        self.get_key_value(id)
            .map(|(key, _)| key.clone())
            .with_context(|| format!("Unknown ID {id} found"))
    }
}

/// Key records by their IDs, keeping input order and rejecting repeated IDs
pub fn collect_unique_by_id<ID, T, I>(iter: I) -> Result<IndexMap<ID, T>>
where
    ID: IDLike,
    T: HasID<ID>,
    I: IntoIterator<Item = T>,
{
    let mut map = IndexMap::new();
    for item in iter {
        let id = item.get_id().clone();
        ensure!(!map.contains_key(&id), "Duplicate ID found: {id}");
        map.insert(id, item);
    }

    Ok(map)
}
