//! # Resource Trait
//!
//! The `Resource` trait defines the contract every REST resource (User, Todo, Invoice, …)
//! must implement to be managed by a generic [`Store`](crate::framework::Store). It names the
//! payload types sent on create and update, and how to read the resource's identifier.
//!
//! # Architecture Note
//! By defining one contract for all resource types we can write the store's CRUD logic
//! *once*. Associated types keep payloads honest: a `Todo` store takes a `TodoCreate`
//! payload and you can't accidentally send it an `InvoiceCreate`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Identifier of a resource: either text or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        ResourceId::Text(value)
    }
}

impl From<&String> for ResourceId {
    fn from(value: &String) -> Self {
        ResourceId::Text(value.clone())
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Number(value)
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        ResourceId::Number(value.into())
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId::Number(value.into())
    }
}

/// Trait that any resource must implement to be managed by a [`Store`](crate::framework::Store).
///
/// ```rust
/// use rest_store::framework::{Resource, ResourceId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Todo { id: u32, title: String, done: bool }
///
/// #[derive(Debug, Serialize)]
/// struct TodoCreate { title: String }
///
/// #[derive(Debug, Serialize)]
/// struct TodoUpdate { done: Option<bool> }
///
/// impl Resource for Todo {
///     type Create = TodoCreate;
///     type Update = TodoUpdate;
///
///     fn id(&self) -> ResourceId { self.id.into() }
/// }
/// ```
pub trait Resource: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Payload sent with `POST {endpoint}`.
    type Create: Serialize + Debug + Send + Sync + 'static;

    /// Payload sent with `PUT {endpoint}/{id}`.
    type Update: Serialize + Debug + Send + Sync + 'static;

    /// The stable identifier of this resource.
    fn id(&self) -> ResourceId;
}

/// Short type name used in logs (e.g. "Todo" instead of "my_app::model::Todo").
pub(crate) fn resource_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
