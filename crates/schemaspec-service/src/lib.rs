//! Schemaspec Service - descriptive HTTP and RPC metadata for service methods
//!
//! A [`ServiceGroup`] holds named [`ServiceMember`]s. Members may carry an
//! [`HttpRoute`], an [`RpcMethod`], or both; [`ServiceGroup::methods`] returns
//! the members that carry at least one of them. Nothing here talks to the
//! network: the metadata exists for external generators to read.
//!
//! ```rust
//! use schemaspec_service::{http, rpc, HttpMethod, ServiceGroup, ServiceMember};
//!
//! let pets = ServiceGroup::new("PetService").member(
//!     ServiceMember::new("list_pets", Ok)
//!         .annotate(
//!             http("/pets")
//!                 .with_method(HttpMethod::Get)
//!                 .with_query(["tag", "species", "limit"]),
//!         )
//!         .annotate(rpc("ListPets")),
//! );
//!
//! let methods = pets.methods();
//! let list_pets = methods["list_pets"];
//! assert_eq!(list_pets.http_route().unwrap().path, "/pets");
//! assert_eq!(list_pets.rpc_method().unwrap().name, "ListPets");
//! ```

pub mod error;
pub mod group;
pub mod member;
pub mod metadata;

pub use error::{Result, ServiceError};
pub use group::{Service, ServiceGroup};
pub use member::{Handler, ServiceMember};
pub use metadata::{http, rpc, Annotation, HttpMethod, HttpRoute, RpcMethod};
