#![warn(missing_docs)]

//! The authorization core of a Solid resource server.
//!
//! For every HTTP operation the core decides whether a set of credentials
//! may perform the requested access modes on one or more resources. The
//! decision is computed by a pipeline of [PermissionReader]s - the
//! [WebAclReader] interprets WebACL documents as ground truth, and wrapping
//! readers add the semantic transforms around it: merging parallel sources
//! ([UnionPermissionReader]), dispatching by path ([PathBasedReader]),
//! deriving `create`/`delete` from parent containers
//! ([ParentContainerReader]), forwarding auxiliary resources to their
//! subject ([AuxiliaryReader]) and protecting ACL resources behind the
//! `control` mode ([WebAclAuxiliaryReader]).
//!
//! [AuthorizingHttpHandler] strings the stages together: credentials are
//! extracted, the required modes are derived from the operation (including
//! `create` for missing intermediate containers), the reader pipeline
//! produces a [PermissionMap], and the [Authorizer] either lets the
//! operation proceed or fails with a forbidden error.

mod error;
pub use error::*;

mod credentials;
pub use credentials::*;

mod mode;
pub use mode::*;

mod permission;
pub use permission::*;

mod access;
pub use access::*;

mod reader;
pub use reader::*;

mod modes;
pub use modes::*;

mod authorizer;
pub use authorizer::*;

mod handler;
pub use handler::*;
