mod ctor;
mod marker;
mod member;
mod module;
mod type_decl;

pub use ctor::{Ctor, CtorArg};
pub use marker::{CollectionMarker, LookupMarker, Marker, OptionMarker};
pub use member::{Member, MethodSig, Param, Property};
pub use module::{Module, TypeIter};
pub use type_decl::{TypeDecl, TypeKind};
