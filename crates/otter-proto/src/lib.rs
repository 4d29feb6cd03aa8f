//! # Otter Proto
//!
//! Prototype-based object model with tiered property storage.
//!
//! ## Design Principles
//!
//! - **Three storage tiers**: frozen (fixed after construction), mutable
//!   (typed slots written in place) and dynamic (open, insertion-ordered)
//! - **Prototype chains**: parents are shared handles, searched last to first
//! - **Hygiene**: tiers never overlap and no prototype appears twice
//! - **Shapes**: replicas of a template share one layout descriptor
//!
//! ## Usage
//!
//! ```
//! use otter_proto::{ObjectBuilder, Value};
//!
//! let parent = ObjectBuilder::new().mutable("x", 0).build()?;
//! let child = ObjectBuilder::new()
//!     .prototype(&parent)
//!     .mutable("y", 1)
//!     .build()?;
//!
//! parent.set("x", 9)?;
//! assert_eq!(child.get("x")?, Value::Int(9));
//! # Ok::<(), otter_proto::ObjectError>(())
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod hygiene;
pub mod name;
pub mod object;
pub mod prototype;
pub mod shape;
pub mod slot;
pub mod store;
pub mod template;
pub mod value;

pub use builder::ObjectBuilder;
pub use config::ModelConfig;
pub use descriptor::Interface;
pub use error::{ObjectError, ObjectResult};
pub use name::PropertyName;
pub use object::{Object, Tier, merge};
pub use prototype::Prototypes;
pub use shape::{Shape, Signature, TypeTag};
pub use slot::{Slot, SlotError};
pub use store::{DynamicStore, FrozenStore, MutableStore, PropertyStore};
pub use template::Template;
pub use value::{Value, ValueType};
